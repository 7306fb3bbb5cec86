pub mod corpus;
pub mod count;
pub mod dataset;
pub mod dispatch;
pub mod gloss;
pub mod speakers;
