mod corpus;
mod dataset;
mod gloss;
mod speakers;

pub use corpus::CorpusCommands;
pub use dataset::DatasetCommands;
pub use gloss::GlossCommands;
pub use speakers::SpeakerCommands;
