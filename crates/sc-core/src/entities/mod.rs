//! Entity structs for the persisted dictionary mirror.
//!
//! Each entity maps to a table in the libSQL database (see
//! `sc-db/migrations/001_initial.sql`). All structs derive `Serialize` and
//! `Deserialize` for CLI output and JSON roundtrip.

mod corpus;
mod dataset;
mod document;
mod frequency;
mod gloss;
mod speaker;

pub use corpus::Corpus;
pub use dataset::Dataset;
pub use document::Document;
pub use frequency::FrequencyRecord;
pub use gloss::{Gloss, GlossAnnotation};
pub use speaker::{Speaker, SpeakerAttributes};
