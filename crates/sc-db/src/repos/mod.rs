//! Repository modules for the signcount entities.
//!
//! Each module adds methods to `CorpusService` via `impl CorpusService` blocks.
//! Lookups that may legitimately find nothing return `Option`.

pub mod corpus;
pub mod dataset;
pub mod document;
pub mod frequency;
pub mod gloss;
pub mod speaker;
