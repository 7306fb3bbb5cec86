//! # sc-core
//!
//! Core types for signcount.
//!
//! This crate provides the foundational types shared across all signcount crates:
//! - The transient annotation model (`Annotation`, `GlossUnit`) produced by
//!   parsing ELAN documents and consumed by the counting engine
//! - Entity structs for the persisted dictionary mirror (datasets, glosses,
//!   corpora, speakers, documents, frequency records)
//! - Hand enum and tier classification

pub mod annotation;
pub mod entities;
pub mod enums;

pub use annotation::{Annotation, GlossUnit};
pub use enums::Hand;

/// Suffix separator between a participant code and a dataset acronym in
/// corpus-scoped speaker identifiers (`S001_NGT`).
pub const SPEAKER_SUFFIX_SEPARATOR: char = '_';

/// Build the corpus-scoped speaker identifier for a participant.
#[must_use]
pub fn corpus_speaker_identifier(participant: &str, acronym: &str) -> String {
    format!("{participant}{SPEAKER_SUFFIX_SEPARATOR}{acronym}")
}
