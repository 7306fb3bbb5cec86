//! # sc-sync
//!
//! Keeps a dataset's corpus in the database in step with its folder of
//! annotation files.
//!
//! - [`discover`] lists the folder and splits files into small and large
//! - [`speakers`] imports participant metadata as corpus speakers
//! - [`resolve`] maps gloss tokens to dictionary glosses
//! - [`orchestrator`] runs the counting engine per batch and reconciles
//!   documents, frequency records, and roll-ups

pub mod discover;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod resolve;
pub mod speakers;

pub use discover::{CorpusFile, DiscoveredFiles, discover_files};
pub use error::SyncError;
pub use orchestrator::{CorpusSync, NoProgress, SyncProgress};
pub use report::{FailedFile, SyncReport};
pub use resolve::{GlossResolution, ResolvedTokens, resolve_gloss, resolve_tokens};
pub use speakers::{SpeakerImport, import_speakers, speaker_attributes};
