//! Sync error types for sc-sync.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    /// No speaker identifier ends with `_<ACRONYM>`. Nothing was changed.
    #[error("no speakers found for corpus {0}; import speaker metadata first")]
    NoSpeakers(String),

    /// Participants without a speaker record or a metadata row.
    #[error("speakers not found: {}", .0.join(", "))]
    SpeakersNotFound(Vec<String>),

    #[error("document {identifier} is not part of corpus {corpus}")]
    DocumentNotFound { corpus: String, identifier: String },

    #[error("corpus folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("counting timed out after {0}s")]
    Timeout(u64),

    #[error("counting task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Counter(#[from] sc_counter::CounterError),

    #[error(transparent)]
    Parser(#[from] sc_parser::ParserError),

    #[error("database error: {0}")]
    Database(#[from] sc_db::error::DatabaseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
