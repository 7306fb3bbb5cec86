//! Counter error types for sc-counter.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// A document could not be parsed. Fatal for the file and its batch.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: sc_parser::ParserError,
    },

    /// Tier patterns or metadata could not be loaded.
    #[error(transparent)]
    Parser(#[from] sc_parser::ParserError),

    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    #[error("no annotation files found in the given inputs")]
    NoInputs,

    #[error("file walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
