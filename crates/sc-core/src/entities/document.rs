use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Corpus-tracked identity of one annotation file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub corpus_id: i64,
    /// File basename without extension.
    pub identifier: String,
    /// File creation time at the last (re)stamp. Used to detect updated files.
    pub creation_time: DateTime<Utc>,
}
