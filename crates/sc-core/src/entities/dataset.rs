use serde::{Deserialize, Serialize};

/// A dictionary dataset. Glosses belong to exactly one dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    pub id: i64,
    /// Short unique name, e.g. `NGT`. Suffixes corpus-scoped speaker identifiers.
    pub acronym: String,
    /// Language code used to match annotation text during gloss resolution.
    pub default_language: String,
}
