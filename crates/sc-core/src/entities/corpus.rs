use serde::{Deserialize, Serialize};

/// Frequency-analysis grouping of a dataset's annotation documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Corpus {
    pub id: i64,
    /// Same as the dataset acronym.
    pub name: String,
    pub dataset_id: i64,
}
