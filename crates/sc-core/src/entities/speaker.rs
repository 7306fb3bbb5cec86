use serde::{Deserialize, Serialize};

/// A signer in a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Speaker {
    pub id: i64,
    /// Corpus-scoped identifier, `<participant>_<ACRONYM>`.
    pub identifier: String,
    #[serde(flatten)]
    pub attributes: SpeakerAttributes,
}

/// Descriptive speaker fields, usually taken from a metadata row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeakerAttributes {
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub handedness: Option<String>,
    /// Region from the metadata region column.
    pub location: Option<String>,
}
