use serde::{Deserialize, Serialize};

/// A dictionary headword. Frequency roll-ups live on the gloss.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gloss {
    pub id: i64,
    pub dataset_id: Option<i64>,
    pub lemma_id: Option<i64>,
    /// Total token count across all frequency records (`tokNo`).
    pub tok_no: i64,
    /// Distinct speakers across all frequency records (`tokNoSgnr`).
    pub tok_no_sgnr: i64,
}

impl Gloss {
    /// A gloss is only resolvable when it is linked to both a lemma and a dataset.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.dataset_id.is_some() && self.lemma_id.is_some()
    }
}

/// Annotation text of a gloss in one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlossAnnotation {
    pub gloss_id: i64,
    pub language: String,
    pub text: String,
}
