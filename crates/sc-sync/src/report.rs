//! Outcome of a sync operation.

use std::collections::BTreeSet;

use serde::Serialize;

/// A file or batch that was not applied, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub dataset: String,
    pub documents_created: Vec<String>,
    pub documents_updated: Vec<String>,
    pub documents_unchanged: usize,
    pub documents_removed: Vec<String>,
    pub speakers_created: Vec<String>,
    /// Gloss tokens with no match in the dataset.
    pub glosses_not_found: BTreeSet<String>,
    /// Gloss tokens that matched a gloss of another dataset. Not applied.
    pub glosses_in_other_dataset: BTreeSet<String>,
    /// Glosses whose roll-ups were recomputed.
    pub updated_glosses: BTreeSet<i64>,
    pub speakers_not_found: BTreeSet<String>,
    /// Malformed metadata rows and speaker attributes that could not be read.
    pub metadata_errors: Vec<String>,
    pub files_failed: Vec<FailedFile>,
    /// Documents flagged by the counting engine for manual review.
    pub review: Vec<String>,
}

impl SyncReport {
    #[must_use]
    pub fn new(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            ..Self::default()
        }
    }

    pub fn fail(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.files_failed.push(FailedFile {
            file: file.into(),
            reason: reason.into(),
        });
    }

    /// Record a metadata problem once.
    pub fn metadata_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        if !self.metadata_errors.contains(&error) {
            self.metadata_errors.push(error);
        }
    }

    /// Whether every discovered file was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files_failed.is_empty()
    }
}
