//! Transient annotation model.
//!
//! Annotations are created by the ELAN parser and grouped into gloss units by
//! the counting engine. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::enums::Hand;

/// A single timed gloss label on an ELAN tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    /// Begin time in milliseconds.
    pub begin: i64,
    /// End time in milliseconds.
    pub end: i64,
    /// Annotation text, verbatim. May be blank.
    pub value: Option<String>,
    /// Controlled-vocabulary entry reference, if the tier uses one.
    pub cve_ref: Option<String>,
    pub participant: String,
    /// `None` for one-handed tiers.
    pub hand: Option<Hand>,
}

impl Annotation {
    /// The gloss this annotation contributes to, or `None` when the value is
    /// missing or whitespace only.
    #[must_use]
    pub fn gloss(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Annotations considered one co-occurring articulation event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossUnit {
    pub annotations: Vec<Annotation>,
}

impl GlossUnit {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn single(annotation: Annotation) -> Self {
        Self {
            annotations: vec![annotation],
        }
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Latest end time across the unit's annotations.
    #[must_use]
    pub fn end(&self) -> Option<i64> {
        self.annotations.iter().map(|a| a.end).max()
    }
}
