//! Frequency aggregation over gloss units.
//!
//! Every distinct gloss in a unit counts once for the unit, and once for each
//! participant who produced it in that unit. Participant counts are further
//! broken down by document, by metadata region, and by every other metadata
//! field present for the participant.

use std::collections::{BTreeMap, BTreeSet};

use sc_core::GlossUnit;
use sc_parser::MetadataTable;

/// All counts recorded for one gloss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossTally {
    /// Units containing the gloss.
    pub frequency: u64,
    /// `(participant, document)` → count.
    pub per_signer: BTreeMap<(String, String), u64>,
    /// `(region, participant)` → count.
    pub per_region: BTreeMap<(String, String), u64>,
    /// `(field, value, participant)` → count.
    pub per_field: BTreeMap<(String, String, String), u64>,
}

impl GlossTally {
    fn merge(&mut self, other: Self) {
        self.frequency += other.frequency;
        for (key, count) in other.per_signer {
            *self.per_signer.entry(key).or_default() += count;
        }
        for (key, count) in other.per_region {
            *self.per_region.entry(key).or_default() += count;
        }
        for (key, count) in other.per_field {
            *self.per_field.entry(key).or_default() += count;
        }
    }
}

/// Frequency tables for one counting run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTables {
    pub glosses: BTreeMap<String, GlossTally>,
    /// Documents whose results need a human look, with the reason.
    pub review: Vec<String>,
}

impl FrequencyTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a document's units. Empty units and blank glosses contribute
    /// nothing.
    pub fn add_units(&mut self, units: &[GlossUnit], document: &str, metadata: &MetadataTable) {
        for unit in units.iter().filter(|u| !u.is_empty()) {
            let mut producers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
            for annotation in &unit.annotations {
                if let Some(gloss) = annotation.gloss() {
                    producers
                        .entry(gloss)
                        .or_default()
                        .insert(annotation.participant.as_str());
                }
            }

            for (gloss, participants) in producers {
                let tally = self.glosses.entry(gloss.to_string()).or_default();
                tally.frequency += 1;

                for participant in participants {
                    *tally
                        .per_signer
                        .entry((participant.to_string(), document.to_string()))
                        .or_default() += 1;

                    let Some(row) = metadata.get(participant) else {
                        continue;
                    };
                    if let Some(region) = &row.region {
                        *tally
                            .per_region
                            .entry((region.clone(), participant.to_string()))
                            .or_default() += 1;
                    }
                    for (field, value) in &row.fields {
                        *tally
                            .per_field
                            .entry((field.clone(), value.clone(), participant.to_string()))
                            .or_default() += 1;
                    }
                }
            }
        }
    }

    /// Fold another run's tables into this one.
    pub fn merge(&mut self, other: Self) {
        for (gloss, tally) in other.glosses {
            self.glosses.entry(gloss).or_default().merge(tally);
        }
        self.review.extend(other.review);
    }

    pub fn flag_for_review(&mut self, note: impl Into<String>) {
        self.review.push(note.into());
    }

    #[must_use]
    pub fn gloss(&self, gloss: &str) -> Option<&GlossTally> {
        self.glosses.get(gloss)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glosses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glosses.is_empty()
    }

    /// Per-participant counts for one document: `participant → gloss → count`.
    #[must_use]
    pub fn document_counts(&self, document: &str) -> BTreeMap<String, BTreeMap<String, u64>> {
        let mut counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        for (gloss, tally) in &self.glosses {
            for ((participant, doc), count) in &tally.per_signer {
                if doc == document {
                    counts
                        .entry(participant.clone())
                        .or_default()
                        .insert(gloss.clone(), *count);
                }
            }
        }
        counts
    }

    /// Documents that contributed at least one count.
    #[must_use]
    pub fn documents(&self) -> BTreeSet<String> {
        self.glosses
            .values()
            .flat_map(|t| t.per_signer.keys().map(|(_, doc)| doc.clone()))
            .collect()
    }
}
