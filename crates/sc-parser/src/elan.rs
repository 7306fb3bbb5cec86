//! ELAN annotation document parsing.
//!
//! Only top-level gloss tiers are read: `TIER` elements without a `PARENT_REF`
//! whose `LINGUISTIC_TYPE_REF` matches the gloss-type pattern. Their
//! `ALIGNABLE_ANNOTATION`s become [`Annotation`]s with absolute times.

use std::path::Path;

use sc_core::Annotation;

use crate::error::ParserError;
use crate::tiers::{ParticipantTiers, SkippedParticipant, Tier, TierPatterns, classify};
use crate::time_slots::TimeSlots;

/// A parsed annotation document, grouped by participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElanDocument {
    /// File basename without extension.
    pub identifier: String,
    /// Participants that produce units, in document order.
    pub participants: Vec<ParticipantTiers>,
    /// Participants whose tier layout produces no units.
    pub skipped: Vec<SkippedParticipant>,
}

impl ElanDocument {
    /// Parse ELAN XML text.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` for malformed XML, a non-ELAN root, missing
    /// required attributes, or annotations referencing unresolved time slots.
    pub fn parse(xml: &str, identifier: &str, patterns: &TierPatterns) -> Result<Self, ParserError> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();
        if !root.has_tag_name("ANNOTATION_DOCUMENT") {
            return Err(ParserError::NotElan(root.tag_name().name().to_string()));
        }

        let slots = TimeSlots::from_document(&doc)?;
        let grouped = gloss_tiers_by_participant(root, &slots, patterns)?;

        let mut participants = Vec::new();
        let mut skipped = Vec::new();
        for (participant, tiers) in grouped {
            match classify(&participant, tiers, patterns) {
                Ok(tiers) => participants.push(tiers),
                Err(skip) => {
                    tracing::debug!(
                        document = identifier,
                        participant = %skip.participant,
                        tier_count = skip.tier_count,
                        reason = %skip.reason,
                        "elan: participant skipped"
                    );
                    skipped.push(skip);
                }
            }
        }

        Ok(Self {
            identifier: identifier.to_string(),
            participants,
            skipped,
        })
    }

    /// Read and parse an ELAN file. The identifier is the file stem.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::Read` if the file cannot be read, otherwise as
    /// [`Self::parse`].
    pub fn read(path: &Path, patterns: &TierPatterns) -> Result<Self, ParserError> {
        let xml = std::fs::read_to_string(path).map_err(|source| ParserError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&xml, &document_identifier(path), patterns)
    }

    /// Number of participants classified as two-handed.
    #[must_use]
    pub fn two_handed_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| matches!(p.layout, crate::tiers::ParticipantLayout::TwoHanded { .. }))
            .count()
    }
}

/// Document identifier of an annotation file: its basename without extension.
#[must_use]
pub fn document_identifier(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn gloss_tiers_by_participant(
    root: roxmltree::Node<'_, '_>,
    slots: &TimeSlots,
    patterns: &TierPatterns,
) -> Result<Vec<(String, Vec<Tier>)>, ParserError> {
    let mut grouped: Vec<(String, Vec<Tier>)> = Vec::new();

    for node in root.children().filter(|n| n.has_tag_name("TIER")) {
        if node.attribute("PARENT_REF").is_some() {
            continue;
        }
        let is_gloss = node
            .attribute("LINGUISTIC_TYPE_REF")
            .is_some_and(|kind| patterns.is_gloss_type(kind));
        if !is_gloss {
            continue;
        }

        let id = node.attribute("TIER_ID").ok_or(ParserError::MissingAttribute {
            element: "TIER",
            attribute: "TIER_ID",
        })?;
        let participant = node.attribute("PARTICIPANT").unwrap_or("").trim().to_string();
        let annotations = tier_annotations(node, &participant, slots)?;

        let tier = Tier {
            id: id.to_string(),
            participant: participant.clone(),
            annotations,
        };
        match grouped.iter_mut().find(|(p, _)| *p == participant) {
            Some((_, tiers)) => tiers.push(tier),
            None => grouped.push((participant, vec![tier])),
        }
    }

    Ok(grouped)
}

fn tier_annotations(
    tier: roxmltree::Node<'_, '_>,
    participant: &str,
    slots: &TimeSlots,
) -> Result<Vec<Annotation>, ParserError> {
    let missing = |attribute| ParserError::MissingAttribute {
        element: "ALIGNABLE_ANNOTATION",
        attribute,
    };

    tier.descendants()
        .filter(|n| n.has_tag_name("ALIGNABLE_ANNOTATION"))
        .map(|node| {
            let id = node.attribute("ANNOTATION_ID").ok_or_else(|| missing("ANNOTATION_ID"))?;
            let ref1 = node.attribute("TIME_SLOT_REF1").ok_or_else(|| missing("TIME_SLOT_REF1"))?;
            let ref2 = node.attribute("TIME_SLOT_REF2").ok_or_else(|| missing("TIME_SLOT_REF2"))?;
            let value = node
                .children()
                .find(|n| n.has_tag_name("ANNOTATION_VALUE"))
                .and_then(|n| n.text())
                .map(String::from);

            Ok(Annotation {
                id: id.to_string(),
                begin: slots.resolve(ref1, id)?,
                end: slots.resolve(ref2, id)?,
                value,
                cve_ref: node.attribute("CVE_REF").map(String::from),
                participant: participant.to_string(),
                hand: None,
            })
        })
        .collect()
}
