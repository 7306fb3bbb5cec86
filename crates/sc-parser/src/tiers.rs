//! Gloss tier selection and participant classification.
//!
//! A participant's gloss tiers decide how their annotations become units:
//!
//! | gloss tiers | handling |
//! |---|---|
//! | 1 | one-handed: every annotation is its own unit |
//! | 2 | two-handed, if the tier ids name one left and one right hand |
//! | other | skipped with a diagnostic |

use regex::Regex;
use sc_core::{Annotation, Hand};

use crate::error::ParserError;

pub const DEFAULT_GLOSS_TIER_PATTERN: &str = "(?i)gloss";
pub const DEFAULT_LEFT_HAND_PATTERN: &str = r"(?i)(gloss\s*l\b|left)";
pub const DEFAULT_RIGHT_HAND_PATTERN: &str = r"(?i)(gloss\s*r\b|right)";

/// Compiled tier-name patterns.
#[derive(Debug, Clone)]
pub struct TierPatterns {
    gloss_type: Regex,
    left: Regex,
    right: Regex,
}

impl TierPatterns {
    /// Compile the three patterns.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::InvalidPattern` if any pattern is not a valid regex.
    pub fn new(gloss_type: &str, left: &str, right: &str) -> Result<Self, ParserError> {
        Ok(Self {
            gloss_type: Regex::new(gloss_type)?,
            left: Regex::new(left)?,
            right: Regex::new(right)?,
        })
    }

    /// Whether a `LINGUISTIC_TYPE_REF` denotes a gloss tier.
    #[must_use]
    pub fn is_gloss_type(&self, linguistic_type: &str) -> bool {
        self.gloss_type.is_match(linguistic_type)
    }

    /// Hand named by a tier id. Ids matching both or neither pattern name no hand.
    #[must_use]
    pub fn hand_of(&self, tier_id: &str) -> Option<Hand> {
        match (self.left.is_match(tier_id), self.right.is_match(tier_id)) {
            (true, false) => Some(Hand::Left),
            (false, true) => Some(Hand::Right),
            _ => None,
        }
    }
}

impl Default for TierPatterns {
    fn default() -> Self {
        Self::new(
            DEFAULT_GLOSS_TIER_PATTERN,
            DEFAULT_LEFT_HAND_PATTERN,
            DEFAULT_RIGHT_HAND_PATTERN,
        )
        .expect("default tier patterns are valid")
    }
}

/// How a participant with a given number of gloss tiers is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierHandling {
    OneHanded,
    TwoHanded,
    Skip,
}

/// Tier-count policy table.
pub struct TierPolicy;

impl TierPolicy {
    #[must_use]
    pub const fn for_count(tier_count: usize) -> TierHandling {
        match tier_count {
            1 => TierHandling::OneHanded,
            2 => TierHandling::TwoHanded,
            _ => TierHandling::Skip,
        }
    }
}

/// One parsed gloss tier, before hand assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub id: String,
    pub participant: String,
    pub annotations: Vec<Annotation>,
}

/// Annotation streams of one participant, ready for unit building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantLayout {
    OneHanded(Vec<Annotation>),
    TwoHanded {
        right: Vec<Annotation>,
        left: Vec<Annotation>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantTiers {
    pub participant: String,
    pub layout: ParticipantLayout,
}

/// A participant whose tiers produce no units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedParticipant {
    pub participant: String,
    pub tier_count: usize,
    pub reason: String,
}

/// Classify one participant's gloss tiers according to [`TierPolicy`].
///
/// # Errors
///
/// Returns the skip diagnostic when the participant yields no units.
pub fn classify(
    participant: &str,
    tiers: Vec<Tier>,
    patterns: &TierPatterns,
) -> Result<ParticipantTiers, SkippedParticipant> {
    let tier_count = tiers.len();
    let skipped = |reason: String| SkippedParticipant {
        participant: participant.to_string(),
        tier_count,
        reason,
    };

    match TierPolicy::for_count(tier_count) {
        TierHandling::OneHanded => {
            let annotations = tiers
                .into_iter()
                .flat_map(|tier| tier.annotations)
                .collect();
            Ok(ParticipantTiers {
                participant: participant.to_string(),
                layout: ParticipantLayout::OneHanded(annotations),
            })
        }
        TierHandling::TwoHanded => {
            let hands: Vec<Option<Hand>> = tiers.iter().map(|t| patterns.hand_of(&t.id)).collect();
            let (right_index, left_index) = match hands.as_slice() {
                [Some(Hand::Right), Some(Hand::Left)] => (0, 1),
                [Some(Hand::Left), Some(Hand::Right)] => (1, 0),
                _ => {
                    let names: Vec<&str> = tiers.iter().map(|t| t.id.as_str()).collect();
                    return Err(skipped(format!(
                        "tier ids {names:?} do not name one left and one right hand"
                    )));
                }
            };

            let mut tiers: Vec<Option<Tier>> = tiers.into_iter().map(Some).collect();
            let take = |tiers: &mut Vec<Option<Tier>>, index: usize, hand: Hand| {
                tiers[index]
                    .take()
                    .map(|tier| with_hand(tier.annotations, hand))
                    .unwrap_or_default()
            };
            let right = take(&mut tiers, right_index, Hand::Right);
            let left = take(&mut tiers, left_index, Hand::Left);

            Ok(ParticipantTiers {
                participant: participant.to_string(),
                layout: ParticipantLayout::TwoHanded { right, left },
            })
        }
        TierHandling::Skip => Err(skipped(format!(
            "{tier_count} gloss tiers; expected 1 or 2"
        ))),
    }
}

fn with_hand(annotations: Vec<Annotation>, hand: Hand) -> Vec<Annotation> {
    annotations
        .into_iter()
        .map(|annotation| Annotation {
            hand: Some(hand),
            ..annotation
        })
        .collect()
}
