//! Counting engine configuration.

use serde::{Deserialize, Serialize};

const fn default_minimum_overlap() -> u64 {
    40
}

fn default_region_column() -> String {
    String::from("Metadata region")
}

fn default_gloss_tier_pattern() -> String {
    String::from("(?i)gloss")
}

fn default_left_hand_pattern() -> String {
    String::from(r"(?i)(gloss\s*l\b|left)")
}

fn default_right_hand_pattern() -> String {
    String::from(r"(?i)(gloss\s*r\b|right)")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CounterConfig {
    /// Milliseconds by which a two-handed annotation may start after the
    /// current unit's end minus this value and still join the unit.
    #[serde(default = "default_minimum_overlap")]
    pub minimum_overlap: u64,

    /// Metadata column holding the participant's region.
    #[serde(default = "default_region_column")]
    pub region_column: String,

    /// Regex over `LINGUISTIC_TYPE_REF` selecting gloss tiers.
    #[serde(default = "default_gloss_tier_pattern")]
    pub gloss_tier_pattern: String,

    /// Regex over tier ids identifying the left-hand tier.
    #[serde(default = "default_left_hand_pattern")]
    pub left_hand_pattern: String,

    /// Regex over tier ids identifying the right-hand tier.
    #[serde(default = "default_right_hand_pattern")]
    pub right_hand_pattern: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            minimum_overlap: default_minimum_overlap(),
            region_column: default_region_column(),
            gloss_tier_pattern: default_gloss_tier_pattern(),
            left_hand_pattern: default_left_hand_pattern(),
            right_hand_pattern: default_right_hand_pattern(),
        }
    }
}
