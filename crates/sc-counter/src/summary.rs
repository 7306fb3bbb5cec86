//! Per-gloss result records derived from [`FrequencyTables`].
//!
//! JSON shape of one gloss:
//!
//! ```json
//! {
//!   "frequency": 3,
//!   "numberOfSigners": 2,
//!   "frequenciesPerRegion": { "North": { "frequency": 2, "numberOfSigners": 1 } },
//!   "frequenciesPerGender": { "f": { "frequency": 2, "numberOfSigners": 1 } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::warn;

use crate::aggregate::{FrequencyTables, GlossTally};

/// Prefix of every breakdown key in the JSON output.
pub const BREAKDOWN_PREFIX: &str = "frequenciesPer";

/// Name of the region breakdown.
pub const REGION_BREAKDOWN: &str = "Region";

/// Count and distinct-signer count for one breakdown value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub frequency: u64,
    #[serde(rename = "numberOfSigners")]
    pub number_of_signers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossSummary {
    pub frequency: u64,
    /// Distinct `(participant, document)` pairs.
    pub number_of_signers: u64,
    pub per_region: BTreeMap<String, Breakdown>,
    /// Field name → field value → breakdown.
    pub per_field: BTreeMap<String, BTreeMap<String, Breakdown>>,
}

impl GlossSummary {
    #[must_use]
    pub fn from_tally(tally: &GlossTally) -> Self {
        let mut per_region: BTreeMap<String, Breakdown> = BTreeMap::new();
        for ((region, _participant), count) in &tally.per_region {
            let entry = per_region.entry(region.clone()).or_default();
            entry.frequency += count;
            entry.number_of_signers += 1;
        }

        let mut per_field: BTreeMap<String, BTreeMap<String, Breakdown>> = BTreeMap::new();
        for ((field, value, _participant), count) in &tally.per_field {
            let entry = per_field
                .entry(field.clone())
                .or_default()
                .entry(value.clone())
                .or_default();
            entry.frequency += count;
            entry.number_of_signers += 1;
        }

        Self {
            frequency: tally.frequency,
            number_of_signers: tally.per_signer.len() as u64,
            per_region,
            per_field,
        }
    }

    /// Field breakdowns that get their own output key. A metadata column
    /// named like the region breakdown would shadow it and is left out.
    fn output_fields(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Breakdown>)> {
        self.per_field
            .iter()
            .filter(|(field, _)| field.as_str() != REGION_BREAKDOWN)
    }
}

// Region and field breakdowns share one flat key space in the output, so the
// map is written by hand.
impl Serialize for GlossSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields: Vec<_> = self.output_fields().collect();
        let mut map = serializer.serialize_map(Some(2 + 1 + fields.len()))?;
        map.serialize_entry("frequency", &self.frequency)?;
        map.serialize_entry("numberOfSigners", &self.number_of_signers)?;
        map.serialize_entry(
            &format!("{BREAKDOWN_PREFIX}{REGION_BREAKDOWN}"),
            &self.per_region,
        )?;
        for (field, values) in fields {
            map.serialize_entry(&format!("{BREAKDOWN_PREFIX}{field}"), values)?;
        }
        map.end()
    }
}

/// Result records for every gloss in the tables.
///
/// Runs in time linear in the number of tally entries.
#[must_use]
pub fn summarize(tables: &FrequencyTables) -> BTreeMap<String, GlossSummary> {
    let summaries: BTreeMap<String, GlossSummary> = tables
        .glosses
        .iter()
        .map(|(gloss, tally)| (gloss.clone(), GlossSummary::from_tally(tally)))
        .collect();
    if summaries
        .values()
        .any(|summary| summary.per_field.contains_key(REGION_BREAKDOWN))
    {
        warn!(
            column = REGION_BREAKDOWN,
            "metadata column clashes with the region breakdown; leaving it out of the output"
        );
    }
    summaries
}
