//! Result export: pretty JSON, or CSV with one row per gloss.
//!
//! CSV columns are the leaf paths of each gloss's JSON record joined with
//! `.` (for example `frequenciesPerRegion.North.frequency`), preceded by a
//! `gloss` column. Columns are the sorted union over all glosses; cells for
//! paths a gloss lacks are empty.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde_json::Value;

use crate::error::CounterError;
use crate::summary::GlossSummary;

pub const GLOSS_COLUMN: &str = "gloss";

/// Render results as pretty-printed JSON keyed by gloss.
///
/// # Errors
///
/// Returns `CounterError::Json` if serialization fails.
pub fn to_json(summaries: &BTreeMap<String, GlossSummary>) -> Result<String, CounterError> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// Flatten a JSON value into `path → scalar` pairs.
#[must_use]
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut leaves = BTreeMap::new();
    flatten_into(value, String::new(), &mut leaves);
    leaves
}

fn flatten_into(value: &Value, prefix: String, leaves: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, path, leaves);
            }
        }
        leaf => {
            leaves.insert(prefix, leaf.clone());
        }
    }
}

/// Render results as flattened CSV.
///
/// # Errors
///
/// Returns `CounterError::Json` if a record cannot be converted to JSON.
pub fn to_csv(summaries: &BTreeMap<String, GlossSummary>) -> Result<String, CounterError> {
    let mut rows = Vec::with_capacity(summaries.len());
    let mut columns = BTreeSet::new();
    for (gloss, summary) in summaries {
        let leaves = flatten(&serde_json::to_value(summary)?);
        columns.extend(leaves.keys().cloned());
        rows.push((gloss, leaves));
    }

    let mut out = String::new();
    let header: Vec<&str> = std::iter::once(GLOSS_COLUMN)
        .chain(columns.iter().map(String::as_str))
        .collect();
    push_record(&mut out, header.iter().copied());

    for (gloss, leaves) in &rows {
        let cells: Vec<String> = std::iter::once((*gloss).clone())
            .chain(columns.iter().map(|c| leaves.get(c).map(cell).unwrap_or_default()))
            .collect();
        push_record(&mut out, cells.iter().map(String::as_str));
    }
    Ok(out)
}

/// Write results as CSV to `path`.
///
/// # Errors
///
/// Returns `CounterError` if rendering or writing fails.
pub fn write_csv(summaries: &BTreeMap<String, GlossSummary>, path: &Path) -> Result<(), CounterError> {
    std::fs::write(path, to_csv(summaries)?)?;
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn push_record<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, value) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if value.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&value.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::summary::Breakdown;

    fn summaries() -> BTreeMap<String, GlossSummary> {
        let mut tree = GlossSummary {
            frequency: 4,
            number_of_signers: 3,
            ..GlossSummary::default()
        };
        tree.per_region.insert(
            "North".into(),
            Breakdown {
                frequency: 4,
                number_of_signers: 2,
            },
        );
        let house = GlossSummary {
            frequency: 1,
            number_of_signers: 1,
            ..GlossSummary::default()
        };
        BTreeMap::from([("TREE".to_string(), tree), ("HOUSE, BIG".to_string(), house)])
    }

    #[test]
    fn csv_header_is_gloss_then_sorted_leaf_paths() {
        let csv = to_csv(&summaries()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "gloss,frequenciesPerRegion.North.frequency,\
             frequenciesPerRegion.North.numberOfSigners,frequency,numberOfSigners"
        );
    }

    #[test]
    fn csv_quotes_and_leaves_missing_cells_empty() {
        let csv = to_csv(&summaries()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "\"HOUSE, BIG\",,,1,1");
        assert_eq!(lines[2], "TREE,4,2,4,3");
    }

    #[test]
    fn flatten_joins_nested_keys() {
        let leaves = flatten(&serde_json::json!({"a": {"b": 1, "c": {"d": "x"}}, "e": true}));
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves["a.c.d"], "x");
        assert_eq!(leaves["e"], true);
    }

    #[test]
    fn write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&summaries(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("gloss,"));
    }
}
