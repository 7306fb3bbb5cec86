//! Tab-separated participant metadata.
//!
//! The first line is a header. The first column holds the participant id;
//! one configurable column holds the region; every other non-empty cell
//! becomes a free-form `field name -> value` entry.
//!
//! Loading is best-effort: malformed rows are recorded in
//! [`MetadataTable::errors`] and skipped.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ParserError;

/// Metadata for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRow {
    pub participant: String,
    pub region: Option<String>,
    /// Remaining non-empty columns keyed by header name.
    pub fields: BTreeMap<String, String>,
}

impl MetadataRow {
    /// Field value by header name, ignoring ASCII case.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: BTreeMap<String, MetadataRow>,
    errors: Vec<String>,
}

impl MetadataTable {
    /// An empty table. Aggregation against it records no region or field
    /// breakdowns.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse tab-separated text. `region_column` names the header of the
    /// region column.
    #[must_use]
    pub fn parse(text: &str, region_column: &str) -> Self {
        let mut table = Self::default();
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return table;
        };
        table.columns = header.split('\t').map(|c| c.trim().to_string()).collect();
        let region_index = table.columns.iter().position(|c| c == region_column);
        if region_index.is_none() {
            tracing::debug!(region_column, "metadata: region column not present");
        }

        for (line_no, line) in lines {
            let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
            if cells.len() != table.columns.len() {
                table.errors.push(format!(
                    "line {line_no}: expected {} columns, found {}",
                    table.columns.len(),
                    cells.len()
                ));
                continue;
            }

            let participant = cells[0];
            if participant.is_empty() {
                table
                    .errors
                    .push(format!("line {line_no}: empty participant id"));
                continue;
            }
            if table.rows.contains_key(participant) {
                table.errors.push(format!(
                    "line {line_no}: duplicate participant {participant}, keeping first row"
                ));
                continue;
            }

            let mut row = MetadataRow {
                participant: participant.to_string(),
                ..MetadataRow::default()
            };
            for (index, (column, cell)) in table.columns.iter().zip(&cells).enumerate().skip(1) {
                if cell.is_empty() {
                    continue;
                }
                if Some(index) == region_index {
                    row.region = Some((*cell).to_string());
                } else {
                    row.fields.insert(column.clone(), (*cell).to_string());
                }
            }
            table.rows.insert(row.participant.clone(), row);
        }

        for error in &table.errors {
            tracing::warn!(%error, "metadata: row skipped");
        }
        table
    }

    /// Read and parse a metadata file.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::Read` if the file cannot be read.
    pub fn read(path: &Path, region_column: &str) -> Result<Self, ParserError> {
        let text = std::fs::read_to_string(path).map_err(|source| ParserError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text, region_column))
    }

    #[must_use]
    pub fn get(&self, participant: &str) -> Option<&MetadataRow> {
        self.rows.get(participant)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by participant id.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataRow> {
        self.rows.values()
    }

    /// Header names, in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Diagnostics for skipped rows.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
