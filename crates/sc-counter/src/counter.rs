//! Counting engine: parse, build units, aggregate.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sc_config::CounterConfig;
use sc_parser::{ElanDocument, MetadataTable, TierPatterns};

use crate::aggregate::FrequencyTables;
use crate::error::CounterError;
use crate::summary::{GlossSummary, summarize};
use crate::units::participant_units;

/// Parameters of one counting run.
#[derive(Debug, Clone)]
pub struct CounterOptions {
    pub minimum_overlap: u64,
    pub patterns: TierPatterns,
}

impl CounterOptions {
    /// Compile options from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CounterError::Parser` if a tier pattern is not a valid regex.
    pub fn from_config(config: &CounterConfig) -> Result<Self, CounterError> {
        Ok(Self {
            minimum_overlap: config.minimum_overlap,
            patterns: TierPatterns::new(
                &config.gloss_tier_pattern,
                &config.left_hand_pattern,
                &config.right_hand_pattern,
            )?,
        })
    }
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            minimum_overlap: CounterConfig::default().minimum_overlap,
            patterns: TierPatterns::default(),
        }
    }
}

/// A file left out of a multi-file count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a standalone count over many files.
#[derive(Debug, Clone, Default)]
pub struct CountRun {
    pub summaries: BTreeMap<String, GlossSummary>,
    pub review: Vec<String>,
    /// Files that could not be parsed, in input order.
    pub skipped: Vec<SkippedFile>,
}

/// Runs the counting pipeline against a fixed metadata table.
#[derive(Debug, Clone)]
pub struct SignCounter {
    options: CounterOptions,
    metadata: MetadataTable,
}

impl SignCounter {
    #[must_use]
    pub const fn new(options: CounterOptions, metadata: MetadataTable) -> Self {
        Self { options, metadata }
    }

    #[must_use]
    pub const fn options(&self) -> &CounterOptions {
        &self.options
    }

    #[must_use]
    pub const fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// Tables for one parsed document.
    #[must_use]
    pub fn count_document(&self, document: &ElanDocument) -> FrequencyTables {
        let mut tables = FrequencyTables::new();

        let two_handed = document.two_handed_count();
        if two_handed > 1 {
            tracing::warn!(
                document = %document.identifier,
                two_handed,
                "counter: document has more than one two-handed participant"
            );
            tables.flag_for_review(format!(
                "{}: {two_handed} two-handed participants, each merged independently",
                document.identifier
            ));
        }

        for participant in &document.participants {
            let units = participant_units(participant.clone(), self.options.minimum_overlap);
            tables.add_units(&units, &document.identifier, &self.metadata);
        }

        tracing::debug!(
            document = %document.identifier,
            glosses = tables.len(),
            skipped = document.skipped.len(),
            "counter: document counted"
        );
        tables
    }

    /// Parse and count one file.
    ///
    /// # Errors
    ///
    /// Returns `CounterError::Parse` if the document cannot be parsed.
    pub fn count_file(&self, path: &Path) -> Result<FrequencyTables, CounterError> {
        let document =
            ElanDocument::read(path, &self.options.patterns).map_err(|source| CounterError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.count_document(&document))
    }

    /// Count a batch of files. The first unparsable file fails the batch.
    ///
    /// # Errors
    ///
    /// Returns `CounterError::Parse` for the first file that cannot be parsed.
    pub fn count_files(&self, paths: &[PathBuf]) -> Result<FrequencyTables, CounterError> {
        let mut tables = FrequencyTables::new();
        for path in paths {
            tables.merge(self.count_file(path)?);
        }
        Ok(tables)
    }

    /// Count every file that parses. Unparsable files are logged and
    /// returned alongside the tables of the rest.
    #[must_use]
    pub fn count_available(&self, paths: &[PathBuf]) -> (FrequencyTables, Vec<SkippedFile>) {
        let mut tables = FrequencyTables::new();
        let mut skipped = Vec::new();
        for path in paths {
            match self.count_file(path) {
                Ok(counted) => tables.merge(counted),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "counter: file skipped");
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }
        (tables, skipped)
    }

    /// Expand inputs, count every file that parses, and summarize.
    ///
    /// # Errors
    ///
    /// Returns `CounterError` if inputs are missing or none are found.
    pub fn run(&self, inputs: &[PathBuf], extension: &str) -> Result<CountRun, CounterError> {
        let files = expand_inputs(inputs, extension)?;
        let (tables, skipped) = self.count_available(&files);
        let summaries = summarize(&tables);
        Ok(CountRun {
            summaries,
            review: tables.review,
            skipped,
        })
    }
}

/// Resolve command-line inputs to annotation files.
///
/// Files are taken as given. Directories are walked recursively, including
/// hidden and ignored entries, for files with `extension` (ASCII
/// case-insensitive). The result is sorted and deduplicated.
///
/// # Errors
///
/// Returns `CounterError::MissingInput` for a path that does not exist,
/// `CounterError::NoInputs` if nothing is found.
pub fn expand_inputs(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>, CounterError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let mut builder = WalkBuilder::new(input);
            builder.standard_filters(false);
            builder.hidden(false);
            for entry in builder.build() {
                let entry = entry?;
                let path = entry.path();
                let matches = entry.file_type().is_some_and(|ft| ft.is_file())
                    && path
                        .extension()
                        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
                if matches {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            return Err(CounterError::MissingInput(input.clone()));
        }
    }

    files.sort();
    files.dedup();
    if files.is_empty() {
        return Err(CounterError::NoInputs);
    }
    Ok(files)
}
