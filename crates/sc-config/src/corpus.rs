//! Corpus folder layout and batching configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_root() -> PathBuf {
    PathBuf::from("corpora")
}

fn default_extension() -> String {
    String::from("eaf")
}

fn default_metadata_file() -> String {
    String::from("metadata.tsv")
}

const fn default_large_file_threshold() -> u64 {
    5_000_000
}

const fn default_file_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Directory holding one sub-folder per dataset acronym.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Annotation file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Participant metadata file name inside each dataset folder.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Files larger than this many bytes are counted one at a time.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,

    /// Upper bound for counting one batch.
    #[serde(default = "default_file_timeout_secs")]
    pub file_timeout_secs: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            metadata_file: default_metadata_file(),
            large_file_threshold: default_large_file_threshold(),
            file_timeout_secs: default_file_timeout_secs(),
        }
    }
}

impl CorpusConfig {
    /// Folder holding the annotation files of a dataset.
    #[must_use]
    pub fn dataset_folder(&self, acronym: &str) -> PathBuf {
        self.root.join(acronym)
    }

    /// Metadata file of a dataset.
    #[must_use]
    pub fn metadata_path(&self, acronym: &str) -> PathBuf {
        self.dataset_folder(acronym).join(&self.metadata_file)
    }

    /// Whether `path` carries the configured annotation extension.
    #[must_use]
    pub fn is_annotation_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}
