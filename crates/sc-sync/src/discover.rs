//! Corpus folder discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sc_config::CorpusConfig;
use sc_parser::document_identifier;

use crate::error::SyncError;

/// One annotation file in a corpus folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    /// Basename without extension; the document identifier.
    pub identifier: String,
    pub size: u64,
    /// Creation time, or modification time where the platform has none.
    pub created: DateTime<Utc>,
}

impl CorpusFile {
    /// Stat a file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be inspected.
    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let metadata = std::fs::metadata(path)?;
        let created = metadata.created().or_else(|_| metadata.modified())?;
        Ok(Self {
            path: path.to_path_buf(),
            identifier: document_identifier(path),
            size: metadata.len(),
            created: DateTime::<Utc>::from(created),
        })
    }
}

/// Files of a corpus folder, split by size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    /// Counted together in one batch.
    pub small: Vec<CorpusFile>,
    /// Counted one file per batch.
    pub large: Vec<CorpusFile>,
    /// Files sharing a document identifier with another file. None of them
    /// is counted.
    pub duplicates: Vec<CorpusFile>,
}

impl DiscoveredFiles {
    /// Files to count.
    pub fn iter(&self) -> impl Iterator<Item = &CorpusFile> {
        self.small.iter().chain(&self.large)
    }

    /// Every document identifier present in the folder, counted or not.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .chain(&self.duplicates)
            .map(|file| file.identifier.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.small.is_empty() && self.large.is_empty()
    }
}

/// List the annotation files directly inside `folder`, sorted by name.
///
/// Files of `config.large_file_threshold` bytes or more are large. Files
/// whose names differ only past the identifier (`doc3.eaf`, `doc3.EAF`) are
/// set aside as duplicates.
///
/// # Errors
///
/// Returns `SyncError::FolderNotFound` if `folder` is not a directory, or
/// `SyncError::Io` if it cannot be read.
pub fn discover_files(folder: &Path, config: &CorpusConfig) -> Result<DiscoveredFiles, SyncError> {
    if !folder.is_dir() {
        return Err(SyncError::FolderNotFound(folder.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && config.is_annotation_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut by_identifier: BTreeMap<String, Vec<CorpusFile>> = BTreeMap::new();
    for path in paths {
        let file = CorpusFile::from_path(&path)?;
        by_identifier.entry(file.identifier.clone()).or_default().push(file);
    }

    let mut discovered = DiscoveredFiles::default();
    for (identifier, mut files) in by_identifier {
        if files.len() > 1 {
            tracing::warn!(%identifier, files = files.len(), "sync: files share a document identifier");
            discovered.duplicates.append(&mut files);
            continue;
        }
        for file in files {
            if file.size >= config.large_file_threshold {
                discovered.large.push(file);
            } else {
                discovered.small.push(file);
            }
        }
    }

    tracing::debug!(
        folder = %folder.display(),
        small = discovered.small.len(),
        large = discovered.large.len(),
        duplicates = discovered.duplicates.len(),
        "sync: files discovered"
    );
    Ok(discovered)
}
