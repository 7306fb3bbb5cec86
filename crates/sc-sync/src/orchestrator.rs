//! Corpus sync orchestration.
//!
//! A sync walks the dataset's corpus folder, counts new and changed files in
//! batches (all small files together, each large file alone), and applies a
//! batch only once its counting and speaker resolution have both succeeded.
//! Applying a document stamps it and replaces its frequency records in one
//! transaction. Roll-ups of the glosses a batch touched are recomputed as
//! soon as the batch is applied, one transaction per gloss, so an error in a
//! later batch leaves no stale roll-ups behind.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sc_config::{CorpusConfig, CounterConfig, SignConfig};
use sc_core::corpus_speaker_identifier;
use sc_core::entities::{Corpus, Dataset};
use sc_counter::{CounterOptions, FrequencyTables, SignCounter};
use sc_db::{AppliedDocument, CorpusService, FrequencyRow};
use sc_parser::{MetadataTable, document_identifier};

use crate::discover::{CorpusFile, discover_files};
use crate::error::SyncError;
use crate::report::SyncReport;
use crate::resolve::resolve_tokens;
use crate::speakers::speaker_attributes;

/// Observer for batch progress. All methods default to no-ops.
pub trait SyncProgress: Send + Sync {
    fn batches(&self, _total: usize) {}
    fn batch_finished(&self, _label: &str) {}
}

/// A [`SyncProgress`] that ignores everything.
pub struct NoProgress;

impl SyncProgress for NoProgress {}

/// Dataset-level state shared by every batch of one operation.
struct SyncTarget {
    dataset: Dataset,
    corpus: Corpus,
    /// Speaker ids by corpus-scoped identifier.
    speakers: BTreeMap<String, i64>,
    metadata: MetadataTable,
}

impl SyncTarget {
    /// An empty report that already carries the metadata table's row errors.
    fn report(&self, acronym: &str) -> SyncReport {
        let mut report = SyncReport::new(acronym);
        for error in self.metadata.errors() {
            report.metadata_error(error.clone());
        }
        report
    }
}

/// A file queued for counting, with the document it updates if known.
struct PendingFile {
    file: CorpusFile,
    document_id: Option<i64>,
}

pub struct CorpusSync<'a> {
    service: &'a CorpusService,
    counter: CounterConfig,
    corpus: CorpusConfig,
    progress: Box<dyn SyncProgress + 'a>,
}

impl<'a> CorpusSync<'a> {
    #[must_use]
    pub fn new(service: &'a CorpusService, config: &SignConfig) -> Self {
        Self {
            service,
            counter: config.counter.clone(),
            corpus: config.corpus.clone(),
            progress: Box::new(NoProgress),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: impl SyncProgress + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Bring the corpus of `acronym` in line with its folder.
    ///
    /// New files create documents; files newer than their document are
    /// reprocessed; with `refresh`, every file is. Documents whose file is
    /// gone are removed.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::NoSpeakers` before touching anything when the
    /// dataset has no speakers. Per-file and per-batch failures are reported
    /// in [`SyncReport::files_failed`] instead.
    pub async fn sync_corpus(&self, acronym: &str, refresh: bool) -> Result<SyncReport, SyncError> {
        let mut target = self.load_target(acronym).await?;
        let mut report = target.report(acronym);

        let folder = self.corpus.dataset_folder(acronym);
        let discovered = discover_files(&folder, &self.corpus)?;
        for file in &discovered.duplicates {
            let name = file
                .path
                .file_name()
                .map_or_else(|| file.identifier.clone(), |n| n.to_string_lossy().into_owned());
            report.fail(
                name,
                format!("another file maps to document identifier '{}'", file.identifier),
            );
        }

        let mut touched = BTreeSet::new();
        let present: BTreeSet<&str> = discovered.identifiers().collect();
        for document in self.service.list_documents(target.corpus.id).await? {
            if !present.contains(document.identifier.as_str()) {
                let removal = self.service.delete_document(document.id).await?;
                tracing::info!(document = %document.identifier, "sync: file gone, document removed");
                touched.extend(removal.affected_glosses);
                report.documents_removed.push(document.identifier);
            }
        }
        self.recompute(touched, &mut report).await?;

        let small = self.pending(&target, discovered.small, refresh, &mut report).await?;
        let large = self.pending(&target, discovered.large, refresh, &mut report).await?;

        let mut batches: Vec<Vec<PendingFile>> = Vec::new();
        if !small.is_empty() {
            batches.push(small);
        }
        batches.extend(large.into_iter().map(|file| vec![file]));
        self.progress.batches(batches.len());

        let counter = Arc::new(SignCounter::new(
            CounterOptions::from_config(&self.counter)?,
            target.metadata.clone(),
        ));
        for batch in batches {
            let label = batch_label(&batch);
            self.run_batch(&mut target, &counter, batch, &mut report).await?;
            self.progress.batch_finished(&label);
        }

        tracing::info!(
            dataset = acronym,
            created = report.documents_created.len(),
            updated = report.documents_updated.len(),
            removed = report.documents_removed.len(),
            failed = report.files_failed.len(),
            "sync: corpus synchronised"
        );
        Ok(report)
    }

    /// Reprocess one known document from `path`.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::DocumentNotFound` if the corpus has no document
    /// named after the file.
    pub async fn update_document(&self, acronym: &str, path: &Path) -> Result<SyncReport, SyncError> {
        let mut target = self.load_target(acronym).await?;
        let mut report = target.report(acronym);

        let identifier = document_identifier(path);
        let document = self
            .service
            .get_document(target.corpus.id, &identifier)
            .await?
            .ok_or_else(|| SyncError::DocumentNotFound {
                corpus: acronym.to_string(),
                identifier: identifier.clone(),
            })?;

        let pending = PendingFile {
            file: CorpusFile::from_path(path)?,
            document_id: Some(document.id),
        };
        let counter = Arc::new(SignCounter::new(
            CounterOptions::from_config(&self.counter)?,
            target.metadata.clone(),
        ));
        self.run_batch(&mut target, &counter, vec![pending], &mut report)
            .await?;
        Ok(report)
    }

    /// Remove one document and its records, then recompute the affected
    /// roll-ups.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::DocumentNotFound` if the corpus has no such document.
    pub async fn remove_document(&self, acronym: &str, identifier: &str) -> Result<SyncReport, SyncError> {
        let dataset = self.dataset(acronym).await?;
        let corpus = self.service.get_or_create_corpus(&dataset).await?;
        let mut report = SyncReport::new(acronym);

        let document = self
            .service
            .get_document(corpus.id, identifier)
            .await?
            .ok_or_else(|| SyncError::DocumentNotFound {
                corpus: acronym.to_string(),
                identifier: identifier.to_string(),
            })?;
        let removal = self.service.delete_document(document.id).await?;
        report.documents_removed.push(document.identifier);
        self.recompute(removal.affected_glosses.into_iter().collect(), &mut report)
            .await?;
        Ok(report)
    }

    async fn dataset(&self, acronym: &str) -> Result<Dataset, SyncError> {
        self.service
            .get_dataset_by_acronym(acronym)
            .await?
            .ok_or_else(|| SyncError::DatasetNotFound(acronym.to_string()))
    }

    async fn load_target(&self, acronym: &str) -> Result<SyncTarget, SyncError> {
        let dataset = self.dataset(acronym).await?;

        let suffix = corpus_speaker_identifier("", &dataset.acronym);
        let speakers: BTreeMap<String, i64> = self
            .service
            .list_speakers_with_suffix(&suffix)
            .await?
            .into_iter()
            .map(|s| (s.identifier, s.id))
            .collect();
        if speakers.is_empty() {
            return Err(SyncError::NoSpeakers(acronym.to_string()));
        }

        let corpus = self.service.get_or_create_corpus(&dataset).await?;
        let metadata = self.metadata(acronym)?;
        Ok(SyncTarget {
            dataset,
            corpus,
            speakers,
            metadata,
        })
    }

    fn metadata(&self, acronym: &str) -> Result<MetadataTable, SyncError> {
        let path = self.corpus.metadata_path(acronym);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "sync: no metadata file, counting without regions");
            return Ok(MetadataTable::empty());
        }
        Ok(MetadataTable::read(&path, &self.counter.region_column)?)
    }

    /// Files that need counting. Unchanged documents are only tallied.
    async fn pending(
        &self,
        target: &SyncTarget,
        files: Vec<CorpusFile>,
        refresh: bool,
        report: &mut SyncReport,
    ) -> Result<Vec<PendingFile>, SyncError> {
        let mut pending = Vec::new();
        for file in files {
            match self.service.get_document(target.corpus.id, &file.identifier).await? {
                None => pending.push(PendingFile {
                    file,
                    document_id: None,
                }),
                Some(document) if refresh || file.created > document.creation_time => {
                    pending.push(PendingFile {
                        file,
                        document_id: Some(document.id),
                    });
                }
                Some(_) => report.documents_unchanged += 1,
            }
        }
        Ok(pending)
    }

    /// Count a batch, resolve its speakers and glosses, apply it, and
    /// recompute the roll-ups it touched.
    ///
    /// Batch and per-document failures are recorded in the report. Only
    /// database errors outside a document's transaction are returned.
    async fn run_batch(
        &self,
        target: &mut SyncTarget,
        counter: &Arc<SignCounter>,
        batch: Vec<PendingFile>,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let paths: Vec<PathBuf> = batch.iter().map(|p| p.file.path.clone()).collect();
        let tables = match self.count(counter, paths).await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!(batch = %batch_label(&batch), error = %e, "sync: batch failed");
                for pending in &batch {
                    report.fail(&pending.file.identifier, e.to_string());
                }
                return Ok(());
            }
        };
        report.review.extend(tables.review.iter().cloned());

        let counts: Vec<(PendingFile, BTreeMap<String, BTreeMap<String, u64>>)> = batch
            .into_iter()
            .map(|pending| {
                let counts = tables.document_counts(&pending.file.identifier);
                (pending, counts)
            })
            .collect();

        let participants: BTreeSet<&String> = counts.iter().flat_map(|(_, c)| c.keys()).collect();
        let missing = self.resolve_speakers(target, participants, report).await?;
        if !missing.is_empty() {
            let e = SyncError::SpeakersNotFound(missing.clone());
            tracing::warn!(error = %e, "sync: batch skipped");
            report.speakers_not_found.extend(missing);
            for (pending, _) in &counts {
                report.fail(&pending.file.identifier, e.to_string());
            }
            return Ok(());
        }

        let resolved = resolve_tokens(self.service, &target.dataset, tables.glosses.keys()).await?;
        report.glosses_not_found.extend(resolved.not_found.iter().cloned());
        report
            .glosses_in_other_dataset
            .extend(resolved.other_dataset.iter().cloned());

        let mut touched = BTreeSet::new();
        for (pending, by_participant) in counts {
            match self
                .apply(target, &resolved.in_dataset, &pending, &by_participant)
                .await
            {
                Ok(applied) => {
                    let identifier = applied.document.identifier;
                    if pending.document_id.is_some() {
                        report.documents_updated.push(identifier);
                    } else {
                        report.documents_created.push(identifier);
                    }
                    touched.extend(applied.affected_glosses);
                }
                Err(e) => {
                    tracing::warn!(document = %pending.file.identifier, error = %e, "sync: document not applied");
                    report.fail(&pending.file.identifier, e.to_string());
                }
            }
        }
        self.recompute(touched, report).await
    }

    /// Stamp one document and write its records in a single transaction.
    async fn apply(
        &self,
        target: &SyncTarget,
        in_dataset: &BTreeMap<String, sc_core::entities::Gloss>,
        pending: &PendingFile,
        by_participant: &BTreeMap<String, BTreeMap<String, u64>>,
    ) -> Result<AppliedDocument, SyncError> {
        let rows = frequency_rows(target, in_dataset, by_participant)?;
        Ok(self
            .service
            .apply_document(
                target.corpus.id,
                &pending.file.identifier,
                pending.document_id,
                pending.file.created,
                &rows,
            )
            .await?)
    }

    /// Count in a blocking task bounded by the configured timeout.
    ///
    /// A blocking task cannot be cancelled. On timeout it is abandoned: it
    /// runs to completion in the background and its result is dropped.
    async fn count(
        &self,
        counter: &Arc<SignCounter>,
        paths: Vec<PathBuf>,
    ) -> Result<FrequencyTables, SyncError> {
        let secs = self.corpus.file_timeout_secs;
        let counter = Arc::clone(counter);
        let task = tokio::task::spawn_blocking(move || counter.count_files(&paths));
        match tokio::time::timeout(Duration::from_secs(secs), task).await {
            Ok(joined) => Ok(joined??),
            Err(_) => {
                tracing::warn!(timeout_secs = secs, "sync: counting timed out, blocking task abandoned");
                Err(SyncError::Timeout(secs))
            }
        }
    }

    /// Map participants to speaker ids, creating speakers from metadata rows
    /// where needed. Returns the identifiers that could not be resolved;
    /// unreadable rows also land in [`SyncReport::metadata_errors`].
    async fn resolve_speakers(
        &self,
        target: &mut SyncTarget,
        participants: BTreeSet<&String>,
        report: &mut SyncReport,
    ) -> Result<Vec<String>, SyncError> {
        let mut missing = Vec::new();
        for participant in participants {
            let identifier = corpus_speaker_identifier(participant, &target.dataset.acronym);
            if target.speakers.contains_key(&identifier) {
                continue;
            }
            let Some(row) = target.metadata.get(participant) else {
                missing.push(identifier);
                continue;
            };
            match speaker_attributes(row) {
                Ok(attributes) => {
                    let upsert = self.service.upsert_speaker(&identifier, &attributes).await?;
                    tracing::debug!(speaker = %identifier, "sync: speaker created from metadata");
                    target.speakers.insert(identifier.clone(), upsert.speaker.id);
                    report.speakers_created.push(identifier);
                }
                Err(error) => {
                    tracing::warn!(speaker = %identifier, %error, "sync: speaker metadata unreadable");
                    report.metadata_error(error);
                    missing.push(identifier);
                }
            }
        }
        Ok(missing)
    }

    async fn recompute(&self, glosses: BTreeSet<i64>, report: &mut SyncReport) -> Result<(), SyncError> {
        for gloss_id in glosses {
            self.service.recompute_rollups(gloss_id).await?;
            report.updated_glosses.insert(gloss_id);
        }
        Ok(())
    }
}

fn frequency_rows(
    target: &SyncTarget,
    in_dataset: &BTreeMap<String, sc_core::entities::Gloss>,
    by_participant: &BTreeMap<String, BTreeMap<String, u64>>,
) -> Result<Vec<FrequencyRow>, SyncError> {
    let mut rows = Vec::new();
    for (participant, glosses) in by_participant {
        let identifier = corpus_speaker_identifier(participant, &target.dataset.acronym);
        let Some(&speaker_id) = target.speakers.get(&identifier) else {
            return Err(SyncError::SpeakersNotFound(vec![identifier]));
        };

        // Distinct tokens may resolve to the same gloss.
        let mut per_gloss: BTreeMap<i64, u64> = BTreeMap::new();
        for (token, count) in glosses {
            if let Some(gloss) = in_dataset.get(token) {
                *per_gloss.entry(gloss.id).or_default() += count;
            }
        }
        for (gloss_id, count) in per_gloss {
            rows.push(FrequencyRow {
                speaker_id,
                gloss_id,
                frequency: i64::try_from(count).unwrap_or(i64::MAX),
            });
        }
    }
    Ok(rows)
}

fn batch_label(batch: &[PendingFile]) -> String {
    match batch {
        [single] => single.file.identifier.clone(),
        files => format!("{} files", files.len()),
    }
}
