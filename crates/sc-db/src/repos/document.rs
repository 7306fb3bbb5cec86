//! Document repository.
//!
//! A document is identified within its corpus by the annotation file's
//! basename. Its `creation_time` is the file time at the last (re)stamp and
//! decides whether the file needs reprocessing.

use chrono::{DateTime, Utc};
use sc_core::entities::Document;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, parse_datetime};
use crate::repos::frequency::{FrequencyRow, write_records};
use crate::service::CorpusService;

const DOCUMENT_COLUMNS: &str = "id, corpus_id, identifier, creation_time";

fn row_to_document(row: &libsql::Row) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: row.get::<i64>(0)?,
        corpus_id: row.get::<i64>(1)?,
        identifier: row.get::<String>(2)?,
        creation_time: parse_datetime(&row.get::<String>(3)?)?,
    })
}

/// What [`CorpusService::delete_document`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRemoval {
    pub records_deleted: u64,
    /// Glosses whose roll-ups must be recomputed.
    pub affected_glosses: Vec<i64>,
}

/// What [`CorpusService::apply_document`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDocument {
    pub document: Document,
    /// Glosses whose records changed; their roll-ups must be recomputed.
    pub affected_glosses: Vec<i64>,
}

impl CorpusService {
    pub async fn get_document(
        &self,
        corpus_id: i64,
        identifier: &str,
    ) -> Result<Option<Document>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents
                     WHERE corpus_id = ?1 AND identifier = ?2"
                ),
                libsql::params![corpus_id, identifier],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_document).transpose()
    }

    pub async fn create_document(
        &self,
        corpus_id: i64,
        identifier: &str,
        creation_time: DateTime<Utc>,
    ) -> Result<Document, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO documents (corpus_id, identifier, creation_time) VALUES (?1, ?2, ?3)",
                libsql::params![corpus_id, identifier, creation_time.to_rfc3339()],
            )
            .await?;
        Ok(Document {
            id: self.conn().last_insert_rowid(),
            corpus_id,
            identifier: identifier.to_string(),
            creation_time,
        })
    }

    /// Re-stamp a document with a new file time.
    pub async fn set_document_time(
        &self,
        document_id: i64,
        creation_time: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE documents SET creation_time = ?2 WHERE id = ?1",
                libsql::params![document_id, creation_time.to_rfc3339()],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Stamp a document with `creation_time` and make `rows` its complete set
    /// of records, in one transaction.
    ///
    /// `existing` names the document to re-stamp; `None` creates
    /// `identifier` in `corpus_id`. On error nothing is written, so the file
    /// still looks changed to the next sync.
    pub async fn apply_document(
        &self,
        corpus_id: i64,
        identifier: &str,
        existing: Option<i64>,
        creation_time: DateTime<Utc>,
        rows: &[FrequencyRow],
    ) -> Result<AppliedDocument, DatabaseError> {
        let tx = self.conn().transaction().await?;
        let stamp = creation_time.to_rfc3339();
        let id = match existing {
            Some(id) => {
                let changed = tx
                    .execute(
                        "UPDATE documents SET creation_time = ?2 WHERE id = ?1",
                        libsql::params![id, stamp],
                    )
                    .await?;
                if changed == 0 {
                    tx.rollback().await?;
                    return Err(DatabaseError::NoResult);
                }
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO documents (corpus_id, identifier, creation_time) VALUES (?1, ?2, ?3)",
                    libsql::params![corpus_id, identifier, stamp],
                )
                .await?;
                tx.last_insert_rowid()
            }
        };
        let affected_glosses = write_records(&tx, id, rows).await?;
        tx.commit().await?;

        Ok(AppliedDocument {
            document: Document {
                id,
                corpus_id,
                identifier: identifier.to_string(),
                creation_time,
            },
            affected_glosses,
        })
    }

    pub async fn list_documents(&self, corpus_id: i64) -> Result<Vec<Document>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents
                     WHERE corpus_id = ?1 ORDER BY identifier"
                ),
                [corpus_id],
            )
            .await?;
        collect_rows(rows, row_to_document).await
    }

    /// Delete a document and its frequency records in one transaction.
    ///
    /// Roll-ups are not touched; recompute them for
    /// [`DocumentRemoval::affected_glosses`].
    pub async fn delete_document(&self, document_id: i64) -> Result<DocumentRemoval, DatabaseError> {
        let tx = self.conn().transaction().await?;

        let rows = tx
            .query(
                "SELECT DISTINCT gloss_id FROM frequency_records WHERE document_id = ?1 ORDER BY gloss_id",
                [document_id],
            )
            .await?;
        let affected_glosses = collect_rows(rows, |row| Ok(row.get::<i64>(0)?)).await?;

        let records_deleted = tx
            .execute(
                "DELETE FROM frequency_records WHERE document_id = ?1",
                [document_id],
            )
            .await?;
        let removed = tx
            .execute("DELETE FROM documents WHERE id = ?1", [document_id])
            .await?;
        if removed == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NoResult);
        }
        tx.commit().await?;

        Ok(DocumentRemoval {
            records_deleted,
            affected_glosses,
        })
    }
}
