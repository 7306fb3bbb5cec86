//! Frequency records and per-gloss roll-ups.
//!
//! Records are replaced per document in one transaction: every
//! `(speaker, gloss)` the run produced is upserted with its new count and every
//! other record of the document is deleted. Roll-ups are always recomputed
//! from the records, never adjusted incrementally.

use std::collections::BTreeSet;

use sc_core::entities::{FrequencyRecord, Gloss};

use crate::error::DatabaseError;
use crate::helpers::collect_rows;
use crate::service::CorpusService;

const RECORD_COLUMNS: &str = "id, speaker_id, document_id, gloss_id, frequency";

fn row_to_record(row: &libsql::Row) -> Result<FrequencyRecord, DatabaseError> {
    Ok(FrequencyRecord {
        id: row.get::<i64>(0)?,
        speaker_id: row.get::<i64>(1)?,
        document_id: row.get::<i64>(2)?,
        gloss_id: row.get::<i64>(3)?,
        frequency: row.get::<i64>(4)?,
    })
}

/// One count to store for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyRow {
    pub speaker_id: i64,
    pub gloss_id: i64,
    pub frequency: i64,
}

/// Make `rows` the complete set of records for `document_id` on `conn`,
/// which is expected to be inside a transaction.
///
/// Returns every gloss whose records changed (written or pruned), sorted.
pub(crate) async fn write_records(
    conn: &libsql::Connection,
    document_id: i64,
    rows: &[FrequencyRow],
) -> Result<Vec<i64>, DatabaseError> {
    let existing = conn
        .query(
            "SELECT id, speaker_id, gloss_id FROM frequency_records WHERE document_id = ?1",
            [document_id],
        )
        .await?;
    let existing = collect_rows(existing, |row| {
        Ok((row.get::<i64>(0)?, row.get::<i64>(1)?, row.get::<i64>(2)?))
    })
    .await?;

    let keep: BTreeSet<(i64, i64)> = rows.iter().map(|r| (r.speaker_id, r.gloss_id)).collect();
    let mut touched: BTreeSet<i64> = rows.iter().map(|r| r.gloss_id).collect();

    for row in rows {
        conn.execute(
            "INSERT INTO frequency_records (speaker_id, document_id, gloss_id, frequency)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(speaker_id, document_id, gloss_id)
             DO UPDATE SET frequency = excluded.frequency",
            libsql::params![row.speaker_id, document_id, row.gloss_id, row.frequency],
        )
        .await?;
    }

    let mut pruned = 0_u64;
    for (id, speaker_id, gloss_id) in existing {
        if !keep.contains(&(speaker_id, gloss_id)) {
            pruned += conn
                .execute("DELETE FROM frequency_records WHERE id = ?1", [id])
                .await?;
            touched.insert(gloss_id);
        }
    }

    tracing::debug!(document_id, written = rows.len(), pruned, "db: document frequencies replaced");
    Ok(touched.into_iter().collect())
}

impl CorpusService {
    /// Make `rows` the complete set of records for `document_id`, in one
    /// transaction.
    ///
    /// Returns every gloss whose records changed (written or pruned), sorted.
    pub async fn replace_document_frequencies(
        &self,
        document_id: i64,
        rows: &[FrequencyRow],
    ) -> Result<Vec<i64>, DatabaseError> {
        let tx = self.conn().transaction().await?;
        let touched = write_records(&tx, document_id, rows).await?;
        tx.commit().await?;
        Ok(touched)
    }

    /// Recompute `tok_no` and `tok_no_sgnr` for one gloss from its records.
    pub async fn recompute_rollups(&self, gloss_id: i64) -> Result<Gloss, DatabaseError> {
        let tx = self.conn().transaction().await?;
        let changed = tx
            .execute(
                "UPDATE glosses SET
                     tok_no = (SELECT COALESCE(SUM(frequency), 0) FROM frequency_records WHERE gloss_id = ?1),
                     tok_no_sgnr = (SELECT COUNT(DISTINCT speaker_id) FROM frequency_records WHERE gloss_id = ?1)
                 WHERE id = ?1",
                [gloss_id],
            )
            .await?;
        if changed == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NoResult);
        }
        tx.commit().await?;

        self.get_gloss(gloss_id).await?.ok_or(DatabaseError::NoResult)
    }

    pub async fn document_frequencies(
        &self,
        document_id: i64,
    ) -> Result<Vec<FrequencyRecord>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM frequency_records
                     WHERE document_id = ?1 ORDER BY speaker_id, gloss_id"
                ),
                [document_id],
            )
            .await?;
        collect_rows(rows, row_to_record).await
    }

    pub async fn gloss_frequencies(&self, gloss_id: i64) -> Result<Vec<FrequencyRecord>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM frequency_records
                     WHERE gloss_id = ?1 ORDER BY document_id, speaker_id"
                ),
                [gloss_id],
            )
            .await?;
        collect_rows(rows, row_to_record).await
    }

    /// Glosses whose stored roll-ups disagree with their records.
    pub async fn stale_rollups(&self) -> Result<Vec<i64>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                "SELECT g.id FROM glosses g
                 LEFT JOIN (
                     SELECT gloss_id, SUM(frequency) AS total, COUNT(DISTINCT speaker_id) AS speakers
                     FROM frequency_records GROUP BY gloss_id
                 ) r ON r.gloss_id = g.id
                 WHERE g.tok_no != COALESCE(r.total, 0)
                    OR g.tok_no_sgnr != COALESCE(r.speakers, 0)
                 ORDER BY g.id",
                (),
            )
            .await?;
        collect_rows(rows, |row| Ok(row.get::<i64>(0)?)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use sc_core::entities::SpeakerAttributes;

    use super::FrequencyRow;
    use crate::error::DatabaseError;
    use crate::service::CorpusService;
    use crate::test_support::helpers::{seed_dataset, seed_gloss, test_service};

    struct Fixture {
        svc: CorpusService,
        doc: i64,
        speaker: i64,
        other_speaker: i64,
        tree: i64,
        house: i64,
    }

    async fn fixture() -> Fixture {
        let svc = test_service().await;
        let ngt = seed_dataset(&svc).await;
        let corpus = svc.get_or_create_corpus(&ngt).await.unwrap();
        let doc = svc.create_document(corpus.id, "doc1", Utc::now()).await.unwrap().id;
        let speaker = svc
            .upsert_speaker("S001_NGT", &SpeakerAttributes::default())
            .await
            .unwrap()
            .speaker
            .id;
        let other_speaker = svc
            .upsert_speaker("S002_NGT", &SpeakerAttributes::default())
            .await
            .unwrap()
            .speaker
            .id;
        let tree = seed_gloss(&svc, &ngt, "BOOM").await.id;
        let house = seed_gloss(&svc, &ngt, "HUIS").await.id;
        Fixture {
            svc,
            doc,
            speaker,
            other_speaker,
            tree,
            house,
        }
    }

    fn row(speaker_id: i64, gloss_id: i64, frequency: i64) -> FrequencyRow {
        FrequencyRow {
            speaker_id,
            gloss_id,
            frequency,
        }
    }

    #[tokio::test]
    async fn replacing_twice_overwrites_instead_of_duplicating() {
        let f = fixture().await;
        let rows = [row(f.speaker, f.tree, 3)];
        f.svc.replace_document_frequencies(f.doc, &rows).await.unwrap();
        f.svc.replace_document_frequencies(f.doc, &rows).await.unwrap();

        let records = f.svc.document_frequencies(f.doc).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frequency, 3);

        let gloss = f.svc.recompute_rollups(f.tree).await.unwrap();
        assert_eq!((gloss.tok_no, gloss.tok_no_sgnr), (3, 1));
    }

    #[tokio::test]
    async fn stale_records_are_pruned_and_reported() {
        let f = fixture().await;
        f.svc
            .replace_document_frequencies(f.doc, &[row(f.speaker, f.tree, 2), row(f.speaker, f.house, 1)])
            .await
            .unwrap();

        let touched = f
            .svc
            .replace_document_frequencies(f.doc, &[row(f.speaker, f.tree, 5)])
            .await
            .unwrap();
        let mut expected = vec![f.tree, f.house];
        expected.sort_unstable();
        assert_eq!(touched, expected);
        assert!(f.svc.gloss_frequencies(f.house).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rollups_sum_frequencies_and_count_distinct_speakers() {
        let f = fixture().await;
        f.svc
            .replace_document_frequencies(
                f.doc,
                &[row(f.speaker, f.tree, 2), row(f.other_speaker, f.tree, 4)],
            )
            .await
            .unwrap();

        assert_eq!(f.svc.stale_rollups().await.unwrap(), vec![f.tree]);
        let gloss = f.svc.recompute_rollups(f.tree).await.unwrap();
        assert_eq!((gloss.tok_no, gloss.tok_no_sgnr), (6, 2));
        assert!(f.svc.stale_rollups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recompute_unknown_gloss_is_no_result() {
        let f = fixture().await;
        assert!(matches!(
            f.svc.recompute_rollups(9999).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
