//! Gloss repository: the dictionary lookup side of the pipeline.
//!
//! Annotation text matching ignores ASCII case and is scoped to a dataset and
//! one language.

use sc_core::entities::{Gloss, GlossAnnotation};

use crate::error::DatabaseError;
use crate::helpers::collect_rows;
use crate::service::CorpusService;

const GLOSS_COLUMNS: &str = "g.id, g.dataset_id, g.lemma_id, g.tok_no, g.tok_no_sgnr";

fn row_to_gloss(row: &libsql::Row) -> Result<Gloss, DatabaseError> {
    Ok(Gloss {
        id: row.get::<i64>(0)?,
        dataset_id: row.get::<Option<i64>>(1)?,
        lemma_id: row.get::<Option<i64>>(2)?,
        tok_no: row.get::<i64>(3)?,
        tok_no_sgnr: row.get::<i64>(4)?,
    })
}

fn row_to_annotation(row: &libsql::Row) -> Result<GlossAnnotation, DatabaseError> {
    Ok(GlossAnnotation {
        gloss_id: row.get::<i64>(0)?,
        language: row.get::<String>(1)?,
        text: row.get::<String>(2)?,
    })
}

impl CorpusService {
    pub async fn create_gloss(
        &self,
        dataset_id: Option<i64>,
        lemma_id: Option<i64>,
    ) -> Result<Gloss, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO glosses (dataset_id, lemma_id) VALUES (?1, ?2)",
                libsql::params![dataset_id, lemma_id],
            )
            .await?;
        Ok(Gloss {
            id: self.conn().last_insert_rowid(),
            dataset_id,
            lemma_id,
            tok_no: 0,
            tok_no_sgnr: 0,
        })
    }

    /// Set (or replace) the gloss's annotation text in `language`.
    pub async fn set_gloss_annotation(
        &self,
        gloss_id: i64,
        language: &str,
        text: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO gloss_annotations (gloss_id, language, text) VALUES (?1, ?2, ?3)
                 ON CONFLICT(gloss_id, language) DO UPDATE SET text = excluded.text",
                libsql::params![gloss_id, language, text],
            )
            .await?;
        Ok(())
    }

    pub async fn get_gloss(&self, id: i64) -> Result<Option<Gloss>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {GLOSS_COLUMNS} FROM glosses g WHERE g.id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_gloss).transpose()
    }

    pub async fn gloss_annotations(
        &self,
        gloss_id: i64,
    ) -> Result<Vec<GlossAnnotation>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                "SELECT gloss_id, language, text FROM gloss_annotations
                 WHERE gloss_id = ?1 ORDER BY language",
                [gloss_id],
            )
            .await?;
        collect_rows(rows, row_to_annotation).await
    }

    /// Glosses of `dataset_id` whose `language` annotation equals `text`,
    /// ignoring ASCII case. Ordered by gloss id.
    pub async fn find_glosses_by_annotation(
        &self,
        dataset_id: i64,
        language: &str,
        text: &str,
    ) -> Result<Vec<Gloss>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {GLOSS_COLUMNS} FROM glosses g
                     JOIN gloss_annotations ga ON ga.gloss_id = g.id
                     WHERE g.dataset_id = ?1 AND ga.language = ?2
                       AND ga.text = ?3 COLLATE NOCASE
                     ORDER BY g.id"
                ),
                libsql::params![dataset_id, language, text],
            )
            .await?;
        collect_rows(rows, row_to_gloss).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{seed_dataset, seed_gloss, test_service};

    #[tokio::test]
    async fn get_gloss_returns_none_for_unknown_id() {
        let svc = test_service().await;
        assert_eq!(svc.get_gloss(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn annotation_lookup_ignores_case() {
        let svc = test_service().await;
        let ngt = seed_dataset(&svc).await;
        let gloss = seed_gloss(&svc, &ngt, "HUIS").await;

        let found = svc.find_glosses_by_annotation(ngt.id, "nl", "huis").await.unwrap();
        assert_eq!(found, vec![gloss]);
    }

    #[tokio::test]
    async fn annotation_lookup_is_scoped_to_dataset_and_language() {
        let svc = test_service().await;
        let ngt = seed_dataset(&svc).await;
        let bsl = svc.create_dataset("BSL", "en").await.unwrap();
        let gloss = seed_gloss(&svc, &bsl, "HOUSE").await;
        svc.set_gloss_annotation(gloss.id, "nl", "HUIS").await.unwrap();

        assert!(svc.find_glosses_by_annotation(ngt.id, "en", "HOUSE").await.unwrap().is_empty());
        assert!(svc.find_glosses_by_annotation(bsl.id, "de", "HOUSE").await.unwrap().is_empty());
        assert_eq!(svc.find_glosses_by_annotation(bsl.id, "nl", "huis").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_annotation_replaces_text() {
        let svc = test_service().await;
        let ngt = seed_dataset(&svc).await;
        let gloss = seed_gloss(&svc, &ngt, "HUIS").await;
        svc.set_gloss_annotation(gloss.id, "nl", "HUIS-A").await.unwrap();

        let annotations = svc.gloss_annotations(gloss.id).await.unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].text, "HUIS-A");
    }

    #[tokio::test]
    async fn unlinked_gloss_roundtrips_nulls() {
        let svc = test_service().await;
        let created = svc.create_gloss(None, None).await.unwrap();
        let fetched = svc.get_gloss(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(!fetched.is_linked());
    }
}
