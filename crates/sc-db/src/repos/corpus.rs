//! Corpus repository. One corpus per dataset, named after its acronym.

use sc_core::entities::{Corpus, Dataset};

use crate::error::DatabaseError;
use crate::service::CorpusService;

fn row_to_corpus(row: &libsql::Row) -> Result<Corpus, DatabaseError> {
    Ok(Corpus {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        dataset_id: row.get::<i64>(2)?,
    })
}

impl CorpusService {
    pub async fn get_corpus_for_dataset(
        &self,
        dataset_id: i64,
    ) -> Result<Option<Corpus>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, dataset_id FROM corpora WHERE dataset_id = ?1",
                [dataset_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_corpus).transpose()
    }

    pub async fn get_or_create_corpus(&self, dataset: &Dataset) -> Result<Corpus, DatabaseError> {
        if let Some(corpus) = self.get_corpus_for_dataset(dataset.id).await? {
            return Ok(corpus);
        }
        self.conn()
            .execute(
                "INSERT INTO corpora (name, dataset_id) VALUES (?1, ?2)",
                libsql::params![dataset.acronym.as_str(), dataset.id],
            )
            .await?;
        tracing::debug!(corpus = %dataset.acronym, "db: corpus created");
        Ok(Corpus {
            id: self.conn().last_insert_rowid(),
            name: dataset.acronym.clone(),
            dataset_id: dataset.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{seed_dataset, test_service};

    #[tokio::test]
    async fn get_or_create_is_stable() {
        let svc = test_service().await;
        let ngt = seed_dataset(&svc).await;

        assert_eq!(svc.get_corpus_for_dataset(ngt.id).await.unwrap(), None);
        let first = svc.get_or_create_corpus(&ngt).await.unwrap();
        let second = svc.get_or_create_corpus(&ngt).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name, "NGT");
    }
}
