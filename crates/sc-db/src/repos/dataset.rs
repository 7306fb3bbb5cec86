//! Dataset repository.

use sc_core::entities::Dataset;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, is_unique_violation};
use crate::service::CorpusService;

fn row_to_dataset(row: &libsql::Row) -> Result<Dataset, DatabaseError> {
    Ok(Dataset {
        id: row.get::<i64>(0)?,
        acronym: row.get::<String>(1)?,
        default_language: row.get::<String>(2)?,
    })
}

impl CorpusService {
    pub async fn create_dataset(
        &self,
        acronym: &str,
        default_language: &str,
    ) -> Result<Dataset, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO datasets (acronym, default_language) VALUES (?1, ?2)",
                libsql::params![acronym, default_language],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::AlreadyExists {
                        entity: "dataset",
                        key: acronym.to_string(),
                    }
                } else {
                    e.into()
                }
            })?;

        Ok(Dataset {
            id: self.conn().last_insert_rowid(),
            acronym: acronym.to_string(),
            default_language: default_language.to_string(),
        })
    }

    pub async fn get_dataset(&self, id: i64) -> Result<Option<Dataset>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, acronym, default_language FROM datasets WHERE id = ?1",
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_dataset).transpose()
    }

    pub async fn get_dataset_by_acronym(
        &self,
        acronym: &str,
    ) -> Result<Option<Dataset>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, acronym, default_language FROM datasets WHERE acronym = ?1",
                [acronym],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_dataset).transpose()
    }

    pub async fn list_datasets(&self) -> Result<Vec<Dataset>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                "SELECT id, acronym, default_language FROM datasets ORDER BY acronym",
                (),
            )
            .await?;
        collect_rows(rows, row_to_dataset).await
    }
}
