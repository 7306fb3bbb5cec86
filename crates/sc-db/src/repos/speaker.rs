//! Speaker repository.
//!
//! Speaker identifiers are corpus-scoped (`S001_NGT`); a dataset's speakers
//! are those whose identifier ends with `_<ACRONYM>`.

use sc_core::entities::{Speaker, SpeakerAttributes};

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, get_opt_string};
use crate::service::CorpusService;

const SPEAKER_COLUMNS: &str = "id, identifier, age, gender, handedness, location";

fn row_to_speaker(row: &libsql::Row) -> Result<Speaker, DatabaseError> {
    Ok(Speaker {
        id: row.get::<i64>(0)?,
        identifier: row.get::<String>(1)?,
        attributes: SpeakerAttributes {
            age: row.get::<Option<i64>>(2)?,
            gender: get_opt_string(row, 3)?,
            handedness: get_opt_string(row, 4)?,
            location: get_opt_string(row, 5)?,
        },
    })
}

/// Outcome of [`CorpusService::upsert_speaker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerUpsert {
    pub speaker: Speaker,
    pub created: bool,
}

impl CorpusService {
    pub async fn get_speaker(&self, identifier: &str) -> Result<Option<Speaker>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SPEAKER_COLUMNS} FROM speakers WHERE identifier = ?1"),
                [identifier],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_speaker).transpose()
    }

    /// Create the speaker or overwrite its attributes.
    pub async fn upsert_speaker(
        &self,
        identifier: &str,
        attributes: &SpeakerAttributes,
    ) -> Result<SpeakerUpsert, DatabaseError> {
        let existing = self.get_speaker(identifier).await?;
        let params = libsql::params![
            identifier,
            attributes.age,
            attributes.gender.as_deref(),
            attributes.handedness.as_deref(),
            attributes.location.as_deref()
        ];

        let (id, created) = if let Some(speaker) = existing {
            self.conn()
                .execute(
                    "UPDATE speakers SET age = ?2, gender = ?3, handedness = ?4, location = ?5
                     WHERE identifier = ?1",
                    params,
                )
                .await?;
            (speaker.id, false)
        } else {
            self.conn()
                .execute(
                    "INSERT INTO speakers (identifier, age, gender, handedness, location)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params,
                )
                .await?;
            (self.conn().last_insert_rowid(), true)
        };

        Ok(SpeakerUpsert {
            speaker: Speaker {
                id,
                identifier: identifier.to_string(),
                attributes: attributes.clone(),
            },
            created,
        })
    }

    /// Speakers whose identifier ends with `suffix` (case-sensitive), ordered
    /// by identifier.
    pub async fn list_speakers_with_suffix(
        &self,
        suffix: &str,
    ) -> Result<Vec<Speaker>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SPEAKER_COLUMNS} FROM speakers
                     WHERE length(identifier) >= length(?1)
                       AND substr(identifier, -length(?1)) = ?1
                     ORDER BY identifier"
                ),
                [suffix],
            )
            .await?;
        collect_rows(rows, row_to_speaker).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sc_core::entities::SpeakerAttributes;

    use crate::test_support::helpers::test_service;

    fn attributes(location: &str) -> SpeakerAttributes {
        SpeakerAttributes {
            age: Some(30),
            gender: Some("f".into()),
            handedness: None,
            location: Some(location.into()),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let svc = test_service().await;
        let first = svc.upsert_speaker("S001_NGT", &attributes("North")).await.unwrap();
        assert!(first.created);

        let second = svc.upsert_speaker("S001_NGT", &attributes("South")).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.speaker.id, first.speaker.id);

        let stored = svc.get_speaker("S001_NGT").await.unwrap().unwrap();
        assert_eq!(stored.attributes.location.as_deref(), Some("South"));
        assert_eq!(stored.attributes.handedness, None);
    }

    #[tokio::test]
    async fn suffix_match_is_exact_and_case_sensitive() {
        let svc = test_service().await;
        for identifier in ["S001_NGT", "S002_NGT", "S001_BSL", "S003_ngt", "S004XNGT"] {
            svc.upsert_speaker(identifier, &SpeakerAttributes::default())
                .await
                .unwrap();
        }
        let identifiers: Vec<String> = svc
            .list_speakers_with_suffix("_NGT")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.identifier)
            .collect();
        assert_eq!(identifiers, ["S001_NGT", "S002_NGT"]);
    }
}
