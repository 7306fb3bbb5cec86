//! Speaker import from participant metadata.

use sc_core::corpus_speaker_identifier;
use sc_core::entities::{Dataset, SpeakerAttributes};
use sc_db::CorpusService;
use sc_db::error::DatabaseError;
use sc_parser::{MetadataRow, MetadataTable};
use serde::Serialize;

pub const AGE_FIELD: &str = "Age";
pub const GENDER_FIELD: &str = "Gender";
pub const HANDEDNESS_FIELD: &str = "Handedness";

/// Speakers written by [`import_speakers`] and rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerImport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub errors: Vec<String>,
}

/// Speaker attributes from one metadata row.
///
/// # Errors
///
/// Returns a message when the age is present but not an integer.
pub fn speaker_attributes(row: &MetadataRow) -> Result<SpeakerAttributes, String> {
    let age = row
        .field(AGE_FIELD)
        .map(|age| {
            age.parse::<i64>()
                .map_err(|_| format!("{}: age '{age}' is not an integer", row.participant))
        })
        .transpose()?;
    Ok(SpeakerAttributes {
        age,
        gender: row.field(GENDER_FIELD).map(String::from),
        handedness: row.field(HANDEDNESS_FIELD).map(String::from),
        location: row.region.clone(),
    })
}

/// Create or update one speaker per metadata row.
///
/// Rows the metadata loader rejected and rows with unusable attributes end up
/// in [`SpeakerImport::errors`].
///
/// # Errors
///
/// Returns `DatabaseError` if a write fails.
pub async fn import_speakers(
    service: &CorpusService,
    dataset: &Dataset,
    metadata: &MetadataTable,
) -> Result<SpeakerImport, DatabaseError> {
    let mut import = SpeakerImport {
        errors: metadata.errors().to_vec(),
        ..SpeakerImport::default()
    };

    for row in metadata.iter() {
        let attributes = match speaker_attributes(row) {
            Ok(attributes) => attributes,
            Err(error) => {
                import.errors.push(error);
                continue;
            }
        };
        let identifier = corpus_speaker_identifier(&row.participant, &dataset.acronym);
        let upsert = service.upsert_speaker(&identifier, &attributes).await?;
        if upsert.created {
            import.created.push(identifier);
        } else {
            import.updated.push(identifier);
        }
    }

    tracing::debug!(
        dataset = %dataset.acronym,
        created = import.created.len(),
        updated = import.updated.len(),
        errors = import.errors.len(),
        "sync: speakers imported"
    );
    Ok(import)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn table(text: &str) -> MetadataTable {
        MetadataTable::parse(text, "Metadata region")
    }

    #[test]
    fn attributes_map_known_columns() {
        let metadata = table("id\tMetadata region\tAge\tgender\tHandedness\tSchool\nS001\tNorth\t34\tf\tright\tA\n");
        let attributes = speaker_attributes(metadata.get("S001").unwrap()).unwrap();
        assert_eq!(
            attributes,
            SpeakerAttributes {
                age: Some(34),
                gender: Some("f".into()),
                handedness: Some("right".into()),
                location: Some("North".into()),
            }
        );
    }

    #[rstest]
    #[case("34", Some(34))]
    #[case(" 7 ", Some(7))]
    #[case("", None)]
    fn age_column_is_optional(#[case] age: &str, #[case] expected: Option<i64>) {
        let metadata = table(&format!("id\tAge\nS001\t{age}\n"));
        let attributes = speaker_attributes(metadata.get("S001").unwrap()).unwrap();
        assert_eq!(attributes.age, expected);
    }

    #[rstest]
    #[case("forty")]
    #[case("3.5")]
    fn non_integer_age_is_an_error(#[case] age: &str) {
        let metadata = table(&format!("id\tAge\nS001\t{age}\n"));
        let err = speaker_attributes(metadata.get("S001").unwrap()).unwrap_err();
        assert!(err.contains(age));
    }

    #[tokio::test]
    async fn import_creates_updates_and_collects_errors() {
        let service = CorpusService::new_local(":memory:").await.unwrap();
        let dataset = service.create_dataset("NGT", "nl").await.unwrap();

        let first = table("id\tMetadata region\tAge\nS001\tNorth\t30\nS002\tSouth\tx\nS003\n");
        let import = import_speakers(&service, &dataset, &first).await.unwrap();
        assert_eq!(import.created, ["S001_NGT"]);
        assert_eq!(import.errors.len(), 2);

        let second = table("id\tMetadata region\tAge\nS001\tWest\t31\n");
        let import = import_speakers(&service, &dataset, &second).await.unwrap();
        assert_eq!(import.updated, ["S001_NGT"]);

        let speaker = service.get_speaker("S001_NGT").await.unwrap().unwrap();
        assert_eq!(speaker.attributes.location.as_deref(), Some("West"));
        assert_eq!(speaker.attributes.age, Some(31));
    }
}
