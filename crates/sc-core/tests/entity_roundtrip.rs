//! Serde roundtrip tests for entity types.

use chrono::Utc;
use pretty_assertions::assert_eq;
use sc_core::entities::*;
use sc_core::{Annotation, GlossUnit, Hand};

macro_rules! roundtrip {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );
        }
    };
}

roundtrip!(
    dataset_roundtrip,
    Dataset,
    Dataset {
        id: 1,
        acronym: "NGT".into(),
        default_language: "nl".into(),
    }
);

roundtrip!(
    gloss_roundtrip,
    Gloss,
    Gloss {
        id: 42,
        dataset_id: Some(1),
        lemma_id: None,
        tok_no: 12,
        tok_no_sgnr: 3,
    }
);

roundtrip!(
    document_roundtrip,
    Document,
    Document {
        id: 7,
        corpus_id: 1,
        identifier: "CNGT0001".into(),
        creation_time: Utc::now(),
    }
);

roundtrip!(
    speaker_roundtrip,
    Speaker,
    Speaker {
        id: 3,
        identifier: "S001_NGT".into(),
        attributes: SpeakerAttributes {
            age: Some(34),
            gender: Some("f".into()),
            handedness: None,
            location: Some("Amsterdam".into()),
        },
    }
);

roundtrip!(
    frequency_record_roundtrip,
    FrequencyRecord,
    FrequencyRecord {
        id: 1,
        speaker_id: 3,
        document_id: 7,
        gloss_id: 42,
        frequency: 5,
    }
);

roundtrip!(
    gloss_unit_roundtrip,
    GlossUnit,
    GlossUnit::single(Annotation {
        id: "a12".into(),
        begin: 120,
        end: 480,
        value: Some("HOUSE".into()),
        cve_ref: Some("cveid_42".into()),
        participant: "S001".into(),
        hand: Some(Hand::Left),
    })
);

#[test]
fn speaker_attributes_are_flattened() {
    let speaker = Speaker {
        id: 1,
        identifier: "S002_NGT".into(),
        attributes: SpeakerAttributes {
            location: Some("Groningen".into()),
            ..SpeakerAttributes::default()
        },
    };
    let json = serde_json::to_value(&speaker).unwrap();
    assert_eq!(json["location"], "Groningen");
    assert!(json.get("attributes").is_none());
}

#[test]
fn gloss_link_requires_dataset_and_lemma() {
    let gloss = Gloss {
        id: 1,
        dataset_id: Some(1),
        lemma_id: Some(2),
        tok_no: 0,
        tok_no_sgnr: 0,
    };
    assert!(gloss.is_linked());
    assert!(!Gloss {
        lemma_id: None,
        ..gloss.clone()
    }
    .is_linked());
    assert!(!Gloss {
        dataset_id: None,
        ..gloss
    }
    .is_linked());
}
