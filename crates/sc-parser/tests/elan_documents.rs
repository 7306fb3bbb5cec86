use pretty_assertions::assert_eq;
use sc_core::Hand;
use sc_parser::{ElanDocument, ParserError, ParticipantLayout, TierPatterns, document_identifier};

const TWO_HANDED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ANNOTATION_DOCUMENT AUTHOR="" DATE="2020-01-01T00:00:00+01:00" FORMAT="3.0" VERSION="3.0">
  <HEADER MEDIA_FILE="" TIME_UNITS="milliseconds"/>
  <TIME_ORDER>
    <TIME_SLOT TIME_SLOT_ID="ts1" TIME_VALUE="0"/>
    <TIME_SLOT TIME_SLOT_ID="ts2" TIME_VALUE="100"/>
    <TIME_SLOT TIME_SLOT_ID="ts3" TIME_VALUE="120"/>
    <TIME_SLOT TIME_SLOT_ID="ts4" TIME_VALUE="200"/>
    <TIME_SLOT TIME_SLOT_ID="ts5"/>
  </TIME_ORDER>
  <TIER LINGUISTIC_TYPE_REF="gloss" PARTICIPANT="S001" TIER_ID="GlossR S001">
    <ANNOTATION>
      <ALIGNABLE_ANNOTATION ANNOTATION_ID="a1" TIME_SLOT_REF1="ts1" TIME_SLOT_REF2="ts2" CVE_REF="cve_12">
        <ANNOTATION_VALUE>HOUSE</ANNOTATION_VALUE>
      </ALIGNABLE_ANNOTATION>
    </ANNOTATION>
  </TIER>
  <TIER LINGUISTIC_TYPE_REF="gloss" PARTICIPANT="S001" TIER_ID="GlossL S001">
    <ANNOTATION>
      <ALIGNABLE_ANNOTATION ANNOTATION_ID="a2" TIME_SLOT_REF1="ts3" TIME_SLOT_REF2="ts4">
        <ANNOTATION_VALUE>TREE</ANNOTATION_VALUE>
      </ALIGNABLE_ANNOTATION>
    </ANNOTATION>
  </TIER>
  <TIER LINGUISTIC_TYPE_REF="translation" PARENT_REF="GlossR S001" PARTICIPANT="S001" TIER_ID="Translation S001"/>
  <TIER LINGUISTIC_TYPE_REF="Gloss" PARTICIPANT="S002" TIER_ID="Gloss S002">
    <ANNOTATION>
      <ALIGNABLE_ANNOTATION ANNOTATION_ID="a3" TIME_SLOT_REF1="ts1" TIME_SLOT_REF2="ts2">
        <ANNOTATION_VALUE></ANNOTATION_VALUE>
      </ALIGNABLE_ANNOTATION>
    </ANNOTATION>
  </TIER>
  <TIER LINGUISTIC_TYPE_REF="gloss" PARTICIPANT="S003" TIER_ID="GlossR S003"/>
  <TIER LINGUISTIC_TYPE_REF="gloss" PARTICIPANT="S003" TIER_ID="GlossR S003 bis"/>
  <TIER LINGUISTIC_TYPE_REF="mouthing" PARTICIPANT="S004" TIER_ID="Mouth S004"/>
</ANNOTATION_DOCUMENT>
"#;

#[test]
fn parses_participants_in_document_order() {
    let doc = ElanDocument::parse(TWO_HANDED, "CNGT0001", &TierPatterns::default()).unwrap();

    assert_eq!(doc.identifier, "CNGT0001");
    let names: Vec<&str> = doc.participants.iter().map(|p| p.participant.as_str()).collect();
    assert_eq!(names, ["S001", "S002"]);
    assert_eq!(doc.two_handed_count(), 1);

    match &doc.participants[0].layout {
        ParticipantLayout::TwoHanded { right, left } => {
            assert_eq!(right.len(), 1);
            assert_eq!(right[0].begin, 0);
            assert_eq!(right[0].end, 100);
            assert_eq!(right[0].cve_ref.as_deref(), Some("cve_12"));
            assert_eq!(right[0].hand, Some(Hand::Right));
            assert_eq!(left[0].gloss(), Some("TREE"));
            assert_eq!(left[0].begin, 120);
        }
        ParticipantLayout::OneHanded(_) => panic!("S001 should be two-handed"),
    }

    match &doc.participants[1].layout {
        ParticipantLayout::OneHanded(annotations) => {
            assert_eq!(annotations.len(), 1);
            assert_eq!(annotations[0].gloss(), None);
        }
        ParticipantLayout::TwoHanded { .. } => panic!("S002 should be one-handed"),
    }
}

#[test]
fn ambiguous_two_tier_participant_is_skipped() {
    let doc = ElanDocument::parse(TWO_HANDED, "CNGT0001", &TierPatterns::default()).unwrap();
    assert_eq!(doc.skipped.len(), 1);
    assert_eq!(doc.skipped[0].participant, "S003");
    assert_eq!(doc.skipped[0].tier_count, 2);
}

#[test]
fn reference_to_unaligned_slot_fails_the_document() {
    let xml = TWO_HANDED.replace(r#"TIME_SLOT_REF2="ts4""#, r#"TIME_SLOT_REF2="ts5""#);
    let err = ElanDocument::parse(&xml, "x", &TierPatterns::default()).unwrap_err();
    assert!(matches!(err, ParserError::MissingTimeSlot { ref slot, .. } if slot == "ts5"));
}

#[test]
fn non_integer_time_value_fails_the_document() {
    let xml = TWO_HANDED.replace(r#"TIME_VALUE="120""#, r#"TIME_VALUE="1.5""#);
    let err = ElanDocument::parse(&xml, "x", &TierPatterns::default()).unwrap_err();
    assert!(matches!(err, ParserError::InvalidTimeValue { .. }));
}

#[test]
fn malformed_xml_and_foreign_roots_are_rejected() {
    let patterns = TierPatterns::default();
    assert!(matches!(
        ElanDocument::parse("<ANNOTATION_DOCUMENT>", "x", &patterns),
        Err(ParserError::Xml(_))
    ));
    assert!(matches!(
        ElanDocument::parse("<html/>", "x", &patterns),
        Err(ParserError::NotElan(root)) if root == "html"
    ));
}

#[test]
fn participant_attribute_defaults_to_empty() {
    let xml = r#"<ANNOTATION_DOCUMENT>
  <TIME_ORDER><TIME_SLOT TIME_SLOT_ID="ts1" TIME_VALUE="10"/><TIME_SLOT TIME_SLOT_ID="ts2" TIME_VALUE="20"/></TIME_ORDER>
  <TIER LINGUISTIC_TYPE_REF="gloss" TIER_ID="Gloss">
    <ANNOTATION><ALIGNABLE_ANNOTATION ANNOTATION_ID="a1" TIME_SLOT_REF1="ts1" TIME_SLOT_REF2="ts2"><ANNOTATION_VALUE>A</ANNOTATION_VALUE></ALIGNABLE_ANNOTATION></ANNOTATION>
  </TIER>
</ANNOTATION_DOCUMENT>"#;
    let doc = ElanDocument::parse(xml, "anon", &TierPatterns::default()).unwrap();
    assert_eq!(doc.participants.len(), 1);
    assert_eq!(doc.participants[0].participant, "");
}

#[test]
fn read_uses_file_stem_as_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CNGT0042.eaf");
    std::fs::write(&path, TWO_HANDED).unwrap();

    let doc = ElanDocument::read(&path, &TierPatterns::default()).unwrap();
    assert_eq!(doc.identifier, "CNGT0042");
    assert_eq!(document_identifier(&path), "CNGT0042");

    let missing = ElanDocument::read(&dir.path().join("nope.eaf"), &TierPatterns::default());
    assert!(matches!(missing, Err(ParserError::Read { .. })));
}
