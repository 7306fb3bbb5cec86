use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sc_counter::export::{flatten, to_csv, to_json};
use sc_counter::{CounterError, CounterOptions, SignCounter, expand_inputs, summarize};
use sc_parser::MetadataTable;
use serde_json::Value;

const METADATA: &str = "Participant\tMetadata region\tAge\n\
                        S001\tNorth\t30\n\
                        S002\tSouth\t41\n";

struct Ann<'a> {
    begin: i64,
    end: i64,
    value: &'a str,
}

fn tier(id: &str, participant: &str, annotations: &[Ann<'_>], slots: &mut Vec<i64>) -> String {
    let mut body = String::new();
    for (i, ann) in annotations.iter().enumerate() {
        slots.push(ann.begin);
        let ref1 = slots.len();
        slots.push(ann.end);
        let ref2 = slots.len();
        body.push_str(&format!(
            r#"<ANNOTATION><ALIGNABLE_ANNOTATION ANNOTATION_ID="{id}-{i}" TIME_SLOT_REF1="ts{ref1}" TIME_SLOT_REF2="ts{ref2}"><ANNOTATION_VALUE>{}</ANNOTATION_VALUE></ALIGNABLE_ANNOTATION></ANNOTATION>"#,
            ann.value
        ));
    }
    format!(r#"<TIER LINGUISTIC_TYPE_REF="gloss" PARTICIPANT="{participant}" TIER_ID="{id}">{body}</TIER>"#)
}

fn eaf(tiers: &[(&str, &str, Vec<Ann<'_>>)]) -> String {
    let mut slots = Vec::new();
    let tiers: String = tiers
        .iter()
        .map(|(id, participant, anns)| tier(id, participant, anns, &mut slots))
        .collect();
    let time_order: String = slots
        .iter()
        .enumerate()
        .map(|(i, v)| format!(r#"<TIME_SLOT TIME_SLOT_ID="ts{}" TIME_VALUE="{v}"/>"#, i + 1))
        .collect();
    format!("<ANNOTATION_DOCUMENT><TIME_ORDER>{time_order}</TIME_ORDER>{tiers}</ANNOTATION_DOCUMENT>")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn corpus() -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let doc1 = eaf(&[
        (
            "GlossR S001",
            "S001",
            vec![
                Ann { begin: 0, end: 100, value: "TREE" },
                Ann { begin: 500, end: 600, value: "HOUSE" },
            ],
        ),
        (
            "GlossL S001",
            "S001",
            vec![Ann { begin: 50, end: 200, value: "TREE" }],
        ),
        (
            "Gloss S002",
            "S002",
            vec![
                Ann { begin: 0, end: 100, value: "TREE" },
                Ann { begin: 200, end: 300, value: " " },
            ],
        ),
    ]);
    let doc2 = eaf(&[(
        "Gloss S001",
        "S001",
        vec![Ann { begin: 0, end: 100, value: "HOUSE" }],
    )]);
    let paths = vec![write(dir.path(), "doc1.eaf", &doc1), write(dir.path(), "doc2.eaf", &doc2)];
    (dir, paths)
}

fn counter() -> SignCounter {
    SignCounter::new(
        CounterOptions::default(),
        MetadataTable::parse(METADATA, "Metadata region"),
    )
}

#[test]
fn two_handed_overlap_counts_gloss_once() {
    let (_dir, paths) = corpus();
    let summaries = counter().run(&paths, "eaf").unwrap().summaries;

    // S001 TREE on both hands overlaps into one unit.
    let tree = &summaries["TREE"];
    assert_eq!(tree.frequency, 2);
    assert_eq!(tree.number_of_signers, 2);
    assert_eq!(tree.per_region["North"].frequency, 1);
    assert_eq!(tree.per_region["South"].frequency, 1);
    assert_eq!(tree.per_field["Age"]["30"].number_of_signers, 1);

    let house = &summaries["HOUSE"];
    assert_eq!(house.frequency, 2);
    // (S001, doc1) and (S001, doc2)
    assert_eq!(house.number_of_signers, 2);
    assert_eq!(house.per_region["North"].number_of_signers, 1);

    assert!(!summaries.contains_key(""));
}

#[test]
fn recounting_the_same_files_is_deterministic() {
    let (_dir, paths) = corpus();
    let counter = counter();
    let first = summarize(&counter.count_files(&paths).unwrap());
    let second = summarize(&counter.count_files(&paths).unwrap());
    assert_eq!(first, second);
}

#[test]
fn csv_rows_carry_the_same_leaves_as_json() {
    let (_dir, paths) = corpus();
    let summaries = counter().run(&paths, "eaf").unwrap().summaries;

    let json: BTreeMap<String, Value> = serde_json::from_str(&to_json(&summaries).unwrap()).unwrap();
    let csv = to_csv(&summaries).unwrap();
    let mut lines = csv.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(header[0], "gloss");

    for line in lines {
        let cells: Vec<&str> = line.split(',').collect();
        let leaves = flatten(&json[cells[0]]);
        let from_csv: BTreeMap<String, String> = header[1..]
            .iter()
            .zip(&cells[1..])
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(column, cell)| ((*column).to_string(), (*cell).to_string()))
            .collect();
        let from_json: BTreeMap<String, String> = leaves
            .into_iter()
            .map(|(path, value)| (path, value.to_string()))
            .collect();
        assert_eq!(from_csv, from_json);
    }
}

#[test]
fn multiple_two_handed_participants_are_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let doc = eaf(&[
        ("GlossR S001", "S001", vec![Ann { begin: 0, end: 100, value: "A" }]),
        ("GlossL S001", "S001", vec![Ann { begin: 0, end: 100, value: "A" }]),
        ("GlossR S002", "S002", vec![Ann { begin: 0, end: 100, value: "B" }]),
        ("GlossL S002", "S002", vec![Ann { begin: 300, end: 400, value: "B" }]),
    ]);
    let path = write(dir.path(), "multi.eaf", &doc);

    let tables = counter().count_file(&path).unwrap();
    assert_eq!(tables.review.len(), 1);
    assert!(tables.review[0].starts_with("multi:"));
    assert_eq!(tables.gloss("A").unwrap().frequency, 1);
    assert_eq!(tables.gloss("B").unwrap().frequency, 2);
}

#[test]
fn parse_failure_fails_the_batch() {
    let (dir, mut paths) = corpus();
    paths.push(write(dir.path(), "broken.eaf", "<ANNOTATION_DOCUMENT>"));
    let err = counter().count_files(&paths).unwrap_err();
    assert!(matches!(err, CounterError::Parse { ref path, .. } if path.ends_with("broken.eaf")));
}

#[test]
fn standalone_run_skips_unparsable_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = eaf(&[(
        "Gloss S001",
        "S001",
        vec![Ann { begin: 0, end: 100, value: "TREE" }],
    )]);
    write(dir.path(), "good.eaf", &good);
    write(dir.path(), "bad.eaf", &good[..good.len() / 2]);

    let run = counter().run(&[dir.path().to_path_buf()], "eaf").unwrap();
    assert_eq!(run.summaries["TREE"].frequency, 1);
    assert_eq!(run.summaries["TREE"].per_region["North"].number_of_signers, 1);
    assert_eq!(run.skipped.len(), 1);
    assert!(run.skipped[0].path.ends_with("bad.eaf"));
    assert!(run.skipped[0].reason.starts_with("failed to parse"));
}

#[test]
fn directories_expand_to_matching_files() {
    let (dir, _) = corpus();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir.path().join("nested"), "DOC3.EAF", "<x/>");
    write(dir.path(), "notes.txt", "");

    let files = expand_inputs(&[dir.path().to_path_buf()], "eaf").unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, ["doc1.eaf", "doc2.eaf", "DOC3.EAF"]);

    assert!(matches!(
        expand_inputs(&[dir.path().join("missing")], "eaf"),
        Err(CounterError::MissingInput(_))
    ));
    let empty = tempfile::tempdir().unwrap();
    assert!(matches!(
        expand_inputs(&[empty.path().to_path_buf()], "eaf"),
        Err(CounterError::NoInputs)
    ));
}
