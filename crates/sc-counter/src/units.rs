//! Gloss unit building.
//!
//! One-handed signers produce one unit per annotation. For two-handed signers
//! the two hand streams are interleaved chronologically; an annotation starts
//! a new unit when it begins after `last_end - minimum_overlap`, where
//! `last_end` is the latest end seen so far.

use std::collections::{BTreeMap, VecDeque};

use sc_core::{Annotation, GlossUnit, Hand};
use sc_parser::{ParticipantLayout, ParticipantTiers};

/// One singleton unit per annotation, in document order.
#[must_use]
pub fn one_handed_units(annotations: Vec<Annotation>) -> Vec<GlossUnit> {
    annotations.into_iter().map(GlossUnit::single).collect()
}

/// Merge right- and left-hand streams into overlap units.
///
/// Each stream is assumed chronological. When both heads begin at the same
/// time the right hand goes first. The final unit is emitted only when it
/// holds at least one annotation.
#[must_use]
pub fn two_handed_units(
    right: Vec<Annotation>,
    left: Vec<Annotation>,
    minimum_overlap: u64,
) -> Vec<GlossUnit> {
    let overlap = i64::try_from(minimum_overlap).unwrap_or(i64::MAX);
    let mut streams = BTreeMap::from([
        (Hand::Right, VecDeque::from(right)),
        (Hand::Left, VecDeque::from(left)),
    ]);
    let mut units = Vec::new();
    let mut current = GlossUnit::new();
    let mut last_end: Option<i64> = None;

    loop {
        // min_by_key keeps the first of equal keys, so PRIORITY breaks ties.
        let next = Hand::PRIORITY
            .into_iter()
            .filter_map(|hand| {
                streams
                    .get(&hand)
                    .and_then(VecDeque::front)
                    .map(|head| (head.begin, hand))
            })
            .min_by_key(|(begin, _)| *begin);
        let Some(annotation) = next
            .and_then(|(_, hand)| streams.get_mut(&hand))
            .and_then(VecDeque::pop_front)
        else {
            break;
        };

        if let Some(end) = last_end {
            if annotation.begin > end.saturating_sub(overlap) && !current.is_empty() {
                units.push(std::mem::take(&mut current));
            }
        }
        last_end = Some(last_end.map_or(annotation.end, |end| end.max(annotation.end)));
        current.push(annotation);
    }

    if !current.is_empty() {
        units.push(current);
    }
    units
}

/// Units for one classified participant.
#[must_use]
pub fn participant_units(tiers: ParticipantTiers, minimum_overlap: u64) -> Vec<GlossUnit> {
    match tiers.layout {
        ParticipantLayout::OneHanded(annotations) => one_handed_units(annotations),
        ParticipantLayout::TwoHanded { right, left } => {
            two_handed_units(right, left, minimum_overlap)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn annotation(id: &str, begin: i64, end: i64, hand: Option<Hand>) -> Annotation {
        Annotation {
            id: id.to_string(),
            begin,
            end,
            value: Some(id.to_uppercase()),
            cve_ref: None,
            participant: "S001".to_string(),
            hand,
        }
    }

    fn right(id: &str, begin: i64, end: i64) -> Annotation {
        annotation(id, begin, end, Some(Hand::Right))
    }

    fn left(id: &str, begin: i64, end: i64) -> Annotation {
        annotation(id, begin, end, Some(Hand::Left))
    }

    fn ids(units: &[GlossUnit]) -> Vec<Vec<&str>> {
        units
            .iter()
            .map(|u| u.annotations.iter().map(|a| a.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn one_handed_gives_one_unit_per_annotation() {
        let annotations: Vec<Annotation> = (0..5)
            .map(|i| annotation(&format!("a{i}"), i * 100, i * 100 + 90, None))
            .collect();
        let units = one_handed_units(annotations);
        assert_eq!(units.len(), 5);
        assert!(units.iter().all(|u| u.len() == 1));
        assert_eq!(ids(&units)[3], ["a3"]);
    }

    #[rstest]
    #[case::gap_beyond_overlap(120, vec![vec!["r"], vec!["l"]])]
    #[case::inside_overlap(50, vec![vec!["r", "l"]])]
    #[case::exactly_on_threshold(60, vec![vec!["r", "l"]])]
    #[case::one_past_threshold(61, vec![vec!["r"], vec!["l"]])]
    fn merge_threshold(#[case] left_begin: i64, #[case] expected: Vec<Vec<&str>>) {
        let units = two_handed_units(vec![right("r", 0, 100)], vec![left("l", left_begin, 200)], 40);
        assert_eq!(ids(&units), expected);
    }

    #[test]
    fn streams_are_interleaved_by_begin_time() {
        let units = two_handed_units(
            vec![right("r1", 0, 100), right("r2", 400, 500)],
            vec![left("l1", 50, 300), left("l2", 250, 350)],
            40,
        );
        assert_eq!(ids(&units), vec![vec!["r1", "l1", "l2"], vec!["r2"]]);
    }

    #[test]
    fn tie_on_begin_takes_right_hand_first() {
        let units = two_handed_units(vec![right("r", 10, 100)], vec![left("l", 10, 100)], 40);
        assert_eq!(ids(&units), vec![vec!["r", "l"]]);
        // Same tie with the left stream holding more annotations.
        let units = two_handed_units(
            vec![right("r1", 10, 100)],
            vec![left("l1", 10, 100), left("l2", 10, 100)],
            40,
        );
        assert_eq!(ids(&units), vec![vec!["r1", "l1", "l2"]]);
    }

    #[test]
    fn last_end_is_a_running_maximum() {
        // The short l1 must not pull last_end back below r1's end.
        let units = two_handed_units(
            vec![right("r1", 0, 1000)],
            vec![left("l1", 10, 20), left("l2", 900, 950)],
            40,
        );
        assert_eq!(ids(&units), vec![vec!["r1", "l1", "l2"]]);
    }

    #[test]
    fn one_empty_hand_still_builds_units() {
        let units = two_handed_units(vec![], vec![left("l1", 0, 100), left("l2", 500, 600)], 40);
        assert_eq!(ids(&units), vec![vec!["l1"], vec!["l2"]]);
    }

    #[test]
    fn no_annotations_emit_no_trailing_unit() {
        assert!(two_handed_units(vec![], vec![], 40).is_empty());
        assert!(one_handed_units(vec![]).is_empty());
    }

    #[test]
    fn zero_overlap_still_merges_touching_annotations() {
        let units = two_handed_units(vec![right("r", 0, 100)], vec![left("l", 100, 200)], 0);
        assert_eq!(ids(&units), vec![vec!["r", "l"]]);
        let units = two_handed_units(vec![right("r", 0, 100)], vec![left("l", 101, 200)], 0);
        assert_eq!(units.len(), 2);
    }
}
