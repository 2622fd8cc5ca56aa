//! Property tests for overlap merging.

use proptest::prelude::*;

use climacheck_concepts::merge_overlapping;
use climacheck_core::models::{Concept, ExtractionSource};

fn concept_strategy() -> impl Strategy<Value = Concept> {
    (0usize..60, 1usize..12, 0usize..ExtractionSource::ALL.len()).prop_map(|(start, len, s)| {
        Concept::new(
            format!("c{start}_{len}"),
            "T",
            start,
            start + len,
            ExtractionSource::ALL[s],
        )
    })
}

proptest! {
    #[test]
    fn prop_merge_is_idempotent(concepts in prop::collection::vec(concept_strategy(), 0..30)) {
        let once = merge_overlapping(concepts);
        let twice = merge_overlapping(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_merge_output_is_disjoint_and_sorted(concepts in prop::collection::vec(concept_strategy(), 0..30)) {
        let merged = merge_overlapping(concepts);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn prop_merge_only_keeps_inputs(concepts in prop::collection::vec(concept_strategy(), 0..30)) {
        let merged = merge_overlapping(concepts.clone());
        for m in &merged {
            prop_assert!(concepts.contains(m));
        }
        prop_assert!(merged.len() <= concepts.len());
    }

    #[test]
    fn prop_triple_overlap_keeps_at_most_two(
        a in 0usize..5,
        gap_b in 1usize..5,
        gap_c in 1usize..5,
        sources in prop::collection::vec(0usize..6, 3),
    ) {
        let b = a + gap_b;
        let c = b + gap_c;
        // Each span reaches into the next one.
        let chain = vec![
            Concept::new("a", "T", a, b + 1, ExtractionSource::ALL[sources[0]]),
            Concept::new("b", "T", b, c + 1, ExtractionSource::ALL[sources[1]]),
            Concept::new("c", "T", c, c + 6, ExtractionSource::ALL[sources[2]]),
        ];
        let merged = merge_overlapping(chain);
        prop_assert!(!merged.is_empty() && merged.len() <= 2);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}

#[test]
fn replacement_can_drop_an_earlier_region() {
    // a is replaced by b, then c loses against b: the tokens of a that b does
    // not cover end up without any concept.
    let merged = merge_overlapping(vec![
        Concept::new("a", "T", 0, 5, ExtractionSource::Nltk),
        Concept::new("b", "T", 3, 8, ExtractionSource::Regex),
        Concept::new("c", "T", 6, 12, ExtractionSource::Spacy),
    ]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].text, "b");
}

#[test]
fn loser_in_the_middle_lets_third_through() {
    let merged = merge_overlapping(vec![
        Concept::new("a", "T", 0, 5, ExtractionSource::Regex),
        Concept::new("b", "T", 3, 8, ExtractionSource::Nltk),
        Concept::new("c", "T", 6, 12, ExtractionSource::Spacy),
    ]);
    let texts: Vec<&str> = merged.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "c"]);
}
