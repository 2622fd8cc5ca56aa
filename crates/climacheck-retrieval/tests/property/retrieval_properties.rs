//! Property tests for deduplication and similarity ranking.

use climacheck_core::models::Passage;
use climacheck_retrieval::{cosine_similarity, dedup_passages, rank};
use proptest::prelude::*;

fn arb_passage() -> impl Strategy<Value = Passage> {
    (
        prop_oneof![Just(String::new()), "p[0-4]"],
        prop_oneof![Just(String::new()), "t[0-3]"],
    )
        .prop_map(|(id, text)| Passage::new(id, text))
}

fn arb_embedded() -> impl Strategy<Value = Passage> {
    ("p[0-9]{1,2}", prop::collection::vec(-1.0f32..1.0, 3))
        .prop_map(|(id, e)| Passage::new(id, "t").with_embedding(e))
}

proptest! {
    #[test]
    fn prop_dedup_is_idempotent(passages in prop::collection::vec(arb_passage(), 0..30)) {
        let once = dedup_passages(passages);
        let twice = dedup_passages(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_dedup_output_is_a_subsequence(passages in prop::collection::vec(arb_passage(), 0..30)) {
        let out = dedup_passages(passages.clone());
        let mut cursor = passages.iter();
        for kept in &out {
            prop_assert!(cursor.any(|p| p == kept), "output is not an ordered subsequence");
        }
    }

    #[test]
    fn prop_dedup_leaves_unique_ids(passages in prop::collection::vec(arb_passage(), 0..30)) {
        let out = dedup_passages(passages);
        let mut ids: Vec<&str> = out.iter().filter(|p| !p.id.is_empty()).map(|p| p.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(before, ids.len());
        prop_assert!(out.iter().all(|p| !(p.id.is_empty() && p.text.is_empty())));
    }

    #[test]
    fn prop_cosine_is_bounded_and_symmetric(
        u in prop::collection::vec(-10.0f32..10.0, 4),
        v in prop::collection::vec(-10.0f32..10.0, 4),
    ) {
        let a = cosine_similarity(&u, &v);
        let b = cosine_similarity(&v, &u);
        prop_assert!((a - b).abs() < 1e-9);
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&a));
    }

    #[test]
    fn prop_rank_is_sorted_positive_and_capped(
        query in prop::collection::vec(-1.0f32..1.0, 3),
        passages in prop::collection::vec(arb_embedded(), 0..20),
        top_k in 0usize..8,
    ) {
        let ranked = rank(&query, &passages, top_k);
        prop_assert!(ranked.len() <= top_k);
        prop_assert!(ranked.iter().all(|(_, s)| *s > 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
