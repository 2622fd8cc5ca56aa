//! Property tests for the retrieval metrics.

use std::collections::HashSet;

use climacheck_core::models::{EvaluationPair, MetricScores, Passage, RelevantTarget};
use climacheck_eval::metrics::{
    evaluate_query, mrr_at_k, ndcg_at_k, precision_at_k, recall_at_k,
};
use proptest::prelude::*;

fn arb_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("p[0-7]", 0..15)
}

proptest! {
    #[test]
    fn prop_recall_is_monotone_in_k(ids in arb_ids(), target in "p[0-7]", k in 0usize..15) {
        let retrieved: Vec<&str> = ids.iter().map(String::as_str).collect();
        let relevant = HashSet::from([target.as_str()]);
        prop_assert!(recall_at_k(&retrieved, &relevant, k) <= recall_at_k(&retrieved, &relevant, k + 1));
    }

    #[test]
    fn prop_scores_are_bounded_and_zero_without_a_hit(
        ids in arb_ids(),
        target in "p[0-7]",
        k in 0usize..15,
    ) {
        let retrieved: Vec<&str> = ids.iter().map(String::as_str).collect();
        let relevant = HashSet::from([target.as_str()]);
        let recall = recall_at_k(&retrieved, &relevant, k);
        let precision = precision_at_k(&retrieved, &relevant, k);
        let ndcg = ndcg_at_k(&retrieved, &relevant, k);
        for score in [recall, precision, ndcg, mrr_at_k(&retrieved, &relevant, k)] {
            prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
        let hit = retrieved.iter().take(k).any(|id| *id == target);
        if !hit {
            prop_assert_eq!(recall, 0.0);
            prop_assert_eq!(precision, 0.0);
        }
    }

    #[test]
    fn prop_ndcg_is_one_for_ideal_order(
        rest in prop::collection::vec("q[0-7]", 0..10),
        k in 1usize..12,
    ) {
        let mut retrieved = vec!["p1"];
        retrieved.extend(rest.iter().map(String::as_str));
        let relevant = HashSet::from(["p1"]);
        prop_assert!((ndcg_at_k(&retrieved, &relevant, k) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_control_is_all_or_nothing(ids in arb_ids()) {
        let retrieved: Vec<Passage> = ids.iter().map(|id| Passage::new(id.clone(), "t")).collect();
        let expected = if retrieved.is_empty() { 1.0 } else { 0.0 };
        let result = evaluate_query(&EvaluationPair::new(retrieved, RelevantTarget::Control), &[1, 3, 5, 10]);
        for (_, scores) in result.iter() {
            prop_assert_eq!(*scores, MetricScores::uniform(expected));
        }
    }
}
