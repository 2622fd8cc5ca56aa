//! Cosine similarity and top-k ranking over embedded passages.

use std::cmp::Ordering;

use climacheck_core::models::Passage;
use tracing::warn;

/// `(u·v) / (‖u‖‖v‖)`, or `0.0` when either norm is zero or the lengths differ.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f64 {
    if u.len() != v.len() || u.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_u = 0.0f64;
    let mut norm_v = 0.0f64;
    for (a, b) in u.iter().zip(v) {
        let (a, b) = (f64::from(*a), f64::from(*b));
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }
    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }
    dot / (norm_u.sqrt() * norm_v.sqrt())
}

/// Passages by descending similarity to `query`, at most `top_k`.
///
/// Passages without an embedding are skipped. Only strictly positive scores
/// are kept. Equal scores keep their input order.
pub fn rank<'a, I>(query: &[f32], passages: I, top_k: usize) -> Vec<(&'a Passage, f64)>
where
    I: IntoIterator<Item = &'a Passage>,
{
    let mut scored: Vec<(&'a Passage, f64)> = passages
        .into_iter()
        .filter_map(|p| {
            let Some(embedding) = p.embedding.as_deref() else {
                warn!(passage = %p.id, "passage has no embedding, skipping");
                return None;
            };
            let score = cosine_similarity(query, embedding);
            (score > 0.0).then_some((p, score))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, embedding: Option<Vec<f32>>) -> Passage {
        let passage = Passage::new(id, format!("text of {id}"));
        match embedding {
            Some(e) => passage.with_embedding(e),
            None => passage,
        }
    }

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&[0.6, 0.8], &[0.0, 1.0]) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_norm_and_length_mismatch_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn rank_keeps_positive_scores_in_descending_order() {
        let passages = vec![
            p("a", Some(vec![1.0, 0.0])),
            p("b", Some(vec![0.0, 1.0])),
            p("c", Some(vec![-1.0, 0.0])),
            p("d", None),
            p("e", Some(vec![0.0, -1.0])),
        ];
        let ranked = rank(&[0.6, 0.8], &passages, 10);
        let ids: Vec<&str> = ranked.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn ties_keep_input_order_and_top_k_cuts() {
        let passages = vec![
            p("x", Some(vec![1.0, 1.0])),
            p("y", Some(vec![1.0, 1.0])),
            p("z", Some(vec![1.0, 1.0])),
        ];
        let ranked = rank(&[1.0, 1.0], &passages, 2);
        let ids: Vec<&str> = ranked.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert!(rank(&[1.0, 1.0], &passages, 0).is_empty());
    }

    #[test]
    fn zero_query_ranks_nothing() {
        let passages = vec![p("a", Some(vec![1.0, 0.0]))];
        assert!(rank(&[0.0, 0.0], &passages, 5).is_empty());
    }
}
