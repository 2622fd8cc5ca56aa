//! Rank-aware retrieval metrics over passage IDs.
//!
//! Every function takes the retrieved IDs in rank order and the set of
//! relevant IDs, and looks only at the first `k` retrieved. All scores are
//! in `[0, 1]`.
//!
//! A control query (no evidence exists) is scored separately: every metric
//! is 1.0 when nothing was retrieved and 0.0 otherwise.

use std::collections::HashSet;
use std::fmt::Write as _;

use climacheck_core::errors::{ClimacheckResult, ValidationError};
use climacheck_core::models::{EvaluationPair, Metric, MetricResult, MetricScores, RelevantTarget};
use tracing::debug;

/// Fraction of the relevant IDs found in the top `k`.
pub fn recall_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let found: HashSet<&str> = retrieved
        .iter()
        .take(k)
        .copied()
        .filter(|id| relevant.contains(id))
        .collect();
    found.len() as f64 / relevant.len() as f64
}

/// Relevant hits in the top `k`, divided by `k`.
pub fn precision_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    if k == 0 || retrieved.is_empty() {
        return 0.0;
    }
    let hits = retrieved
        .iter()
        .take(k)
        .filter(|id| relevant.contains(*id))
        .count();
    hits as f64 / k as f64
}

/// Harmonic mean of precision and recall at `k`.
pub fn f1_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    if relevant.is_empty() || k == 0 {
        return 0.0;
    }
    let precision = precision_at_k(retrieved, relevant, k);
    let recall = recall_at_k(retrieved, relevant, k);
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Reciprocal rank of the first relevant ID in the top `k`.
pub fn mrr_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    retrieved
        .iter()
        .take(k)
        .position(|id| relevant.contains(id))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Binary-gain DCG: the first rank is undiscounted, rank `i >= 2` is
/// discounted by `log2(i)`. A relevant ID is credited once, at its first
/// occurrence.
pub fn dcg_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    let mut credited: HashSet<&str> = HashSet::new();
    retrieved
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, id)| relevant.contains(*id) && credited.insert(**id))
        .map(|(i, _)| discount(i + 1))
        .sum()
}

/// DCG normalized by the DCG of the ideal ranking, which places every
/// relevant ID first. Zero when the ideal DCG is zero.
pub fn ndcg_at_k(retrieved: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    let ideal: f64 = (1..=relevant.len().min(k)).map(discount).sum();
    if ideal == 0.0 {
        return 0.0;
    }
    dcg_at_k(retrieved, relevant, k) / ideal
}

fn discount(rank: usize) -> f64 {
    if rank == 1 {
        1.0
    } else {
        1.0 / (rank as f64).log2()
    }
}

/// All five metrics at each of `k_values` for one query.
pub fn evaluate_query(pair: &EvaluationPair, k_values: &[usize]) -> MetricResult {
    match &pair.relevant {
        RelevantTarget::Control => {
            let score = if pair.retrieved.is_empty() { 1.0 } else { 0.0 };
            k_values
                .iter()
                .map(|&k| (k, MetricScores::uniform(score)))
                .collect()
        }
        RelevantTarget::Passage(id) => {
            let retrieved = pair.retrieved_ids();
            let relevant: HashSet<&str> = HashSet::from([id.as_str()]);
            k_values
                .iter()
                .map(|&k| {
                    let scores = MetricScores {
                        recall: recall_at_k(&retrieved, &relevant, k),
                        precision: precision_at_k(&retrieved, &relevant, k),
                        f1: f1_at_k(&retrieved, &relevant, k),
                        mrr: mrr_at_k(&retrieved, &relevant, k),
                        ndcg: ndcg_at_k(&retrieved, &relevant, k),
                    };
                    (k, scores)
                })
                .collect()
        }
    }
}

/// Per-cutoff mean of every metric over `pairs`.
///
/// # Errors
/// `ValidationError::EmptyInput` when `pairs` is empty.
pub fn evaluate_multiple_queries(
    pairs: &[EvaluationPair],
    k_values: &[usize],
) -> ClimacheckResult<MetricResult> {
    if pairs.is_empty() {
        return Err(ValidationError::EmptyInput {
            what: "evaluation pairs".to_string(),
        }
        .into());
    }

    let mut sums: MetricResult = k_values
        .iter()
        .map(|&k| (k, MetricScores::default()))
        .collect();
    for pair in pairs {
        let single = evaluate_query(pair, k_values);
        for (k, scores) in single.iter() {
            let mut total = sums.get(k).copied().unwrap_or_default();
            for metric in Metric::ALL {
                *total.get_mut(metric) += scores.get(metric);
            }
            sums.insert(k, total);
        }
    }

    let n = pairs.len() as f64;
    let averaged: MetricResult = sums
        .iter()
        .map(|(k, total)| {
            let mut mean = *total;
            for metric in Metric::ALL {
                *mean.get_mut(metric) /= n;
            }
            (k, mean)
        })
        .collect();
    debug!(queries = pairs.len(), cutoffs = k_values.len(), "averaged metrics");
    Ok(averaged)
}

/// Plain-text table of one method's scores.
pub fn metrics_summary(results: &MetricResult) -> String {
    if results.is_empty() {
        return "No results to summarize.".to_string();
    }
    let mut out = String::from("Retrieval Metrics Summary\n");
    out.push_str(&"=".repeat(30));
    for (k, s) in results.iter() {
        let _ = write!(
            out,
            "\n\nTop-{k} Results:\n  Recall@{k}:    {:.4}\n  Precision@{k}: {:.4}\n  F1@{k}:        {:.4}\n  MRR@{k}:       {:.4}\n  nDCG@{k}:      {:.4}",
            s.recall, s.precision, s.f1, s.mrr, s.ndcg
        );
    }
    out
}
