//! Head-to-head comparison of retrieval methods.

use std::collections::BTreeMap;

use climacheck_core::models::{Metric, MetricResult};
use serde::Serialize;

/// The winning method for one (cutoff, metric) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMethod {
    pub method: String,
    pub score: f64,
}

/// Every method's score for one metric at one cutoff.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricComparison {
    pub scores: BTreeMap<String, f64>,
    pub best: Option<BestMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffComparison {
    pub k: usize,
    pub metrics: BTreeMap<Metric, MetricComparison>,
}

/// How often each method won a (cutoff, metric) cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub method_wins: BTreeMap<String, usize>,
    pub total_comparisons: usize,
    pub win_percentages: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodComparison {
    pub cutoffs: Vec<CutoffComparison>,
    pub summary: PerformanceSummary,
}

impl MethodComparison {
    pub fn cell(&self, k: usize, metric: Metric) -> Option<&MetricComparison> {
        self.cutoffs
            .iter()
            .find(|c| c.k == k)
            .and_then(|c| c.metrics.get(&metric))
    }

    pub fn best(&self, k: usize, metric: Metric) -> Option<&BestMethod> {
        self.cell(k, metric).and_then(|c| c.best.as_ref())
    }

    pub fn win_percentage(&self, method: &str) -> Option<f64> {
        self.summary.win_percentages.get(method).copied()
    }

    /// The method with the highest win percentage. Ties go to the method
    /// whose name sorts first.
    pub fn best_overall(&self) -> Option<(&str, f64)> {
        self.summary
            .win_percentages
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (name, &pct)| match best {
                Some((_, top)) if top >= pct => best,
                _ => Some((name.as_str(), pct)),
            })
    }
}

/// Compare methods cell by cell.
///
/// Cutoffs are taken from the method whose name sorts first. Within a cell
/// methods are visited in name order and the first one holding the maximum
/// score wins, so ties are broken by name.
pub fn compare_methods(results: &BTreeMap<String, MetricResult>) -> MethodComparison {
    let Some(first) = results.values().next() else {
        return MethodComparison::default();
    };

    let mut method_wins: BTreeMap<String, usize> =
        results.keys().map(|name| (name.clone(), 0)).collect();
    let mut total_comparisons = 0;
    let mut cutoffs = Vec::new();

    for k in first.cutoffs() {
        let mut metrics = BTreeMap::new();
        for metric in Metric::ALL {
            let scores: BTreeMap<String, f64> = results
                .iter()
                .filter_map(|(name, r)| r.score(k, metric).map(|s| (name.clone(), s)))
                .collect();
            let best = scores
                .iter()
                .fold(None, |best: Option<(&String, f64)>, (name, &score)| match best {
                    Some((_, top)) if top >= score => best,
                    _ => Some((name, score)),
                })
                .map(|(name, score)| BestMethod {
                    method: name.clone(),
                    score,
                });
            if let Some(b) = &best {
                *method_wins.entry(b.method.clone()).or_default() += 1;
                total_comparisons += 1;
            }
            metrics.insert(metric, MetricComparison { scores, best });
        }
        cutoffs.push(CutoffComparison { k, metrics });
    }

    let win_percentages = method_wins
        .iter()
        .map(|(name, &wins)| {
            let pct = if total_comparisons > 0 {
                wins as f64 / total_comparisons as f64 * 100.0
            } else {
                0.0
            };
            (name.clone(), pct)
        })
        .collect();

    MethodComparison {
        cutoffs,
        summary: PerformanceSummary {
            method_wins,
            total_comparisons,
            win_percentages,
        },
    }
}
