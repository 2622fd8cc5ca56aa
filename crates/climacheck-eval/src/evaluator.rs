//! End-to-end retrieval evaluation: score named methods against a gold set,
//! compare them, and write the result as a JSON report.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use climacheck_core::constants::{DEFAULT_K_VALUES, RECOMMENDATION_K, VERSION};
use climacheck_core::errors::{ClimacheckResult, ValidationError};
use climacheck_core::models::{EvaluationPair, GoldEntry, Metric, MetricResult, Passage};
use serde::Serialize;
use tracing::info;

use crate::comparison::{compare_methods, MethodComparison};
use crate::gold::create_evaluation_pairs;
use crate::metrics::{evaluate_multiple_queries, metrics_summary};

/// Recall at the recommendation cutoff below which a method is flagged.
pub const MIN_RECALL: f64 = 0.3;
/// Precision at the recommendation cutoff below which a method is flagged.
pub const MIN_PRECISION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A finding surfaced in the evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    fn info(message: String, action: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message,
            action: action.into(),
        }
    }

    fn warning(message: String, action: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub methods_evaluated: Vec<String>,
    pub metrics_calculated: Vec<Metric>,
    pub k_values: Vec<usize>,
}

/// Everything one evaluation produced, as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub evaluation_summary: EvaluationSummary,
    pub individual_results: BTreeMap<String, MetricResult>,
    pub comparison_analysis: MethodComparison,
    pub recommendations: Vec<Recommendation>,
}

/// Scores retrieval methods and keeps their averaged results by name.
#[derive(Debug, Clone)]
pub struct RetrievalEvaluator {
    k_values: Vec<usize>,
    results: BTreeMap<String, MetricResult>,
}

impl Default for RetrievalEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrievalEvaluator {
    pub fn new() -> Self {
        Self::with_k_values(DEFAULT_K_VALUES.to_vec())
    }

    pub fn with_k_values(k_values: Vec<usize>) -> Self {
        Self {
            k_values,
            results: BTreeMap::new(),
        }
    }

    pub fn k_values(&self) -> &[usize] {
        &self.k_values
    }

    /// Score `method` from per-claim retrieval output aligned with `gold`.
    /// A second evaluation under the same name replaces the first.
    pub fn evaluate_method(
        &mut self,
        method: &str,
        gold: &[GoldEntry],
        retrieved: &[Vec<Passage>],
    ) -> ClimacheckResult<&MetricResult> {
        let pairs = create_evaluation_pairs(gold, retrieved)?;
        self.evaluate_pairs(method, &pairs)
    }

    pub fn evaluate_pairs(
        &mut self,
        method: &str,
        pairs: &[EvaluationPair],
    ) -> ClimacheckResult<&MetricResult> {
        let _span = climacheck_observability::evaluation_span!(method, pairs.len()).entered();
        let result = evaluate_multiple_queries(pairs, &self.k_values)?;
        info!(method, pairs = pairs.len(), "method evaluated");
        self.results.insert(method.to_string(), result);
        self.result(method)
    }

    pub fn results(&self) -> &BTreeMap<String, MetricResult> {
        &self.results
    }

    pub fn result(&self, method: &str) -> ClimacheckResult<&MetricResult> {
        self.results.get(method).ok_or_else(|| {
            ValidationError::UnknownMethod {
                method: method.to_string(),
            }
            .into()
        })
    }

    pub fn compare(&self) -> MethodComparison {
        compare_methods(&self.results)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend(&self.results, &self.compare())
    }

    pub fn report(&self) -> EvaluationReport {
        let comparison = self.compare();
        let recommendations = recommend(&self.results, &comparison);
        let k_values = self
            .results
            .values()
            .next()
            .map(|r| r.cutoffs().collect())
            .unwrap_or_default();
        EvaluationReport {
            generated_at: Utc::now(),
            version: VERSION.to_string(),
            evaluation_summary: EvaluationSummary {
                methods_evaluated: self.results.keys().cloned().collect(),
                metrics_calculated: Metric::ALL.to_vec(),
                k_values,
            },
            individual_results: self.results.clone(),
            comparison_analysis: comparison,
            recommendations,
        }
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn save_report(&self, path: &Path) -> ClimacheckResult<EvaluationReport> {
        let report = self.report();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), methods = report.individual_results.len(), "evaluation report saved");
        Ok(report)
    }

    /// Console-style text summary of every method, plus the ranking by win
    /// percentage when more than one method was evaluated.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = format!("{rule}\nRETRIEVAL EVALUATION RESULTS SUMMARY\n{rule}\n");
        for (name, result) in &self.results {
            let _ = write!(
                out,
                "\n{}:\n{}\n{}\n",
                name.to_uppercase(),
                "-".repeat(name.len()),
                metrics_summary(result)
            );
        }
        if self.results.len() > 1 {
            let comparison = self.compare();
            let mut ranked: Vec<(&String, &f64)> =
                comparison.summary.win_percentages.iter().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(a.1));
            let _ = write!(
                out,
                "\n{rule}\nMETHOD COMPARISON\n{rule}\n\nOverall Performance (% of metrics where method performed best):\n"
            );
            for (name, pct) in ranked {
                let _ = writeln!(out, "  {name}: {pct:.1}%");
            }
        }
        out.push_str(&rule);
        out
    }
}

fn recommend(
    results: &BTreeMap<String, MetricResult>,
    comparison: &MethodComparison,
) -> Vec<Recommendation> {
    if results.is_empty() {
        return vec![Recommendation::info(
            "No results available for generating recommendations.".to_string(),
            "evaluate at least one method",
        )];
    }

    let mut recs = Vec::new();
    let k = RECOMMENDATION_K;

    if let Some((name, pct)) = comparison.best_overall() {
        recs.push(Recommendation::info(
            format!("Overall best performing method: {name} (wins {pct:.1}% of comparisons)"),
            format!("prefer {name}"),
        ));
    }

    for (metric, label) in [
        (Metric::Recall, format!("recall@{k}")),
        (Metric::Precision, format!("precision@{k}")),
        (Metric::Ndcg, format!("ranking quality (nDCG@{k})")),
    ] {
        if let Some(best) = comparison.best(k, metric) {
            recs.push(Recommendation::info(
                format!("Best {label}: {} ({:.4})", best.method, best.score),
                format!("use {} where {metric} matters most", best.method),
            ));
        }
    }

    for (name, result) in results {
        let Some(scores) = result.get(k) else {
            continue;
        };
        if scores.recall < MIN_RECALL {
            recs.push(Recommendation::warning(
                format!("{name} has low recall@{k} ({:.3})", scores.recall),
                "improve coverage",
            ));
        }
        if scores.precision < MIN_PRECISION {
            recs.push(Recommendation::warning(
                format!("{name} has low precision@{k} ({:.3})", scores.precision),
                "improve relevance filtering",
            ));
        }
    }

    recs
}
