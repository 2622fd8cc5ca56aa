//! # climacheck-eval
//!
//! Scores retrieval output against a labeled gold set.
//!
//! - [`metrics`]: recall, precision, F1, MRR and nDCG at each cutoff, with the
//!   control-case convention
//! - [`comparison`]: per-cutoff, per-metric winners across named methods
//! - [`gold`]: gold set loading and evaluation pair construction
//! - [`evaluator`]: the end-to-end evaluator and its JSON report
//! - [`nli`]: accuracy and per-label scores for entailment predictions
//! - [`nli_evaluator`]: runs a classifier over the labeled gold entries

pub mod comparison;
pub mod evaluator;
pub mod gold;
pub mod metrics;
pub mod nli;
pub mod nli_evaluator;

pub use comparison::{compare_methods, BestMethod, MethodComparison, PerformanceSummary};
pub use evaluator::{EvaluationReport, Recommendation, RetrievalEvaluator, Severity};
pub use gold::{create_evaluation_pairs, load_gold_set, GoldLoadReport};
pub use metrics::{evaluate_multiple_queries, evaluate_query, metrics_summary};
pub use nli::{LabelScores, NliMetrics};
pub use nli_evaluator::{NliCase, NliEvaluation, NliEvaluator, NliPrediction};
