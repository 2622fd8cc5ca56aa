//! Runs an entailment classifier over the labeled part of a gold set and
//! scores it with [`NliMetrics`].
//!
//! Each case pairs the evidence passage (premise) with the gold claim
//! (hypothesis). Entries whose evidence ID is not in the corpus are skipped
//! with a warning. A classifier error aborts the run: scoring a fallback
//! label would measure the fallback, not the model.

use std::path::Path;
use std::sync::Arc;

use climacheck_core::errors::{ClimacheckResult, ValidationError};
use climacheck_core::models::{EntailmentLabel, GoldEntry};
use climacheck_core::traits::IEntailmentClassifier;
use climacheck_retrieval::Corpus;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::nli::NliMetrics;

/// One claim/evidence pair with its gold label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NliCase {
    pub id: String,
    pub claim: String,
    pub premise: String,
    pub expected: EntailmentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NliPrediction {
    pub id: String,
    pub predicted: EntailmentLabel,
    pub expected: EntailmentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NliEvaluation {
    pub classifier: String,
    pub metrics: NliMetrics,
    pub predictions: Vec<NliPrediction>,
    /// Gold IDs whose evidence passage was not in the corpus.
    pub missing_evidence: Vec<String>,
}

pub struct NliEvaluator {
    classifier: Arc<dyn IEntailmentClassifier>,
    corpus: Arc<Corpus>,
    max_entries: Option<usize>,
}

impl NliEvaluator {
    pub fn new(classifier: Arc<dyn IEntailmentClassifier>, corpus: Arc<Corpus>) -> Self {
        Self {
            classifier,
            corpus,
            max_entries: None,
        }
    }

    /// Evaluate at most `limit` labeled entries, in gold order.
    pub fn with_max_entries(mut self, limit: usize) -> Self {
        self.max_entries = Some(limit);
        self
    }

    /// Entries with a claim, an evidence ID and an entailment label.
    pub fn labeled_entries<'a>(&self, gold: &'a [GoldEntry]) -> Vec<&'a GoldEntry> {
        let labeled = gold.iter().filter(|e| {
            !e.claim.trim().is_empty()
                && e.evidence.as_deref().is_some_and(|ev| !ev.trim().is_empty())
                && e.entailment.is_some()
        });
        match self.max_entries {
            Some(limit) => labeled.take(limit).collect(),
            None => labeled.collect(),
        }
    }

    /// Resolve each labeled entry's evidence to passage text.
    ///
    /// Returns the cases and the IDs of entries whose evidence could not be
    /// resolved.
    ///
    /// # Errors
    /// `ValidationError::UnrecognizedLabel` for a gold label outside the
    /// accepted synonyms.
    pub fn prepare_cases(&self, gold: &[GoldEntry]) -> ClimacheckResult<(Vec<NliCase>, Vec<String>)> {
        let mut cases = Vec::new();
        let mut missing = Vec::new();
        for entry in self.labeled_entries(gold) {
            let Some(expected) = entry.entailment_label()? else {
                continue;
            };
            let evidence = entry.evidence.as_deref().unwrap_or_default().trim();
            match self.corpus.get(evidence).filter(|p| !p.text.trim().is_empty()) {
                Some(passage) => cases.push(NliCase {
                    id: entry.id.clone(),
                    claim: entry.claim.trim().to_string(),
                    premise: passage.text.clone(),
                    expected,
                }),
                None => {
                    warn!(id = %entry.id, evidence, "evidence passage not in corpus");
                    missing.push(entry.id.clone());
                }
            }
        }
        Ok((cases, missing))
    }

    /// Classify every case in parallel, keeping case order.
    ///
    /// # Errors
    /// The first classifier failure.
    pub fn classify_cases(&self, cases: &[NliCase]) -> ClimacheckResult<Vec<NliPrediction>> {
        cases
            .par_iter()
            .map(|case| {
                let predicted = self
                    .classifier
                    .classify(&case.premise, &case.claim)
                    .inspect_err(|e| warn!(id = %case.id, error = %e, "entailment classification failed"))?;
                Ok(NliPrediction {
                    id: case.id.clone(),
                    predicted,
                    expected: case.expected,
                })
            })
            .collect()
    }

    /// Filter, resolve, classify and score.
    ///
    /// # Errors
    /// `ValidationError::EmptyInput` when no gold entry yields a case, plus
    /// whatever [`Self::prepare_cases`] and [`Self::classify_cases`] return.
    pub fn evaluate(&self, gold: &[GoldEntry]) -> ClimacheckResult<NliEvaluation> {
        let (cases, missing_evidence) = self.prepare_cases(gold)?;
        let _span = climacheck_observability::evaluation_span!(self.classifier.name(), cases.len()).entered();
        if cases.is_empty() {
            return Err(ValidationError::EmptyInput {
                what: "gold entries with evidence and an entailment label".to_string(),
            }
            .into());
        }

        let predictions = self.classify_cases(&cases)?;
        let pairs: Vec<(EntailmentLabel, EntailmentLabel)> =
            predictions.iter().map(|p| (p.predicted, p.expected)).collect();
        let metrics = NliMetrics::from_pairs(&pairs)?;
        info!(
            classifier = self.classifier.name(),
            cases = cases.len(),
            missing_evidence = missing_evidence.len(),
            accuracy = metrics.accuracy,
            "entailment evaluation complete"
        );
        Ok(NliEvaluation {
            classifier: self.classifier.name().to_string(),
            metrics,
            predictions,
            missing_evidence,
        })
    }

    /// Write `evaluation` as pretty JSON, creating parent directories.
    pub fn save_report(evaluation: &NliEvaluation, path: &Path) -> ClimacheckResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(evaluation)?)?;
        info!(path = %path.display(), "entailment report saved");
        Ok(())
    }
}
