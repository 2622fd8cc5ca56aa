//! Scores for entailment predictions against gold labels.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use climacheck_core::errors::{ClimacheckResult, ValidationError};
use climacheck_core::models::EntailmentLabel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Accuracy, per-label and macro-averaged scores, and the confusion matrix
/// (`confusion[truth][predicted]`) for one batch of predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NliMetrics {
    pub accuracy: f64,
    pub total_predictions: usize,
    pub per_label: BTreeMap<EntailmentLabel, LabelScores>,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub confusion: BTreeMap<EntailmentLabel, BTreeMap<EntailmentLabel, usize>>,
    pub predicted_distribution: BTreeMap<EntailmentLabel, usize>,
    pub true_distribution: BTreeMap<EntailmentLabel, usize>,
}

/// Normalize a raw label. Unknown and blank labels are rejected.
pub fn normalize_label(raw: &str) -> ClimacheckResult<EntailmentLabel> {
    EntailmentLabel::parse_loose(raw).ok_or_else(|| {
        ValidationError::UnrecognizedLabel {
            label: raw.to_string(),
        }
        .into()
    })
}

impl NliMetrics {
    /// # Errors
    /// `ValidationError` when the slices differ in length or are empty.
    pub fn from_labels(
        predicted: &[EntailmentLabel],
        truth: &[EntailmentLabel],
    ) -> ClimacheckResult<Self> {
        if predicted.len() != truth.len() {
            return Err(ValidationError::LengthMismatch {
                left_name: "predicted".to_string(),
                left: predicted.len(),
                right_name: "true".to_string(),
                right: truth.len(),
            }
            .into());
        }
        if predicted.is_empty() {
            return Err(ValidationError::EmptyInput {
                what: "label lists".to_string(),
            }
            .into());
        }

        let mut confusion: BTreeMap<EntailmentLabel, BTreeMap<EntailmentLabel, usize>> =
            EntailmentLabel::ALL
                .iter()
                .map(|&t| (t, EntailmentLabel::ALL.iter().map(|&p| (p, 0)).collect()))
                .collect();
        let mut predicted_distribution = BTreeMap::new();
        let mut true_distribution = BTreeMap::new();
        let mut correct = 0;
        for (&p, &t) in predicted.iter().zip(truth) {
            if p == t {
                correct += 1;
            }
            if let Some(cell) = confusion.get_mut(&t).and_then(|row| row.get_mut(&p)) {
                *cell += 1;
            }
            *predicted_distribution.entry(p).or_insert(0) += 1;
            *true_distribution.entry(t).or_insert(0) += 1;
        }

        let per_label: BTreeMap<EntailmentLabel, LabelScores> = EntailmentLabel::ALL
            .iter()
            .map(|&label| (label, label_scores(predicted, truth, label)))
            .collect();
        let n = EntailmentLabel::ALL.len() as f64;
        let macro_precision = per_label.values().map(|s| s.precision).sum::<f64>() / n;
        let macro_recall = per_label.values().map(|s| s.recall).sum::<f64>() / n;
        let macro_f1 = per_label.values().map(|s| s.f1).sum::<f64>() / n;

        Ok(Self {
            accuracy: correct as f64 / predicted.len() as f64,
            total_predictions: predicted.len(),
            per_label,
            macro_precision,
            macro_recall,
            macro_f1,
            confusion,
            predicted_distribution,
            true_distribution,
        })
    }

    /// Like [`NliMetrics::from_labels`], normalizing raw label strings first.
    pub fn from_raw<S: AsRef<str>>(predicted: &[S], truth: &[S]) -> ClimacheckResult<Self> {
        let predicted = predicted
            .iter()
            .map(|s| normalize_label(s.as_ref()))
            .collect::<ClimacheckResult<Vec<_>>>()?;
        let truth = truth
            .iter()
            .map(|s| normalize_label(s.as_ref()))
            .collect::<ClimacheckResult<Vec<_>>>()?;
        Self::from_labels(&predicted, &truth)
    }

    /// From `(predicted, true)` pairs.
    pub fn from_pairs(pairs: &[(EntailmentLabel, EntailmentLabel)]) -> ClimacheckResult<Self> {
        let (predicted, truth): (Vec<_>, Vec<_>) = pairs.iter().copied().unzip();
        Self::from_labels(&predicted, &truth)
    }

    pub fn scores(&self, label: EntailmentLabel) -> LabelScores {
        self.per_label.get(&label).copied().unwrap_or_default()
    }

    pub fn confusion_count(&self, truth: EntailmentLabel, predicted: EntailmentLabel) -> usize {
        self.confusion
            .get(&truth)
            .and_then(|row| row.get(&predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "NLI EVALUATION SUMMARY\n=====================\nTotal Predictions: {}\nOverall Accuracy: {:.4}\n\n\
             MACRO AVERAGES\n--------------\nPrecision: {:.4}\nRecall: {:.4}\nF1-Score: {:.4}\n\n\
             PER-CLASS METRICS\n-----------------",
            self.total_predictions, self.accuracy, self.macro_precision, self.macro_recall, self.macro_f1
        );
        for label in EntailmentLabel::ALL {
            let s = self.scores(label);
            let _ = write!(
                out,
                "\n{}:\n  Precision: {:.4}\n  Recall: {:.4}\n  F1-Score: {:.4}",
                label.as_str().to_uppercase(),
                s.precision,
                s.recall,
                s.f1
            );
        }
        out.push_str("\n\nCONFUSION MATRIX\n----------------\nTrue\\Predicted\tENT\tCON\tNEU");
        for truth in EntailmentLabel::ALL {
            let _ = write!(out, "\n{}\t", &truth.as_str()[..3].to_uppercase());
            for predicted in EntailmentLabel::ALL {
                let _ = write!(out, "\t{}", self.confusion_count(truth, predicted));
            }
        }
        out
    }
}

fn label_scores(
    predicted: &[EntailmentLabel],
    truth: &[EntailmentLabel],
    label: EntailmentLabel,
) -> LabelScores {
    let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
    for (&p, &t) in predicted.iter().zip(truth) {
        match (p == label, t == label) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => {}
        }
    }
    let ratio = |num: usize, den: usize| if den > 0 { num as f64 / den as f64 } else { 0.0 };
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    LabelScores {
        precision,
        recall,
        f1,
    }
}
