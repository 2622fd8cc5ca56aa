//! Entailment evaluation over the gold fixture with scripted classifiers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use climacheck_core::errors::{ClimacheckResult, RemoteServiceError};
use climacheck_core::models::{EntailmentLabel, GoldEntry, Passage};
use climacheck_core::traits::IEntailmentClassifier;
use climacheck_eval::{load_gold_set, NliEvaluator};
use climacheck_retrieval::Corpus;

/// Contradiction for premises mentioning "retreat", neutral for "Sea", a
/// failure for "boom", entailment otherwise.
struct ScriptedClassifier {
    calls: Arc<AtomicUsize>,
}

impl IEntailmentClassifier for ScriptedClassifier {
    fn classify(&self, premise: &str, _hypothesis: &str) -> ClimacheckResult<EntailmentLabel> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if premise.contains("boom") {
            return Err(RemoteServiceError::RequestFailed {
                service: "entailment".into(),
                reason: "HTTP 503".into(),
            }
            .into());
        }
        if premise.contains("retreat") {
            Ok(EntailmentLabel::Contradiction)
        } else if premise.contains("Sea") {
            Ok(EntailmentLabel::Neutral)
        } else {
            Ok(EntailmentLabel::Entailment)
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn evaluator(passages: Vec<Passage>, calls: Arc<AtomicUsize>) -> NliEvaluator {
    let classifier: Arc<dyn IEntailmentClassifier> = Arc::new(ScriptedClassifier { calls });
    NliEvaluator::new(classifier, Arc::new(Corpus::from_passages(passages)))
}

fn fixture_corpus() -> Vec<Passage> {
    vec![
        Passage::new("p1", "CO2 levels rising"),
        Passage::new("p2", "Sea level rise accelerating"),
        Passage::new("p5", "Glaciers in Greenland are retreating"),
    ]
}

fn gold() -> Vec<GoldEntry> {
    load_gold_set(&test_fixtures::fixture_path("golden/gold/gold_set.jsonl"))
        .unwrap()
        .0
}

#[test]
fn labeled_entries_need_evidence_and_label() {
    let e = evaluator(fixture_corpus(), Arc::default());
    let gold = gold();
    let ids: Vec<&str> = e.labeled_entries(&gold).iter().map(|g| g.id.as_str()).collect();
    // g3 is a control and g4 has evidence but no label.
    assert_eq!(ids, vec!["g1", "g2", "g5"]);
}

#[test]
fn gold_fixture_scores_classifier_and_reports_missing_evidence() {
    let calls = Arc::new(AtomicUsize::new(0));
    let e = evaluator(fixture_corpus(), calls.clone());

    let evaluation = e.evaluate(&gold()).unwrap();

    assert_eq!(evaluation.classifier, "scripted");
    assert_eq!(evaluation.missing_evidence, vec!["g2".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let got: Vec<(&str, EntailmentLabel, EntailmentLabel)> = evaluation
        .predictions
        .iter()
        .map(|p| (p.id.as_str(), p.predicted, p.expected))
        .collect();
    assert_eq!(
        got,
        vec![
            ("g1", EntailmentLabel::Neutral, EntailmentLabel::Entailment),
            ("g5", EntailmentLabel::Contradiction, EntailmentLabel::Contradiction),
        ]
    );

    let metrics = &evaluation.metrics;
    assert_eq!(metrics.total_predictions, 2);
    assert!((metrics.accuracy - 0.5).abs() < 1e-12);
    assert_eq!(
        metrics.confusion_count(EntailmentLabel::Entailment, EntailmentLabel::Neutral),
        1
    );
}

#[test]
fn premise_is_passage_text_and_hypothesis_is_claim() {
    let e = evaluator(fixture_corpus(), Arc::default());
    let gold = vec![GoldEntry::new("x1", "  Greenland glaciers are advancing ")
        .with_evidence("p5")
        .with_entailment("refutes")];
    let (cases, missing) = e.prepare_cases(&gold).unwrap();
    assert!(missing.is_empty());
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].premise, "Glaciers in Greenland are retreating");
    assert_eq!(cases[0].claim, "Greenland glaciers are advancing");
    assert_eq!(cases[0].expected, EntailmentLabel::Contradiction);
}

#[test]
fn classifier_failure_aborts_evaluation() {
    let e = evaluator(vec![Passage::new("p1", "boom")], Arc::default());
    let gold = vec![GoldEntry::new("x1", "anything")
        .with_evidence("p1")
        .with_entailment("neutral")];
    assert!(e.evaluate(&gold).is_err());
}

#[test]
fn unrecognized_gold_label_is_rejected() {
    let e = evaluator(fixture_corpus(), Arc::default());
    let gold = vec![GoldEntry::new("x1", "claim")
        .with_evidence("p1")
        .with_entailment("maybe")];
    assert!(e.prepare_cases(&gold).is_err());
}

#[test]
fn nothing_to_score_is_an_error() {
    let e = evaluator(Vec::new(), Arc::default());
    assert!(e.evaluate(&gold()).is_err());
}

#[test]
fn max_entries_limits_in_gold_order_and_report_is_written() {
    let calls = Arc::new(AtomicUsize::new(0));
    let e = evaluator(fixture_corpus(), calls.clone()).with_max_entries(1);
    let evaluation = e.evaluate(&gold()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(evaluation.predictions[0].id, "g1");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("nli.json");
    NliEvaluator::save_report(&evaluation, &path).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["classifier"], "scripted");
    assert_eq!(written["metrics"]["total_predictions"], 1);
}
