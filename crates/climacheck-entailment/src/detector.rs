//! Contradiction detection over a batch of claims and their evidence.
//!
//! Every (claim, passage) pair is one classification task. Tasks run on a
//! dedicated pool of `remote.max_concurrency` threads and fail independently:
//! a failed call counts as neutral.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use climacheck_core::config::ClimacheckConfig;
use climacheck_core::errors::{ClimacheckResult, RetrievalError};
use climacheck_core::models::{DegradationEvent, EntailmentLabel, Passage, Resource};
use climacheck_core::traits::IEntailmentClassifier;
use climacheck_observability::tracing_setup::events;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{info, warn};

use crate::http_classifier::{HttpEntailmentClassifier, HttpEntailmentSettings};
use crate::models::{ContradictionEvidence, ContradictionResult};

const COMPONENT: &str = "entailment";
const UNKNOWN_SOURCE: &str = "Unknown source";

struct NliTask<'a> {
    query_idx: usize,
    passage: &'a Passage,
}

pub struct ContradictionDetector {
    classifier: Resource<Arc<dyn IEntailmentClassifier>>,
    pool: rayon::ThreadPool,
    failures: AtomicUsize,
    events: Mutex<Vec<DegradationEvent>>,
}

impl ContradictionDetector {
    pub fn new(
        classifier: Resource<Arc<dyn IEntailmentClassifier>>,
        max_concurrency: usize,
    ) -> ClimacheckResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_concurrency.max(1))
            .thread_name(|i| format!("climacheck-nli-{i}"))
            .build()
            .map_err(|e| RetrievalError::PoolBuildFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            classifier,
            pool,
            failures: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
        })
    }

    /// HTTP classifier from the environment named in `[entailment]`. A
    /// missing or invalid configuration leaves the detector without a
    /// classifier instead of failing.
    pub fn from_config(config: &ClimacheckConfig) -> ClimacheckResult<Self> {
        let timeout = Duration::from_secs(config.remote.request_timeout_secs);
        let classifier = match HttpEntailmentSettings::from_env(&config.entailment)
            .and_then(|settings| HttpEntailmentClassifier::new(settings, timeout))
        {
            Ok(c) => Resource::Ready(Arc::new(c) as Arc<dyn IEntailmentClassifier>),
            Err(e) => {
                warn!(error = %e, "entailment classifier unavailable");
                Resource::unavailable(e.to_string())
            }
        };
        Self::new(classifier, config.remote.max_concurrency)
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_ready()
    }

    /// One result per query, in query order.
    ///
    /// `retrieved[i]` holds the evidence for `queries[i]`; a query with no
    /// evidence list gets an empty result. Passages with blank text are not
    /// classified.
    pub fn detect(&self, queries: &[String], retrieved: &[Vec<Passage>]) -> Vec<ContradictionResult> {
        if queries.len() != retrieved.len() {
            warn!(
                queries = queries.len(),
                evidence_sets = retrieved.len(),
                "query and evidence counts differ"
            );
        }
        let Some(classifier) = self.classifier.ready() else {
            warn!(
                reason = self.classifier.reason().unwrap_or_default(),
                "no entailment classifier, reporting no contradictions"
            );
            return queries.iter().map(ContradictionResult::none).collect();
        };

        let tasks: Vec<NliTask<'_>> = retrieved
            .iter()
            .take(queries.len())
            .enumerate()
            .flat_map(|(query_idx, passages)| {
                passages
                    .iter()
                    .filter(|p| !p.text.trim().is_empty())
                    .map(move |passage| NliTask { query_idx, passage })
            })
            .collect();

        let span = climacheck_observability::entailment_span!(classifier.name(), tasks.len());
        let _guard = span.enter();
        info!(tasks = tasks.len(), "classifying claim/evidence pairs");

        let labels: Vec<EntailmentLabel> = self.pool.install(|| {
            tasks
                .par_iter()
                .map(|task| self.classify(classifier.as_ref(), &queries[task.query_idx], task.passage))
                .collect()
        });

        let mut grouped: Vec<Vec<ContradictionEvidence>> = vec![Vec::new(); queries.len()];
        for (task, label) in tasks.iter().zip(labels) {
            if label == EntailmentLabel::Contradiction {
                grouped[task.query_idx].push(ContradictionEvidence {
                    passage: task.passage.text.clone(),
                    source: source_of(task.passage),
                });
            }
        }

        let results: Vec<ContradictionResult> = queries
            .iter()
            .zip(grouped)
            .map(|(query, contradictions)| {
                if !contradictions.is_empty() {
                    events::contradiction_detected(query, contradictions.len());
                }
                ContradictionResult::new(query.clone(), contradictions)
            })
            .collect();
        info!(
            claims = results.len(),
            with_contradictions = results.iter().filter(|r| r.has_contradictions).count(),
            failures = self.failure_count(),
            "contradiction detection complete"
        );
        results
    }

    /// Calls that failed and were read as neutral.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn classify(
        &self,
        classifier: &dyn IEntailmentClassifier,
        claim: &str,
        passage: &Passage,
    ) -> EntailmentLabel {
        if claim.trim().is_empty() {
            return EntailmentLabel::Neutral;
        }
        match classifier.classify(&passage.text, claim) {
            Ok(label) => label,
            Err(e) => {
                warn!(passage = %passage.id, error = %e, "classification failed, reading as neutral");
                self.failures.fetch_add(1, Ordering::Relaxed);
                if let Ok(mut events) = self.events.lock() {
                    events.push(DegradationEvent::now(
                        COMPONENT,
                        format!("{}: {e}", classifier.name()),
                        "neutral",
                    ));
                }
                EntailmentLabel::Neutral
            }
        }
    }
}

fn source_of(passage: &Passage) -> Value {
    if passage.source.is_null() {
        Value::String(UNKNOWN_SOURCE.to_string())
    } else {
        passage.source.clone()
    }
}
