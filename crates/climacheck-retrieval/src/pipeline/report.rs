//! Timing and degradation summary of one pipeline run.

use std::time::Duration;

use climacheck_core::models::{DegradationEvent, RetrievalStage};
use climacheck_observability::{DegradationTracker, RunLogEntry};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: RetrievalStage,
    pub elapsed_ms: u64,
    /// Passages across all queries.
    pub passages: usize,
    /// Why the stage produced empty lists, if it was skipped.
    pub degraded: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub queries: usize,
    pub stages: Vec<StageReport>,
    /// Query embeddings replaced by a zero vector during this run.
    pub embedding_failures: usize,
    pub total_elapsed_ms: u64,
    pub degradations: Vec<DegradationEvent>,
}

impl RunReport {
    pub fn stage(&self, stage: RetrievalStage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn degraded_stages(&self) -> Vec<RetrievalStage> {
        self.stages
            .iter()
            .filter(|s| s.degraded.is_some())
            .map(|s| s.stage)
            .collect()
    }

    pub fn is_degraded(&self) -> bool {
        self.stages.iter().any(|s| s.degraded.is_some()) || self.embedding_failures > 0
    }

    pub fn record_degradations(&self, tracker: &mut DegradationTracker) {
        tracker.record_all(self.degradations.iter().cloned());
    }

    pub fn to_log_entry(&self) -> RunLogEntry {
        let final_passages = self
            .stage(RetrievalStage::Final)
            .map(|s| s.passages)
            .unwrap_or(0);
        RunLogEntry::new(
            self.queries,
            Duration::from_millis(self.total_elapsed_ms),
            final_passages,
            self.embedding_failures,
            self.degraded_stages()
                .into_iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        )
    }
}
