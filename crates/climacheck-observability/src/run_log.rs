//! Pipeline run log: batch size, latency, output size, remote failures,
//! degraded stages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub queries: usize,
    pub latency: Duration,
    pub final_passages: usize,
    pub embedding_failures: usize,
    pub degraded_stages: Vec<String>,
    pub timestamp_epoch_ms: i64,
}

impl RunLogEntry {
    pub fn new(
        queries: usize,
        latency: Duration,
        final_passages: usize,
        embedding_failures: usize,
        degraded_stages: Vec<String>,
    ) -> Self {
        Self {
            queries,
            latency,
            final_passages,
            embedding_failures,
            degraded_stages,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only, capacity-bounded; the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct RunLog {
    entries: Vec<RunLogEntry>,
    max_entries: usize,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: RunLogEntry) {
        tracing::debug!(
            event = "run_logged",
            queries = entry.queries,
            latency_ms = entry.latency.as_millis() as u64,
            final_passages = entry.final_passages,
            embedding_failures = entry.embedding_failures,
            degraded = ?entry.degraded_stages,
            "pipeline run logged"
        );
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[RunLogEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at percentile `p` in `[0, 1]`, nearest rank.
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    /// Runs in which at least one stage was degraded.
    pub fn degraded_runs(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.degraded_stages.is_empty())
            .count()
    }
}
