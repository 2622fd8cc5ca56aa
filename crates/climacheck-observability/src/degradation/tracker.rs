//! History of fallbacks taken across runs.
//!
//! Components report under stable names (`corpus`, `concept_index`,
//! `embeddings`, `entailment`). A component stays degraded until someone
//! marks it recovered, typically after a run where it produced real output.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use climacheck_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

/// One recorded fallback and its recovery state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl TrackedDegradation {
    pub fn is_active(&self) -> bool {
        self.recovery_status == RecoveryStatus::Active
    }
}

/// Roll-up of one component's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHealth {
    pub component: String,
    pub total: usize,
    pub active: usize,
    pub last_failure: String,
    pub last_fallback: String,
    pub last_seen: DateTime<Utc>,
}

impl ComponentHealth {
    pub fn is_degraded(&self) -> bool {
        self.active > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    history: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        self.history.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    pub fn record_all(&mut self, batch: impl IntoIterator<Item = DegradationEvent>) {
        batch.into_iter().for_each(|event| self.record(event));
    }

    /// Close every open degradation of `component`. Returns how many were
    /// closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for entry in self
            .history
            .iter_mut()
            .filter(|t| t.is_active() && t.event.component == component)
        {
            entry.recovery_status = RecoveryStatus::Recovered;
            entry.recovered_at = Some(now);
            closed += 1;
        }
        closed
    }

    pub fn history(&self) -> &[TrackedDegradation] {
        &self.history
    }

    pub fn active(&self) -> impl Iterator<Item = &TrackedDegradation> {
        self.history.iter().filter(|t| t.is_active())
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.active().any(|t| t.event.component == component)
    }

    /// Recorded fallbacks per component, keyed in name order.
    pub fn counts_by_component(&self) -> BTreeMap<&str, usize> {
        self.history.iter().fold(BTreeMap::new(), |mut acc, t| {
            *acc.entry(t.event.component.as_str()).or_insert(0) += 1;
            acc
        })
    }

    /// Fallbacks recorded for `component` within the last `window`.
    pub fn count_within(&self, component: &str, window: Duration) -> usize {
        let since = Utc::now() - window;
        self.history
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp >= since)
            .count()
    }

    /// One roll-up per component that has ever degraded, in name order.
    pub fn summary(&self) -> Vec<ComponentHealth> {
        let mut by_component: BTreeMap<&str, ComponentHealth> = BTreeMap::new();
        for t in &self.history {
            let health = by_component
                .entry(t.event.component.as_str())
                .or_insert_with(|| ComponentHealth {
                    component: t.event.component.clone(),
                    total: 0,
                    active: 0,
                    last_failure: String::new(),
                    last_fallback: String::new(),
                    last_seen: t.event.timestamp,
                });
            health.total += 1;
            if t.is_active() {
                health.active += 1;
            }
            if t.event.timestamp >= health.last_seen {
                health.last_seen = t.event.timestamp;
                health.last_failure = t.event.failure.clone();
                health.last_fallback = t.event.fallback_used.clone();
            }
        }
        by_component.into_values().collect()
    }
}
