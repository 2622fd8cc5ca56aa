//! # climacheck-observability
//!
//! Subscriber setup, span definitions per operation, structured events,
//! degradation tracking, and a bounded log of pipeline runs.

pub mod degradation;
pub mod run_log;
pub mod tracing_setup;

pub use degradation::{ComponentHealth, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use run_log::{RunLog, RunLogEntry};
