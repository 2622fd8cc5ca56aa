//! Degradation tracking.

pub mod tracker;

pub use tracker::{ComponentHealth, DegradationTracker, RecoveryStatus, TrackedDegradation};
