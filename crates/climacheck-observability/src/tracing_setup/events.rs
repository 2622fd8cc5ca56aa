//! Structured log events for key operations.

/// A pipeline stage finished.
pub fn stage_completed(stage: &str, queries: usize, passages: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "stage_completed",
        stage = %stage,
        queries,
        passages,
        elapsed_ms,
        "stage completed"
    );
}

/// A stage produced empty output because an input was unavailable.
pub fn stage_degraded(stage: &str, reason: &str) {
    tracing::warn!(
        event = "stage_degraded",
        stage = %stage,
        reason = %reason,
        "stage degraded to empty output"
    );
}

/// A component switched to its fallback.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Contradicting evidence found for a claim.
pub fn contradiction_detected(claim: &str, passages: usize) {
    tracing::info!(
        event = "contradiction_detected",
        claim = %claim,
        passages,
        "contradiction detected"
    );
}

/// A line of an input file was skipped.
pub fn record_skipped(file: &str, line: usize, reason: &str) {
    tracing::warn!(
        event = "record_skipped",
        file = %file,
        line,
        reason = %reason,
        "skipping malformed record"
    );
}
