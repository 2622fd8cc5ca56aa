/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("resource unavailable: {resource} ({reason})")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("stage {stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("worker pool could not be built: {reason}")]
    PoolBuildFailed { reason: String },
}
