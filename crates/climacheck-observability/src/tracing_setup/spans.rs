//! Span definitions per operation.

/// Span around one pipeline run.
#[macro_export]
macro_rules! retrieval_span {
    ($queries:expr) => {
        tracing::info_span!("climacheck.retrieval", queries = $queries)
    };
}

/// Span around one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr) => {
        tracing::info_span!("climacheck.stage", stage = %$stage)
    };
}

/// Span around a concept index build.
#[macro_export]
macro_rules! index_build_span {
    ($records:expr) => {
        tracing::info_span!("climacheck.index_build", records = $records)
    };
}

/// Span around a batch of embedding calls.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $batch:expr) => {
        tracing::info_span!("climacheck.embedding", provider = %$provider, batch = $batch)
    };
}

/// Span around a contradiction detection batch.
#[macro_export]
macro_rules! entailment_span {
    ($classifier:expr, $tasks:expr) => {
        tracing::info_span!("climacheck.entailment", classifier = %$classifier, tasks = $tasks)
    };
}

/// Span around one evaluation invocation.
#[macro_export]
macro_rules! evaluation_span {
    ($method:expr, $pairs:expr) => {
        tracing::info_span!("climacheck.evaluation", method = %$method, pairs = $pairs)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "climacheck.retrieval";
    pub const STAGE: &str = "climacheck.stage";
    pub const INDEX_BUILD: &str = "climacheck.index_build";
    pub const EMBEDDING: &str = "climacheck.embedding";
    pub const ENTAILMENT: &str = "climacheck.entailment";
    pub const EVALUATION: &str = "climacheck.evaluation";
}
