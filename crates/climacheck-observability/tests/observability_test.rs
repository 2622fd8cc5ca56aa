//! Subscriber installation and span macros.

use climacheck_core::config::ObservabilityConfig;
use climacheck_observability::tracing_setup::{self, spans::names};

#[test]
fn second_init_reports_error_instead_of_panicking() {
    let config = ObservabilityConfig::default();
    // Another test binary thread may have installed one already; either way
    // the second attempt must fail cleanly.
    let _ = tracing_setup::init_tracing(&config);
    assert!(tracing_setup::init_tracing_with_filter("debug").is_err());
}

#[test]
fn span_macros_use_named_targets() {
    let span = climacheck_observability::retrieval_span!(3usize);
    if let Some(meta) = span.metadata() {
        assert_eq!(meta.name(), names::RETRIEVAL);
    }
    let stage = climacheck_observability::stage_span!("hybrid");
    if let Some(meta) = stage.metadata() {
        assert_eq!(meta.name(), names::STAGE);
    }
    let _entered = climacheck_observability::evaluation_span!("pattern", 10usize).entered();
    tracing_setup::events::stage_completed("final", 1, 2, 3);
}
