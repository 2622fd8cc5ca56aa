//! Tracing setup: subscriber initialization, span definitions, event helpers.

pub mod events;
pub mod spans;

use climacheck_core::config::ObservabilityConfig;
use climacheck_core::errors::{ClimacheckError, ClimacheckResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "CLIMACHECK_LOG";

fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// `CLIMACHECK_LOG` wins over `config.log_level`. Fails if a global subscriber
/// is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> ClimacheckResult<()> {
    let filter = filter_for(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ClimacheckError::ConfigError(format!("tracing init failed: {e}")))
}

/// Install a plain-text subscriber with an explicit filter, for tests and tools.
pub fn init_tracing_with_filter(filter: &str) -> ClimacheckResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init()
        .map_err(|e| ClimacheckError::ConfigError(format!("tracing init failed: {e}")))
}
