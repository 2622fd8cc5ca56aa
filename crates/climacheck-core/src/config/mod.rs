//! Layered configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so an empty TOML
//! document yields a fully defaulted config. The retrieval section is also
//! reachable from the untyped key/value bag pipeline callers pass in.

pub mod defaults;
mod embedding_config;
mod entailment_config;
mod observability_config;
mod remote_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ClimacheckError, ClimacheckResult};

pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind};
pub use entailment_config::EntailmentConfig;
pub use observability_config::ObservabilityConfig;
pub use remote_config::RemoteConfig;
pub use retrieval_config::{RetrievalConfig, RunConfig};

/// Top-level configuration for a climacheck deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimacheckConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub entailment: EntailmentConfig,
    pub remote: RemoteConfig,
    pub observability: ObservabilityConfig,
}

impl ClimacheckConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> ClimacheckResult<Self> {
        toml::from_str(source).map_err(|e| ClimacheckError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> ClimacheckResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClimacheckError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> ClimacheckResult<String> {
        toml::to_string(self).map_err(|e| ClimacheckError::ConfigError(e.to_string()))
    }
}
