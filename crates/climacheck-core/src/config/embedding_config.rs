use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Azure-OpenAI-style REST deployment.
    Http,
    /// Deterministic hashed term vectors, no network.
    Hashed,
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    /// Vector length. Also the length of the zero-vector fallback.
    pub dimensions: usize,
    /// Max entries held by the in-memory embedding cache.
    pub cache_max_entries: u64,
    /// Names of the environment variables holding the service settings.
    pub endpoint_env: String,
    pub api_key_env: String,
    pub deployment_env: String,
    pub api_version_env: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Http,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_max_entries: defaults::DEFAULT_EMBEDDING_CACHE_ENTRIES,
            endpoint_env: defaults::DEFAULT_EMBEDDING_ENDPOINT_ENV.to_string(),
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            deployment_env: defaults::DEFAULT_EMBEDDING_DEPLOYMENT_ENV.to_string(),
            api_version_env: defaults::DEFAULT_EMBEDDING_API_VERSION_ENV.to_string(),
        }
    }
}
