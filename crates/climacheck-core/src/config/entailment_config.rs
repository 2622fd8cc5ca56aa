use serde::{Deserialize, Serialize};

use super::defaults;

/// Entailment classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntailmentConfig {
    pub endpoint_env: String,
    pub api_key_env: String,
}

impl Default for EntailmentConfig {
    fn default() -> Self {
        Self {
            endpoint_env: defaults::DEFAULT_ENTAILMENT_ENDPOINT_ENV.to_string(),
            api_key_env: defaults::DEFAULT_ENTAILMENT_API_KEY_ENV.to_string(),
        }
    }
}
