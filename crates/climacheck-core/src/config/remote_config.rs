use serde::{Deserialize, Serialize};

use super::defaults;

/// Limits applied to every remote-bound unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Worker threads in the bounded pool that issues remote calls.
    pub max_concurrency: usize,
    /// Per-request HTTP timeout. There is no batch-level timeout.
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            max_concurrency: defaults::DEFAULT_MAX_CONCURRENCY,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
