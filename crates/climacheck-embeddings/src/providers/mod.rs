//! Embedding provider implementations.

mod hashed_provider;
mod http_provider;

use std::sync::Arc;
use std::time::Duration;

use climacheck_core::config::{EmbeddingConfig, EmbeddingProviderKind, RemoteConfig};
use climacheck_core::errors::ClimacheckResult;
use climacheck_core::traits::IEmbeddingProvider;

pub use hashed_provider::HashedEmbeddingProvider;
pub use http_provider::{HttpEmbeddingProvider, HttpEmbeddingSettings};

/// Build the provider named by `config.provider`.
///
/// The HTTP provider reads its settings from the environment variables the
/// config names; a missing or invalid setting is an error here and leaves
/// the caller to degrade.
pub fn create_provider(
    config: &EmbeddingConfig,
    remote: &RemoteConfig,
) -> ClimacheckResult<Arc<dyn IEmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderKind::Hashed => {
            Ok(Arc::new(HashedEmbeddingProvider::new(config.dimensions)))
        }
        EmbeddingProviderKind::Http => {
            let settings = HttpEmbeddingSettings::from_env(config)?;
            let provider = HttpEmbeddingProvider::new(
                settings,
                config.dimensions,
                Duration::from_secs(remote.request_timeout_secs),
            )?;
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_kind_needs_no_environment() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderKind::Hashed,
            dimensions: 32,
            ..EmbeddingConfig::default()
        };
        let provider = create_provider(&config, &RemoteConfig::default()).unwrap();
        assert_eq!(provider.dimensions(), 32);
        assert_eq!(provider.name(), "hashed");
    }

    #[test]
    fn http_kind_without_environment_fails() {
        let config = EmbeddingConfig {
            endpoint_env: "CLIMACHECK_TEST_UNSET_ENDPOINT".into(),
            api_key_env: "CLIMACHECK_TEST_UNSET_KEY".into(),
            deployment_env: "CLIMACHECK_TEST_UNSET_DEPLOYMENT".into(),
            api_version_env: "CLIMACHECK_TEST_UNSET_VERSION".into(),
            ..EmbeddingConfig::default()
        };
        assert!(create_provider(&config, &RemoteConfig::default()).is_err());
    }
}
