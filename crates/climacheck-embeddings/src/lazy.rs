//! Build-once provider handle.

use std::sync::{Arc, OnceLock};

use climacheck_core::config::ClimacheckConfig;
use climacheck_core::errors::ClimacheckResult;
use climacheck_core::models::Resource;
use climacheck_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

use crate::providers::create_provider;

type ProviderFactory = Box<dyn Fn() -> ClimacheckResult<Arc<dyn IEmbeddingProvider>> + Send + Sync>;

/// Runs its factory at most once, on first use, and shares the outcome.
///
/// A failed build is remembered as `Resource::Unavailable`; callers degrade
/// instead of retrying.
pub struct LazyEmbedder {
    factory: ProviderFactory,
    cell: OnceLock<Resource<Arc<dyn IEmbeddingProvider>>>,
}

impl LazyEmbedder {
    pub fn new(
        factory: impl Fn() -> ClimacheckResult<Arc<dyn IEmbeddingProvider>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            factory: Box::new(factory),
            cell: OnceLock::new(),
        }
    }

    /// Provider selected by `[embedding]`, built on first use.
    pub fn from_config(config: &ClimacheckConfig) -> Self {
        let embedding = config.embedding.clone();
        let remote = config.remote.clone();
        Self::new(move || create_provider(&embedding, &remote))
    }

    /// Wrap an already-built provider.
    pub fn ready(provider: Arc<dyn IEmbeddingProvider>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Resource::Ready(provider.clone()));
        Self {
            factory: Box::new(move || Ok(provider.clone())),
            cell,
        }
    }

    /// The build outcome, running the factory if nobody has yet.
    pub fn resource(&self) -> &Resource<Arc<dyn IEmbeddingProvider>> {
        self.cell.get_or_init(|| match (self.factory)() {
            Ok(provider) => {
                info!(provider = provider.name(), "embedding provider ready");
                Resource::Ready(provider)
            }
            Err(e) => {
                warn!(error = %e, "embedding provider unavailable, dependent stages will be empty");
                Resource::unavailable(e.to_string())
            }
        })
    }

    pub fn provider(&self) -> Option<Arc<dyn IEmbeddingProvider>> {
        self.resource().ready().cloned()
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.resource().reason()
    }

    /// Whether the factory has already run.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
