//! Bounded, failure-tolerant batch embedding.
//!
//! Every text is embedded independently on a dedicated pool sized by
//! `remote.max_concurrency`. A call that fails, or a blank text, yields a zero
//! vector of the configured dimension so one bad item never sinks a batch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use climacheck_core::config::ClimacheckConfig;
use climacheck_core::errors::{ClimacheckResult, RetrievalError};
use climacheck_core::models::DegradationEvent;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cache::EmbeddingCache;
use crate::lazy::LazyEmbedder;

const COMPONENT: &str = "embeddings";
const FALLBACK: &str = "zero_vector";

pub struct FallbackEmbedder {
    lazy: Arc<LazyEmbedder>,
    pool: rayon::ThreadPool,
    cache: EmbeddingCache,
    dimensions: usize,
    failures: AtomicUsize,
    events: Mutex<Vec<DegradationEvent>>,
}

impl FallbackEmbedder {
    pub fn new(
        lazy: Arc<LazyEmbedder>,
        dimensions: usize,
        max_concurrency: usize,
        cache_entries: u64,
    ) -> ClimacheckResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_concurrency.max(1))
            .thread_name(|i| format!("climacheck-embed-{i}"))
            .build()
            .map_err(|e| RetrievalError::PoolBuildFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            lazy,
            pool,
            cache: EmbeddingCache::new(cache_entries),
            dimensions,
            failures: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn from_config(config: &ClimacheckConfig) -> ClimacheckResult<Self> {
        Self::new(
            Arc::new(LazyEmbedder::from_config(config)),
            config.embedding.dimensions,
            config.remote.max_concurrency,
            config.embedding.cache_max_entries,
        )
    }

    /// Whether the provider was built and reports itself usable.
    pub fn is_available(&self) -> bool {
        self.lazy.provider().is_some_and(|p| p.is_available())
    }

    pub fn unavailable_reason(&self) -> Option<String> {
        match self.lazy.provider() {
            Some(p) if !p.is_available() => Some(format!("{} reports unavailable", p.name())),
            Some(_) => None,
            None => self.lazy.unavailable_reason().map(str::to_string),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; self.dimensions]
    }

    /// Embed one text, never failing.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        if text.trim().is_empty() {
            warn!("blank text, using zero vector");
            return self.zero_vector();
        }
        if let Some(hit) = self.cache.get(text) {
            debug!("embedding cache hit");
            return hit;
        }
        let Some(provider) = self.lazy.provider() else {
            self.record_failure("provider", "provider unavailable");
            return self.zero_vector();
        };
        match provider.embed(text) {
            Ok(v) => {
                self.cache.insert(text, v.clone());
                v
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "embedding failed, using zero vector");
                self.record_failure(provider.name(), &e.to_string());
                self.zero_vector()
            }
        }
    }

    /// Embed every text on the bounded pool. Output order matches input order.
    pub fn embed_all(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.pool
            .install(|| texts.par_iter().map(|t| self.embed(t)).collect())
    }

    /// Calls replaced by a zero vector because the provider failed.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn record_failure(&self, provider: &str, reason: &str) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut events) = self.events.lock() {
            events.push(DegradationEvent::now(
                COMPONENT,
                format!("{provider}: {reason}"),
                FALLBACK,
            ));
        }
    }
}
