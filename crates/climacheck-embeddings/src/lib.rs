//! # climacheck-embeddings
//!
//! Query and passage embeddings for the similarity stages.
//!
//! Providers implement `IEmbeddingProvider`. [`LazyEmbedder`] builds the
//! configured provider at most once and remembers a failed build;
//! [`FallbackEmbedder`] runs batches on a bounded pool, caches results, and
//! substitutes a zero vector for every call that fails.

pub mod cache;
pub mod fallback;
pub mod lazy;
pub mod providers;

pub use cache::EmbeddingCache;
pub use fallback::FallbackEmbedder;
pub use lazy::LazyEmbedder;
pub use providers::{create_provider, HashedEmbeddingProvider, HttpEmbeddingProvider};
