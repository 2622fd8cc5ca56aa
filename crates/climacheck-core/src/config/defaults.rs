//! Default values for every config section.

// Retrieval
pub const DEFAULT_HYBRID_RETRIEVAL_TOP_K: usize = 5;
pub const DEFAULT_SEMANTIC_SEARCH_TOP_K: usize = 5;

// Embedding
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_EMBEDDING_CACHE_ENTRIES: u64 = 10_000;
pub const DEFAULT_EMBEDDING_ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";
pub const DEFAULT_EMBEDDING_DEPLOYMENT_ENV: &str = "AZURE_OPENAI_EMBEDDING_DEPLOYMENT";
pub const DEFAULT_EMBEDDING_API_VERSION_ENV: &str = "AZURE_OPENAI_API_VERSION";

// Entailment
pub const DEFAULT_ENTAILMENT_ENDPOINT_ENV: &str = "AZURE_INFERENCE_ENDPOINT";
pub const DEFAULT_ENTAILMENT_API_KEY_ENV: &str = "AZURE_INFERENCE_CREDENTIAL";

// Remote calls
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
