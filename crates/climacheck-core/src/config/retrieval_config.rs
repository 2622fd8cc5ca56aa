use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::defaults;
use crate::errors::{ClimacheckError, ClimacheckResult};

const PASSAGES_PATH_KEYS: [&str; 2] = ["passagesPath", "passages_path"];
const CONCEPT_INDEX_PATH_KEYS: [&str; 2] = ["conceptIndexPath", "concept_index_path"];
const HYBRID_TOP_K_KEYS: [&str; 2] = ["hybridRetrievalTopK", "hybrid_retrieval_top_k"];
const SEMANTIC_TOP_K_KEYS: [&str; 2] = ["semanticSearchTopK", "semantic_search_top_k"];

/// Retrieval configuration as written in TOML. Paths may be absent here and
/// supplied later, so they are only enforced by [`RetrievalConfig::resolve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub passages_path: Option<PathBuf>,
    pub concept_index_path: Option<PathBuf>,
    /// Cut applied after the hybrid re-rank (never above 3).
    pub hybrid_retrieval_top_k: usize,
    /// Cut applied to whole-corpus similarity search.
    pub semantic_search_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            passages_path: None,
            concept_index_path: None,
            hybrid_retrieval_top_k: defaults::DEFAULT_HYBRID_RETRIEVAL_TOP_K,
            semantic_search_top_k: defaults::DEFAULT_SEMANTIC_SEARCH_TOP_K,
        }
    }
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub passages_path: PathBuf,
    pub concept_index_path: PathBuf,
    pub hybrid_retrieval_top_k: usize,
    pub semantic_search_top_k: usize,
}

impl RetrievalConfig {
    /// Parse the opaque key/value bag a caller hands to the pipeline.
    ///
    /// Keys are accepted in camelCase or snake_case. Unrecognized keys are
    /// ignored. A recognized key with the wrong value type is a config error.
    pub fn from_bag(bag: &Map<String, Value>) -> ClimacheckResult<Self> {
        Ok(Self {
            passages_path: bag_path(bag, &PASSAGES_PATH_KEYS)?,
            concept_index_path: bag_path(bag, &CONCEPT_INDEX_PATH_KEYS)?,
            hybrid_retrieval_top_k: bag_usize(bag, &HYBRID_TOP_K_KEYS)?
                .unwrap_or(defaults::DEFAULT_HYBRID_RETRIEVAL_TOP_K),
            semantic_search_top_k: bag_usize(bag, &SEMANTIC_TOP_K_KEYS)?
                .unwrap_or(defaults::DEFAULT_SEMANTIC_SEARCH_TOP_K),
        })
    }

    /// Enforce the required paths.
    pub fn resolve(&self) -> ClimacheckResult<RunConfig> {
        let passages_path = self.passages_path.clone().ok_or_else(|| {
            ClimacheckError::ConfigError(format!("missing required key {}", PASSAGES_PATH_KEYS[0]))
        })?;
        let concept_index_path = self.concept_index_path.clone().ok_or_else(|| {
            ClimacheckError::ConfigError(format!(
                "missing required key {}",
                CONCEPT_INDEX_PATH_KEYS[0]
            ))
        })?;
        Ok(RunConfig {
            passages_path,
            concept_index_path,
            hybrid_retrieval_top_k: self.hybrid_retrieval_top_k,
            semantic_search_top_k: self.semantic_search_top_k,
        })
    }
}

impl RunConfig {
    /// Shorthand for `RetrievalConfig::from_bag(bag)?.resolve()`.
    pub fn from_bag(bag: &Map<String, Value>) -> ClimacheckResult<Self> {
        RetrievalConfig::from_bag(bag)?.resolve()
    }
}

fn lookup<'a>(bag: &'a Map<String, Value>, keys: &[&str]) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|k| bag.get_key_value(*k))
        .map(|(k, v)| (k.as_str(), v))
}

fn bag_path(bag: &Map<String, Value>, keys: &[&str]) -> ClimacheckResult<Option<PathBuf>> {
    match lookup(bag, keys) {
        None | Some((_, Value::Null)) => Ok(None),
        Some((_, Value::String(s))) if s.trim().is_empty() => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(PathBuf::from(s))),
        Some((key, other)) => Err(ClimacheckError::ConfigError(format!(
            "{key} must be a string, got {other}"
        ))),
    }
}

fn bag_usize(bag: &Map<String, Value>, keys: &[&str]) -> ClimacheckResult<Option<usize>> {
    match lookup(bag, keys) {
        None | Some((_, Value::Null)) => Ok(None),
        Some((key, value)) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| {
                ClimacheckError::ConfigError(format!(
                    "{key} must be a non-negative integer, got {value}"
                ))
            }),
    }
}
