//! Read-only inputs shared by every stage of a run.

use std::path::Path;
use std::sync::Arc;

use climacheck_concepts::ConceptIndex;
use climacheck_core::config::RunConfig;
use climacheck_core::errors::ClimacheckError;
use climacheck_core::models::{DegradationEvent, Resource};
use tracing::warn;

use crate::corpus::Corpus;

/// Corpus and concept index snapshots, each of which may be unavailable.
#[derive(Debug, Clone)]
pub struct RetrievalResources {
    pub corpus: Resource<Arc<Corpus>>,
    pub index: Resource<Arc<ConceptIndex>>,
}

impl RetrievalResources {
    /// Load both inputs concurrently.
    pub fn load(run: &RunConfig) -> Self {
        let (corpus, index) = rayon::join(
            || Corpus::open(&run.passages_path),
            || open_index(&run.concept_index_path),
        );
        Self { corpus, index }
    }

    pub fn ready(corpus: Corpus, index: ConceptIndex) -> Self {
        Self {
            corpus: Resource::Ready(Arc::new(corpus)),
            index: Resource::Ready(Arc::new(index)),
        }
    }

    /// Why the concept stages cannot run, if they cannot.
    pub fn concept_stage_blocker(&self) -> Option<String> {
        self.corpus
            .reason()
            .or_else(|| self.index.reason())
            .map(str::to_string)
    }

    /// One event per unavailable input.
    pub fn degradation_events(&self) -> Vec<DegradationEvent> {
        let mut events = Vec::new();
        if let Some(reason) = self.corpus.reason() {
            events.push(DegradationEvent::now("corpus", reason, "empty_results"));
        }
        if let Some(reason) = self.index.reason() {
            events.push(DegradationEvent::now("concept_index", reason, "empty_results"));
        }
        events
    }
}

/// Load the concept index artifact. Missing, unparseable, and empty indexes
/// are all reported as unavailable.
pub fn open_index(path: &Path) -> Resource<Arc<ConceptIndex>> {
    if !path.exists() {
        warn!(path = %path.display(), "concept index not found");
        return Resource::unavailable(format!("concept index not found: {}", path.display()));
    }
    match ConceptIndex::load(path) {
        Ok(index) if index.is_empty() => {
            warn!(path = %path.display(), "concept index is empty");
            Resource::unavailable(format!("concept index is empty: {}", path.display()))
        }
        Ok(index) => Resource::Ready(Arc::new(index)),
        Err(ClimacheckError::DataError(e)) => {
            warn!(path = %path.display(), error = %e, "concept index malformed");
            Resource::unavailable(e.to_string())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "concept index unreadable");
            Resource::unavailable(e.to_string())
        }
    }
}
