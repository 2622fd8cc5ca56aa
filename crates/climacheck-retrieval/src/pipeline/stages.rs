//! Per-stage work over a query batch. Each function returns exactly one list
//! per query, computed in parallel and kept in query order.

use climacheck_concepts::{ConceptIndexQuerier, IndexKind};
use climacheck_core::models::Passage;
use rayon::prelude::*;
use tracing::debug;

use crate::corpus::Corpus;
use crate::dedup::dedup_passages;
use crate::similarity::rank;

/// A stage's lists plus the reason it could not run, if it could not.
#[derive(Debug, Clone, Default)]
pub(crate) struct StageOutput {
    pub results: Vec<Vec<Passage>>,
    pub degraded: Option<String>,
}

impl StageOutput {
    pub fn ok(results: Vec<Vec<Passage>>) -> Self {
        Self {
            results,
            degraded: None,
        }
    }

    /// One empty list per query.
    pub fn degraded(queries: usize, reason: impl Into<String>) -> Self {
        Self {
            results: vec![Vec::new(); queries],
            degraded: Some(reason.into()),
        }
    }

    pub fn passage_count(&self) -> usize {
        self.results.iter().map(Vec::len).sum()
    }

    /// Copy of the lists with every embedding removed.
    pub fn stripped(&self) -> Vec<Vec<Passage>> {
        self.results
            .iter()
            .map(|list| list.iter().cloned().map(Passage::without_embedding).collect())
            .collect()
    }
}

/// Concepts → index → corpus passages, first `cap` in corpus order.
/// Embeddings are kept for the hybrid re-rank.
pub(crate) fn concept_lookup(
    queries: &[String],
    corpus: &Corpus,
    querier: &ConceptIndexQuerier,
    kind: IndexKind,
    cap: usize,
) -> Vec<Vec<Passage>> {
    queries
        .par_iter()
        .map(|query| {
            let matches = querier.query(query, kind);
            let mut passages = corpus.fetch_by_ids(&matches.sentence_ids);
            passages.truncate(cap);
            debug!(
                kind = ?kind,
                concepts = matches.total_concepts,
                sentence_ids = matches.sentence_ids.len(),
                passages = passages.len(),
                "concept lookup"
            );
            passages
        })
        .collect()
}

/// Top `top_k` corpus passages per query embedding, embeddings stripped.
pub(crate) fn semantic_search(
    embeddings: &[Vec<f32>],
    corpus: &Corpus,
    top_k: usize,
) -> Vec<Vec<Passage>> {
    embeddings
        .par_iter()
        .map(|embedding| {
            rank(embedding, corpus.passages(), top_k)
                .into_iter()
                .map(|(p, _)| p.clone().without_embedding())
                .collect()
        })
        .collect()
}

/// Union of the two concept lists, deduplicated and re-ranked against the
/// query embedding, embeddings stripped.
pub(crate) fn hybrid_rerank(
    pattern: &[Vec<Passage>],
    entity: &[Vec<Passage>],
    embeddings: &[Vec<f32>],
    top_k: usize,
) -> Vec<Vec<Passage>> {
    embeddings
        .par_iter()
        .enumerate()
        .map(|(i, embedding)| {
            let combined = dedup_passages(
                list(pattern, i)
                    .iter()
                    .chain(list(entity, i))
                    .cloned(),
            );
            if combined.is_empty() {
                return Vec::new();
            }
            rank(embedding, &combined, top_k)
                .into_iter()
                .map(|(p, _)| p.clone().without_embedding())
                .collect()
        })
        .collect()
}

/// Semantic results then hybrid results, deduplicated, first `cap` kept.
pub(crate) fn fuse(
    semantic: &[Vec<Passage>],
    hybrid: &[Vec<Passage>],
    queries: usize,
    cap: usize,
) -> Vec<Vec<Passage>> {
    (0..queries)
        .into_par_iter()
        .map(|i| {
            let mut fused = dedup_passages(
                list(semantic, i)
                    .iter()
                    .chain(list(hybrid, i))
                    .cloned()
                    .map(Passage::without_embedding),
            );
            fused.truncate(cap);
            fused
        })
        .collect()
}

fn list(lists: &[Vec<Passage>], i: usize) -> &[Passage] {
    lists.get(i).map(Vec::as_slice).unwrap_or(&[])
}
