//! The fusion pipeline.
//!
//! ```text
//!   R (pattern)  ─┐
//!   N (entity)   ─┼─► H (hybrid re-rank) ─┐
//!   E (embed) ─► S (semantic) ────────────┴─► F (fused)
//! ```
//!
//! R, N and E→S run concurrently. H waits for R, N and the query embeddings;
//! F waits for H and S. Every stage reads the same corpus and index snapshots.

mod report;
mod stages;

use std::sync::Arc;
use std::time::Instant;

use climacheck_concepts::{ConceptExtractor, ConceptIndex, ConceptIndexQuerier, ExtractorOptions, IndexKind};
use climacheck_core::config::{defaults, ClimacheckConfig, RunConfig};
use climacheck_core::constants::{ENTITY_STAGE_CAP, FINAL_STAGE_CAP, HYBRID_STAGE_CAP, PATTERN_STAGE_CAP};
use climacheck_core::errors::ClimacheckResult;
use climacheck_core::models::{DegradationEvent, GoldEntry, Passage, RetrievalStage, RetrievalState};
use climacheck_embeddings::FallbackEmbedder;
use climacheck_observability::tracing_setup::events;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::resources::RetrievalResources;
use stages::StageOutput;

pub use report::{RunReport, StageReport};

/// Cut-offs applied by the similarity stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub hybrid_retrieval_top_k: usize,
    pub semantic_search_top_k: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            hybrid_retrieval_top_k: defaults::DEFAULT_HYBRID_RETRIEVAL_TOP_K,
            semantic_search_top_k: defaults::DEFAULT_SEMANTIC_SEARCH_TOP_K,
        }
    }
}

impl From<&RunConfig> for PipelineSettings {
    fn from(run: &RunConfig) -> Self {
        Self {
            hybrid_retrieval_top_k: run.hybrid_retrieval_top_k,
            semantic_search_top_k: run.semantic_search_top_k,
        }
    }
}

impl PipelineSettings {
    /// The hybrid cut never exceeds [`HYBRID_STAGE_CAP`].
    pub fn hybrid_cut(&self) -> usize {
        self.hybrid_retrieval_top_k.min(HYBRID_STAGE_CAP)
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: RetrievalState,
    /// At most ten passages per query, in query order, without embeddings.
    pub final_results: Vec<Vec<Passage>>,
    pub report: RunReport,
}

/// Results of a gold-set run: control entries short-circuit to empty lists.
#[derive(Debug, Clone)]
pub struct ControlledRun {
    /// One list per gold entry, in gold order.
    pub results: Vec<Vec<Passage>>,
    pub controls: usize,
    /// Non-control entries with an empty claim; they get an empty list.
    pub skipped_empty_claims: usize,
    /// The pipeline run over the non-control claims.
    pub run: PipelineRun,
}

pub struct FusionPipeline {
    resources: RetrievalResources,
    embedder: Arc<FallbackEmbedder>,
    entity_extractor: ConceptExtractor,
    settings: PipelineSettings,
}

impl FusionPipeline {
    pub fn new(
        resources: RetrievalResources,
        embedder: Arc<FallbackEmbedder>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            resources,
            embedder,
            entity_extractor: ConceptExtractor::new(ExtractorOptions::entities_only()),
            settings,
        }
    }

    /// Load the corpus and index named by `run`.
    pub fn from_run_config(run: &RunConfig, embedder: Arc<FallbackEmbedder>) -> Self {
        Self::new(RetrievalResources::load(run), embedder, PipelineSettings::from(run))
    }

    /// Build from the caller's key/value bag, with the embedder described by
    /// `config`. Only a missing or mistyped key is an error.
    pub fn from_bag(bag: &Map<String, Value>, config: &ClimacheckConfig) -> ClimacheckResult<Self> {
        let run = RunConfig::from_bag(bag)?;
        let embedder = Arc::new(FallbackEmbedder::from_config(config)?);
        Ok(Self::from_run_config(&run, embedder))
    }

    /// Replace the extractor used by the entity stage, e.g. to add taggers.
    pub fn with_entity_extractor(mut self, extractor: ConceptExtractor) -> Self {
        self.entity_extractor = extractor;
        self
    }

    pub fn resources(&self) -> &RetrievalResources {
        &self.resources
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    pub fn run(&self, queries: &[String]) -> PipelineRun {
        let span = climacheck_observability::retrieval_span!(queries.len());
        let _guard = span.enter();
        let started = Instant::now();
        let failures_before = self.embedder.failure_count();
        info!(queries = queries.len(), "retrieval run started");

        let ((pattern, entity), (embeddings, semantic)) = rayon::join(
            || {
                rayon::join(
                    || timed(RetrievalStage::Pattern, || self.pattern_stage(queries)),
                    || timed(RetrievalStage::Entity, || self.entity_stage(queries)),
                )
            },
            || self.semantic_branch(queries),
        );

        let hybrid = timed(RetrievalStage::Hybrid, || {
            self.hybrid_stage(queries.len(), &pattern.0, &entity.0, embeddings.as_deref())
        });
        let fused = timed(RetrievalStage::Final, || {
            StageOutput::ok(stages::fuse(
                &semantic.0.results,
                &hybrid.0.results,
                queries.len(),
                FINAL_STAGE_CAP,
            ))
        });

        let mut state = RetrievalState::new(queries.to_vec());
        state.set_stage(RetrievalStage::Pattern, pattern.0.stripped());
        state.set_stage(RetrievalStage::Entity, entity.0.stripped());
        state.set_stage(RetrievalStage::Semantic, semantic.0.results);
        state.set_stage(RetrievalStage::Hybrid, hybrid.0.results);
        state.set_stage(RetrievalStage::Final, fused.0.results.clone());

        let mut degradations = self.resources.degradation_events();
        if let Some(reason) = self.embedder.unavailable_reason() {
            degradations.push(DegradationEvent::now("embeddings", reason, "empty_results"));
        }
        degradations.extend(self.embedder.drain_events());

        let report = RunReport {
            queries: queries.len(),
            stages: vec![pattern.1, entity.1, semantic.1, hybrid.1, fused.1],
            embedding_failures: self.embedder.failure_count().saturating_sub(failures_before),
            total_elapsed_ms: started.elapsed().as_millis() as u64,
            degradations,
        };
        info!(
            queries = report.queries,
            elapsed_ms = report.total_elapsed_ms,
            embedding_failures = report.embedding_failures,
            degraded = ?report.degraded_stages(),
            "retrieval run complete"
        );

        PipelineRun {
            state,
            final_results: fused.0.results,
            report,
        }
    }

    /// Run the claims of `entries`, answering control cases with an empty
    /// list without querying anything.
    pub fn run_with_controls(&self, entries: &[GoldEntry]) -> ControlledRun {
        let mut results: Vec<Vec<Passage>> = vec![Vec::new(); entries.len()];
        let mut positions = Vec::new();
        let mut queries = Vec::new();
        let mut controls = 0;
        let mut skipped_empty_claims = 0;

        for (i, entry) in entries.iter().enumerate() {
            if entry.is_control() {
                debug!(entry = %entry.id, "control case, skipping retrieval");
                controls += 1;
            } else if entry.claim.trim().is_empty() {
                debug!(entry = %entry.id, "empty claim, skipping retrieval");
                skipped_empty_claims += 1;
            } else {
                positions.push(i);
                queries.push(entry.claim.clone());
            }
        }

        let run = self.run(&queries);
        for (position, list) in positions.into_iter().zip(run.final_results.iter()) {
            results[position] = list.clone();
        }
        info!(
            entries = entries.len(),
            controls,
            regular = queries.len(),
            "gold-set retrieval complete"
        );

        ControlledRun {
            results,
            controls,
            skipped_empty_claims,
            run,
        }
    }

    fn concept_inputs(&self) -> Result<(Arc<Corpus>, Arc<ConceptIndex>), String> {
        match (self.resources.corpus.ready(), self.resources.index.ready()) {
            (Some(corpus), Some(index)) => Ok((corpus.clone(), index.clone())),
            _ => Err(self
                .resources
                .concept_stage_blocker()
                .unwrap_or_else(|| "inputs unavailable".to_string())),
        }
    }

    fn pattern_stage(&self, queries: &[String]) -> StageOutput {
        let (corpus, index) = match self.concept_inputs() {
            Ok(inputs) => inputs,
            Err(reason) => return StageOutput::degraded(queries.len(), reason),
        };
        let querier = ConceptIndexQuerier::new(
            index,
            ConceptExtractor::without_taggers(ExtractorOptions::patterns_only()),
        )
        .unmerged();
        StageOutput::ok(stages::concept_lookup(
            queries,
            &corpus,
            &querier,
            IndexKind::Flat,
            PATTERN_STAGE_CAP,
        ))
    }

    fn entity_stage(&self, queries: &[String]) -> StageOutput {
        let (corpus, index) = match self.concept_inputs() {
            Ok(inputs) => inputs,
            Err(reason) => return StageOutput::degraded(queries.len(), reason),
        };
        let querier = ConceptIndexQuerier::new(index, self.entity_extractor.clone());
        StageOutput::ok(stages::concept_lookup(
            queries,
            &corpus,
            &querier,
            IndexKind::Hybrid,
            ENTITY_STAGE_CAP,
        ))
    }

    /// Embed the queries, then search the whole corpus. The embeddings are
    /// handed back for the hybrid stage; `None` when they were never computed.
    fn semantic_branch(&self, queries: &[String]) -> (Option<Vec<Vec<f32>>>, (StageOutput, StageReport)) {
        let mut embeddings = None;
        let stage = timed(RetrievalStage::Semantic, || {
            if let Some(reason) = self.embedder.unavailable_reason() {
                return StageOutput::degraded(
                    queries.len(),
                    format!("embedding provider unavailable: {reason}"),
                );
            }
            let Some(corpus) = self.resources.corpus.ready() else {
                let reason = self.resources.corpus.reason().unwrap_or("corpus unavailable");
                return StageOutput::degraded(queries.len(), reason);
            };
            let vectors = {
                let _span = climacheck_observability::embedding_span!("query", queries.len()).entered();
                self.embedder.embed_all(queries)
            };
            let results = stages::semantic_search(&vectors, corpus, self.settings.semantic_search_top_k);
            embeddings = Some(vectors);
            StageOutput::ok(results)
        });
        (embeddings, stage)
    }

    fn hybrid_stage(
        &self,
        queries: usize,
        pattern: &StageOutput,
        entity: &StageOutput,
        embeddings: Option<&[Vec<f32>]>,
    ) -> StageOutput {
        let Some(embeddings) = embeddings else {
            return StageOutput::degraded(queries, "query embeddings unavailable");
        };
        if let (Some(reason), Some(_)) = (&pattern.degraded, &entity.degraded) {
            return StageOutput::degraded(queries, reason.clone());
        }
        StageOutput::ok(stages::hybrid_rerank(
            &pattern.results,
            &entity.results,
            embeddings,
            self.settings.hybrid_cut(),
        ))
    }
}

/// Run one stage under its span and emit the completion or degradation event.
fn timed(stage: RetrievalStage, f: impl FnOnce() -> StageOutput) -> (StageOutput, StageReport) {
    let _span = climacheck_observability::stage_span!(stage).entered();
    let start = Instant::now();
    let output = f();
    let report = StageReport {
        stage,
        elapsed_ms: start.elapsed().as_millis() as u64,
        passages: output.passage_count(),
        degraded: output.degraded.clone(),
    };
    match &output.degraded {
        Some(reason) => events::stage_degraded(stage.as_str(), reason),
        None => events::stage_completed(
            stage.as_str(),
            output.results.len(),
            report.passages,
            report.elapsed_ms,
        ),
    }
    (output, report)
}
