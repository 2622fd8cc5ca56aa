//! End-to-end fusion pipeline runs over small on-disk corpora.

use std::path::Path;
use std::sync::Arc;

use climacheck_concepts::{ConceptExtractor, ConceptIndex, IndexRecord};
use climacheck_core::config::RunConfig;
use climacheck_core::errors::{ClimacheckResult, RemoteServiceError};
use climacheck_core::models::{GoldEntry, Passage, RetrievalStage};
use climacheck_core::traits::IEmbeddingProvider;
use climacheck_embeddings::{FallbackEmbedder, LazyEmbedder};
use climacheck_observability::{DegradationTracker, RunLog};
use climacheck_retrieval::{Corpus, FusionPipeline, PipelineSettings, RetrievalResources};
use serde_json::json;

/// Every text embeds to the same fixed vector.
struct FixedProvider(Vec<f32>);

impl IEmbeddingProvider for FixedProvider {
    fn embed(&self, _text: &str) -> ClimacheckResult<Vec<f32>> {
        Ok(self.0.clone())
    }

    fn dimensions(&self) -> usize {
        self.0.len()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn fixed_embedder(vector: Vec<f32>) -> Arc<FallbackEmbedder> {
    let dims = vector.len();
    let lazy = LazyEmbedder::ready(Arc::new(FixedProvider(vector)));
    Arc::new(FallbackEmbedder::new(Arc::new(lazy), dims, 2, 100).unwrap())
}

fn broken_embedder() -> Arc<FallbackEmbedder> {
    let lazy = LazyEmbedder::new(|| {
        Err(RemoteServiceError::NotConfigured {
            service: "embedding".into(),
            reason: "AZURE_OPENAI_ENDPOINT unset".into(),
        }
        .into())
    });
    Arc::new(FallbackEmbedder::new(Arc::new(lazy), 4, 2, 100).unwrap())
}

fn two_passages() -> Vec<Passage> {
    vec![
        Passage::new("p1", "CO2 levels rising").with_embedding(vec![1.0, 0.0, 0.0, 0.0]),
        Passage::new("p2", "Sea level rise accelerating").with_embedding(vec![0.0, 1.0, 0.0, 0.0]),
    ]
}

/// Write the corpus and a freshly built index under `dir`.
fn write_inputs(dir: &Path, passages: &[Passage]) -> RunConfig {
    let passages_path = dir.join("passages.jsonl");
    let lines: Vec<String> = passages
        .iter()
        .map(|p| serde_json::to_string(p).unwrap())
        .collect();
    std::fs::write(&passages_path, lines.join("\n")).unwrap();

    let records: Vec<IndexRecord> = passages.iter().map(IndexRecord::from).collect();
    let index = ConceptIndex::build(&records, &ConceptExtractor::default());
    let concept_index_path = dir.join("concept_index.json");
    index.save(&concept_index_path).unwrap();

    RunConfig {
        passages_path,
        concept_index_path,
        hybrid_retrieval_top_k: 5,
        semantic_search_top_k: 5,
    }
}

fn ids(list: &[Passage]) -> Vec<&str> {
    list.iter().map(|p| p.id.as_str()).collect()
}

fn queries(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn sea_level_query_fuses_semantic_and_pattern_hits() {
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &two_passages());
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![0.6, 0.8, 0.0, 0.0]));

    let run = pipeline.run(&queries(&["Is sea level rising?"]));

    assert!(run.state.is_complete());
    let pattern = run.state.stage(RetrievalStage::Pattern).unwrap();
    assert_eq!(ids(&pattern[0]), vec!["p2"]);
    let semantic = run.state.stage(RetrievalStage::Semantic).unwrap();
    assert_eq!(ids(&semantic[0]), vec!["p2", "p1"]);
    assert_eq!(ids(&run.final_results[0]), vec!["p2", "p1"]);

    let hybrid = run.state.stage(RetrievalStage::Hybrid).unwrap();
    assert!(hybrid[0].len() <= 3);
    assert!(hybrid[0].iter().all(|p| p.id == "p1" || p.id == "p2"));

    for stage in RetrievalStage::ALL {
        for list in run.state.stage(stage).unwrap() {
            assert!(list.iter().all(|p| p.embedding.is_none()), "{stage} kept embeddings");
        }
    }
    assert!(run.report.degraded_stages().is_empty());
    assert_eq!(run.report.embedding_failures, 0);
    assert_eq!(run.report.stages.len(), 5);
}

#[test]
fn results_stay_aligned_with_queries() {
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &two_passages());
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![1.0, 0.0, 0.0, 0.0]));

    let batch = queries(&["CO2 emissions", "", "Is sea level rising?"]);
    let run = pipeline.run(&batch);

    assert_eq!(run.final_results.len(), 3);
    let pattern = run.state.stage(RetrievalStage::Pattern).unwrap();
    assert_eq!(pattern.len(), 3);
    assert_eq!(ids(&pattern[0]), vec!["p1"]);
    assert!(pattern[1].is_empty());
    assert_eq!(ids(&pattern[2]), vec!["p2"]);
    // The blank query falls back to a zero vector, which ranks nothing.
    assert!(run.state.stage(RetrievalStage::Semantic).unwrap()[1].is_empty());
    assert_eq!(ids(&run.final_results[0]), vec!["p1"]);
}

#[test]
fn pattern_stage_matches_overlapping_regex_hits() {
    let dir = tempfile::tempdir().unwrap();
    let passages = vec![
        Passage::new("p1", "CO2 levels rising").with_embedding(vec![1.0, 0.0, 0.0, 0.0]),
        Passage::new("p2", "Net zero targets announced").with_embedding(vec![0.0, 1.0, 0.0, 0.0]),
    ];
    let run_config = write_inputs(dir.path(), &passages);
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![1.0, 0.0, 0.0, 0.0]));

    let run = pipeline.run(&queries(&["Can we reach net zero CO2 by 2050?"]));

    let pattern = run.state.stage(RetrievalStage::Pattern).unwrap();
    assert_eq!(ids(&pattern[0]), vec!["p1", "p2"]);
}

#[test]
fn missing_index_empties_concept_stages_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut run_config = write_inputs(dir.path(), &two_passages());
    run_config.concept_index_path = dir.path().join("absent.json");
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![0.6, 0.8, 0.0, 0.0]));

    let run = pipeline.run(&queries(&["Is sea level rising?"]));

    assert_eq!(
        run.report.degraded_stages(),
        vec![RetrievalStage::Pattern, RetrievalStage::Entity, RetrievalStage::Hybrid]
    );
    assert!(run.state.stage(RetrievalStage::Pattern).unwrap()[0].is_empty());
    assert!(run.state.stage(RetrievalStage::Hybrid).unwrap()[0].is_empty());
    assert_eq!(ids(&run.final_results[0]), vec!["p2", "p1"]);
    assert!(run
        .report
        .degradations
        .iter()
        .any(|e| e.component == "concept_index"));
}

#[test]
fn missing_corpus_empties_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut run_config = write_inputs(dir.path(), &two_passages());
    run_config.passages_path = dir.path().join("absent.jsonl");
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![0.6, 0.8, 0.0, 0.0]));

    let run = pipeline.run(&queries(&["Is sea level rising?", "CO2"]));

    assert_eq!(run.final_results, vec![Vec::<Passage>::new(), Vec::new()]);
    assert_eq!(run.report.degraded_stages().len(), 4);
    assert!(run.report.stage(RetrievalStage::Final).unwrap().degraded.is_none());
}

#[test]
fn unavailable_embedder_empties_semantic_and_hybrid() {
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &two_passages());
    let pipeline = FusionPipeline::from_run_config(&run_config, broken_embedder());

    let run = pipeline.run(&queries(&["Is sea level rising?"]));

    assert_eq!(
        run.report.degraded_stages(),
        vec![RetrievalStage::Semantic, RetrievalStage::Hybrid]
    );
    assert_eq!(ids(&run.state.stage(RetrievalStage::Pattern).unwrap()[0]), vec!["p2"]);
    assert!(run.final_results[0].is_empty());

    let mut tracker = DegradationTracker::new();
    run.report.record_degradations(&mut tracker);
    assert_eq!(tracker.counts_by_component()["embeddings"], 1);

    let mut log = RunLog::new();
    log.record(run.report.to_log_entry());
    assert_eq!(log.degraded_runs(), 1);
}

#[test]
fn hybrid_cut_never_exceeds_three() {
    let passages: Vec<Passage> = (0..6)
        .map(|i| {
            Passage::new(format!("c{i}"), format!("CO2 emissions report {i}"))
                .with_embedding(vec![1.0, i as f32 * 0.1, 0.0, 0.0])
        })
        .collect();
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &passages);
    let embedder = fixed_embedder(vec![1.0, 0.0, 0.0, 0.0]);
    let settings = PipelineSettings {
        hybrid_retrieval_top_k: 10,
        semantic_search_top_k: 2,
    };
    assert_eq!(settings.hybrid_cut(), 3);
    let pipeline = FusionPipeline::new(RetrievalResources::load(&run_config), embedder, settings);

    let run = pipeline.run(&queries(&["CO2"]));

    assert_eq!(run.state.stage(RetrievalStage::Pattern).unwrap()[0].len(), 6);
    let hybrid = &run.state.stage(RetrievalStage::Hybrid).unwrap()[0];
    assert_eq!(ids(hybrid), vec!["c0", "c1", "c2"]);
    assert_eq!(run.state.stage(RetrievalStage::Semantic).unwrap()[0].len(), 2);
    assert_eq!(ids(&run.final_results[0]), vec!["c0", "c1", "c2"]);
}

#[test]
fn control_entries_short_circuit() {
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &two_passages());
    let pipeline = FusionPipeline::from_run_config(&run_config, fixed_embedder(vec![0.6, 0.8, 0.0, 0.0]));

    let entries = vec![
        GoldEntry::new("g1", "Is sea level rising?").with_evidence("p2"),
        GoldEntry::new("g2", "The moon is made of cheese"),
        GoldEntry::new("g3", "  ").with_evidence("p1"),
        GoldEntry::new("g4", "CO2 levels").with_entailment("supports"),
    ];
    let controlled = pipeline.run_with_controls(&entries);

    assert_eq!(controlled.results.len(), 4);
    assert_eq!(controlled.controls, 1);
    assert_eq!(controlled.skipped_empty_claims, 1);
    assert_eq!(controlled.run.state.queries.len(), 2);
    assert_eq!(ids(&controlled.results[0]), vec!["p2", "p1"]);
    assert!(controlled.results[1].is_empty());
    assert!(controlled.results[2].is_empty());
    assert!(!controlled.results[3].is_empty());
}

#[test]
fn fixture_corpus_loads_with_report() {
    let path = test_fixtures::fixture_path("golden/corpus/passages.jsonl");
    let (corpus, report) = Corpus::load(&path).unwrap();
    assert_eq!(report.loaded, 6);
    assert_eq!(report.skipped_malformed, 1);
    assert_eq!(report.blank_lines, 1);
    assert_eq!(corpus.passages()[0].source, json!({"document": "ar6_wg1.pdf", "page": 12}));
    assert!(corpus.passages()[5].embedding.is_none());
}

#[test]
fn bag_configuration_builds_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let run_config = write_inputs(dir.path(), &two_passages());
    let bag = json!({
        "passagesPath": run_config.passages_path,
        "conceptIndexPath": run_config.concept_index_path,
        "hybridRetrievalTopK": 2,
    });
    let mut config = climacheck_core::ClimacheckConfig::default();
    config.embedding.dimensions = 4;
    let pipeline = FusionPipeline::from_bag(bag.as_object().unwrap(), &config).unwrap();
    assert_eq!(pipeline.settings().hybrid_retrieval_top_k, 2);
    assert!(pipeline.resources().corpus.is_ready());
    assert!(pipeline.resources().index.is_ready());

    let missing = json!({ "passagesPath": "x.jsonl" });
    assert!(FusionPipeline::from_bag(missing.as_object().unwrap(), &config).is_err());
}
