//! Building, saving and loading the concept index against the fixture corpus.

use climacheck_concepts::{ConceptExtractor, ConceptIndex, IndexRecord};
use climacheck_core::errors::{ClimacheckError, DataError};
use climacheck_core::models::{ExtractionSource, Passage};

fn records() -> Vec<IndexRecord> {
    test_fixtures::fixture_lines("golden/corpus/passages.jsonl")
        .iter()
        .filter_map(|line| serde_json::from_str::<Passage>(line).ok())
        .map(|p| IndexRecord::from(&p))
        .collect()
}

fn build() -> ConceptIndex {
    ConceptIndex::build(&records(), &ConceptExtractor::default())
}

#[test]
fn flat_index_holds_pattern_hits() {
    let index = build();
    assert_eq!(index.flat["CLIMATE_VAR"]["sea_level_rise"], vec!["p2".to_string()]);
    assert_eq!(index.flat["EMISSION"]["co2"], vec!["p1".to_string()]);
    assert!(index.flat["EMISSION"]["ch4"].contains(&"p4".to_string()));
    assert!(index.flat["AGENCIES"]["ipcc"].contains(&"p4".to_string()));
}

#[test]
fn hybrid_index_prefers_phrase_matches() {
    let index = build();
    let entry = &index.hybrid["EMISSION"]["CO2"];
    assert_eq!(entry.total_occurrences, 1);
    assert_eq!(entry.unique_sentences, 1);
    assert!(entry.sources.contains(&ExtractionSource::EntityRuler));
    assert_eq!(entry.occurrences[0].sentence_id, "p1");
    assert_eq!((entry.occurrences[0].start, entry.occurrences[0].end), (0, 3));
}

#[test]
fn statistics_cover_every_record() {
    let index = build();
    let stats = &index.statistics;
    assert_eq!(stats.total_sentences, 6);
    assert!(stats.extraction_methods["regex"] >= 4);
    let merged_total: usize = stats.concept_types.values().sum();
    assert!((merged_total as f64 / 6.0 - stats.avg_concepts_per_sentence).abs() < 1e-9);
    assert!(stats.max_concepts_per_sentence >= 1);
}

#[test]
fn save_then_load_preserves_index() {
    let index = build();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concept_index.json");
    index.save(&path).unwrap();
    let loaded = ConceptIndex::load(&path).unwrap();
    assert_eq!(loaded, index);
}

#[test]
fn loads_list_form_artifact() {
    let path = test_fixtures::fixture_path("golden/index/list_form_index.json");
    let index = ConceptIndex::load(&path).unwrap();
    assert_eq!(
        index.flat["CLIMATE_VAR"]["sea_level_rise"],
        vec!["p2".to_string(), "p9".to_string()]
    );
    assert_eq!(index.flat["EMISSION"]["co2"], vec!["p1".to_string()]);
    assert_eq!(index.hybrid["EMISSION"]["CO2"].avg_confidence, 1.0);
    assert_eq!(index.statistics.extraction_methods["regex"], 2);
}

#[test]
fn unparseable_artifact_is_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    std::fs::write(&path, "{\"regex_index\": [").unwrap();
    let err = ConceptIndex::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ClimacheckError::DataError(DataError::MalformedDocument { .. })
    ));
}

#[test]
fn missing_artifact_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConceptIndex::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ClimacheckError::Io(_)));
}
