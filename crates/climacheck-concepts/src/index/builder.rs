use std::collections::BTreeMap;

use climacheck_core::constants::INDEX_PROGRESS_INTERVAL;
use climacheck_core::models::Concept;
use rayon::prelude::*;
use tracing::info;

use super::{ConceptIndex, HybridEntry, IndexRecord, IndexStatistics, Occurrence};
use crate::extractor::{merge_overlapping, ConceptExtractor};
use crate::patterns;

/// Extraction output for one record, computed in parallel and folded in
/// record order.
struct RecordScan {
    raw_counts: Vec<(&'static str, usize)>,
    merged: Vec<Concept>,
    flat_hits: Vec<(&'static str, &'static str)>,
}

fn scan(record: &IndexRecord, extractor: &ConceptExtractor) -> RecordScan {
    let all = extractor.extract_all(&record.text);
    let raw_counts = all
        .iter()
        .map(|(source, concepts)| (source.as_str(), concepts.len()))
        .collect();
    let merged = merge_overlapping(all.into_values().flatten().collect());
    let flat_hits = patterns::patterns_present(&record.text)
        .map(|p| (p.concept_type, p.key))
        .collect();
    RecordScan {
        raw_counts,
        merged,
        flat_hits,
    }
}

/// Build both index shapes and the statistics from `records`.
///
/// The flat index is fed by the raw pattern catalog regardless of which
/// methods `extractor` has enabled; the hybrid index holds merged concepts.
pub fn build_index(records: &[IndexRecord], extractor: &ConceptExtractor) -> ConceptIndex {
    let _span = climacheck_observability::index_build_span!(records.len()).entered();
    let scans: Vec<RecordScan> = records.par_iter().map(|r| scan(r, extractor)).collect();

    let mut flat: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    let mut occurrences: BTreeMap<String, BTreeMap<String, Vec<Occurrence>>> = BTreeMap::new();
    let mut statistics = IndexStatistics {
        total_sentences: records.len(),
        ..IndexStatistics::default()
    };
    let mut per_sentence = Vec::with_capacity(records.len());

    for (i, (record, scan)) in records.iter().zip(scans).enumerate() {
        if i > 0 && i % INDEX_PROGRESS_INTERVAL == 0 {
            info!(processed = i, total = records.len(), "indexing concepts");
        }
        for (source, count) in scan.raw_counts {
            *statistics.extraction_methods.entry(source.to_string()).or_default() += count;
        }
        per_sentence.push(scan.merged.len());

        for concept in scan.merged {
            *statistics
                .concept_types
                .entry(concept.concept_type.clone())
                .or_default() += 1;
            occurrences
                .entry(concept.concept_type)
                .or_default()
                .entry(concept.text)
                .or_default()
                .push(Occurrence {
                    sentence_id: record.id.clone(),
                    confidence: concept.confidence,
                    source: concept.source,
                    start: concept.start,
                    end: concept.end,
                });
        }

        for (concept_type, key) in scan.flat_hits {
            flat.entry(concept_type.to_string())
                .or_default()
                .entry(key.to_string())
                .or_default()
                .push(record.id.clone());
        }
    }

    for ids in flat.values_mut().flat_map(BTreeMap::values_mut) {
        ids.sort();
        ids.dedup();
    }

    let hybrid = occurrences
        .into_iter()
        .map(|(concept_type, texts)| {
            let entries = texts
                .into_iter()
                .map(|(text, occ)| (text, HybridEntry::from_occurrences(occ)))
                .collect();
            (concept_type, entries)
        })
        .collect();

    if !per_sentence.is_empty() {
        statistics.avg_concepts_per_sentence =
            per_sentence.iter().sum::<usize>() as f64 / per_sentence.len() as f64;
        statistics.max_concepts_per_sentence = per_sentence.iter().copied().max().unwrap_or(0);
    }

    info!(
        sentences = statistics.total_sentences,
        concept_types = statistics.concept_types.len(),
        "concept index built"
    );

    ConceptIndex {
        flat,
        hybrid,
        statistics,
    }
}

impl ConceptIndex {
    /// See [`build_index`].
    pub fn build(records: &[IndexRecord], extractor: &ConceptExtractor) -> Self {
        build_index(records, extractor)
    }
}
