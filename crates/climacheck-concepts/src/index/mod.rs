//! Concept index: a flat pattern index and a hybrid occurrence index built
//! from the same corpus pass, plus corpus-wide extraction statistics.

mod artifact;
mod builder;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use climacheck_core::errors::{ClimacheckResult, DataError};
use climacheck_core::models::{ExtractionSource, Passage};
use serde::{Deserialize, Serialize};

pub use builder::build_index;

/// `type → pattern key → sorted sentence IDs`.
pub type FlatIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// `type → concept text → aggregated occurrences`.
pub type HybridIndex = BTreeMap<String, BTreeMap<String, HybridEntry>>;

/// One corpus record fed to the index builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub text: String,
}

impl From<&Passage> for IndexRecord {
    fn from(passage: &Passage) -> Self {
        Self {
            id: passage.id.clone(),
            text: passage.text.clone(),
        }
    }
}

/// A merged concept found in one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub sentence_id: String,
    pub confidence: f64,
    pub source: ExtractionSource,
    pub start: usize,
    pub end: usize,
}

/// All occurrences of one `(type, concept text)` pair, with aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridEntry {
    #[serde(rename = "sentences")]
    pub occurrences: Vec<Occurrence>,
    pub total_occurrences: usize,
    pub unique_sentences: usize,
    pub avg_confidence: f64,
    pub sources: BTreeSet<ExtractionSource>,
}

impl HybridEntry {
    pub(crate) fn from_occurrences(occurrences: Vec<Occurrence>) -> Self {
        let total_occurrences = occurrences.len();
        let unique_sentences = occurrences
            .iter()
            .map(|o| o.sentence_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let avg_confidence = if total_occurrences == 0 {
            0.0
        } else {
            occurrences.iter().map(|o| o.confidence).sum::<f64>() / total_occurrences as f64
        };
        let sources = occurrences.iter().map(|o| o.source).collect();
        Self {
            occurrences,
            total_occurrences,
            unique_sentences,
            avg_confidence,
            sources,
        }
    }

    pub fn sentence_ids(&self) -> impl Iterator<Item = &str> {
        self.occurrences.iter().map(|o| o.sentence_id.as_str())
    }
}

/// Corpus-wide counters gathered during a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexStatistics {
    pub total_sentences: usize,
    /// Raw candidates per extraction method, counted before merging.
    pub extraction_methods: BTreeMap<String, usize>,
    /// Merged concepts per concept type.
    pub concept_types: BTreeMap<String, usize>,
    pub avg_concepts_per_sentence: f64,
    pub max_concepts_per_sentence: usize,
}

/// Both index shapes plus statistics. Rebuilt wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptIndex {
    pub flat: FlatIndex,
    pub hybrid: HybridIndex,
    pub statistics: IndexStatistics,
}

impl ConceptIndex {
    /// True when neither index shape holds any entry.
    pub fn is_empty(&self) -> bool {
        self.flat.values().all(BTreeMap::is_empty) && self.hybrid.values().all(BTreeMap::is_empty)
    }

    /// Parse an index artifact.
    pub fn from_json_str(json: &str) -> ClimacheckResult<Self> {
        let artifact: artifact::ArtifactIn = serde_json::from_str(json)?;
        Ok(artifact.into())
    }

    /// Serialize to the artifact layout.
    pub fn to_json_string(&self) -> ClimacheckResult<String> {
        Ok(serde_json::to_string(&artifact::ArtifactOut::from(self))?)
    }

    /// Write the artifact to disk.
    pub fn save(&self, path: &Path) -> ClimacheckResult<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer(writer, &artifact::ArtifactOut::from(self))?;
        Ok(())
    }

    /// Read an artifact from disk. A document that does not parse is a
    /// `DataError::MalformedDocument`.
    pub fn load(path: &Path) -> ClimacheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| {
            DataError::MalformedDocument {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(id: &str, confidence: f64, source: ExtractionSource) -> Occurrence {
        Occurrence {
            sentence_id: id.to_string(),
            confidence,
            source,
            start: 0,
            end: 3,
        }
    }

    #[test]
    fn hybrid_entry_aggregates() {
        let entry = HybridEntry::from_occurrences(vec![
            occ("s1", 1.0, ExtractionSource::Regex),
            occ("s1", 0.6, ExtractionSource::Nltk),
            occ("s2", 0.8, ExtractionSource::Regex),
        ]);
        assert_eq!(entry.total_occurrences, 3);
        assert_eq!(entry.unique_sentences, 2);
        assert!((entry.avg_confidence - 0.8).abs() < 1e-12);
        assert_eq!(entry.sources.len(), 2);
    }

    #[test]
    fn empty_index_detected() {
        let mut index = ConceptIndex::default();
        assert!(index.is_empty());
        index.flat.entry("EMISSION".into()).or_default();
        assert!(index.is_empty());
        index
            .flat
            .get_mut("EMISSION")
            .unwrap()
            .insert("co2".into(), vec!["s1".into()]);
        assert!(!index.is_empty());
    }
}
