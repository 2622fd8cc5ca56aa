//! On-disk layout of the concept index.
//!
//! The flat index is written as `type → key → { key: [ids] }`, repeating the
//! pattern key one level down. Reading also accepts the list form
//! `type → key → [{ concept, sentences }]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ConceptIndex, HybridIndex, IndexStatistics};

#[derive(Serialize)]
pub(super) struct ArtifactOut<'a> {
    regex_index: BTreeMap<&'a str, BTreeMap<&'a str, BTreeMap<&'a str, &'a [String]>>>,
    hybrid_index: &'a HybridIndex,
    statistics: &'a IndexStatistics,
}

impl<'a> From<&'a ConceptIndex> for ArtifactOut<'a> {
    fn from(index: &'a ConceptIndex) -> Self {
        let regex_index = index
            .flat
            .iter()
            .map(|(concept_type, keys)| {
                let keyed = keys
                    .iter()
                    .map(|(key, ids)| {
                        let inner = BTreeMap::from([(key.as_str(), ids.as_slice())]);
                        (key.as_str(), inner)
                    })
                    .collect();
                (concept_type.as_str(), keyed)
            })
            .collect();
        Self {
            regex_index,
            hybrid_index: &index.hybrid,
            statistics: &index.statistics,
        }
    }
}

#[derive(Deserialize)]
struct LegacyFlatEntry {
    #[allow(dead_code)]
    concept: String,
    sentences: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlatBucket {
    Keyed(BTreeMap<String, Vec<String>>),
    Listed(Vec<LegacyFlatEntry>),
}

impl FlatBucket {
    fn into_ids(self) -> Vec<String> {
        let mut ids: Vec<String> = match self {
            Self::Keyed(map) => map.into_values().flatten().collect(),
            Self::Listed(entries) => entries.into_iter().flat_map(|e| e.sentences).collect(),
        };
        ids.sort();
        ids.dedup();
        ids
    }
}

#[derive(Deserialize)]
pub(super) struct ArtifactIn {
    #[serde(default)]
    regex_index: BTreeMap<String, BTreeMap<String, FlatBucket>>,
    #[serde(default)]
    hybrid_index: HybridIndex,
    #[serde(default)]
    statistics: IndexStatistics,
}

impl From<ArtifactIn> for ConceptIndex {
    fn from(artifact: ArtifactIn) -> Self {
        let flat = artifact
            .regex_index
            .into_iter()
            .map(|(concept_type, keys)| {
                let keys = keys
                    .into_iter()
                    .map(|(key, bucket)| (key, bucket.into_ids()))
                    .collect();
                (concept_type, keys)
            })
            .collect();
        Self {
            flat,
            hybrid: artifact.hybrid_index,
            statistics: artifact.statistics,
        }
    }
}
