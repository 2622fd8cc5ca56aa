//! Map query concepts onto corpus sentence IDs through a [`ConceptIndex`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use climacheck_core::models::Concept;
use serde::Serialize;
use tracing::debug;

use crate::extractor::ConceptExtractor;
use crate::index::ConceptIndex;

/// Which index shape to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// `type → concept text → occurrences`.
    Hybrid,
    /// `type → pattern key → sentence IDs`.
    Flat,
}

/// How a concept found its index key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    /// The indexed key contains the concept or the concept contains it.
    Partial { indexed: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ConceptMatch {
    pub concept: Concept,
    pub match_kind: MatchKind,
    pub sentence_ids: Vec<String>,
}

/// Result of querying one text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryMatches {
    pub matches: Vec<ConceptMatch>,
    pub sentence_ids: BTreeSet<String>,
    pub total_concepts: usize,
}

impl QueryMatches {
    pub fn matched_concepts(&self) -> usize {
        self.matches.len()
    }

    pub fn exact_matches(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.match_kind == MatchKind::Exact)
            .count()
    }
}

/// Read-only lookups over a shared index snapshot.
#[derive(Clone)]
pub struct ConceptIndexQuerier {
    index: Arc<ConceptIndex>,
    extractor: ConceptExtractor,
    merge_overlaps: bool,
}

impl ConceptIndexQuerier {
    pub fn new(index: Arc<ConceptIndex>, extractor: ConceptExtractor) -> Self {
        Self {
            index,
            extractor,
            merge_overlaps: true,
        }
    }

    /// Look up every extracted concept as-is, without collapsing overlapping
    /// spans first. "net zero CO2" then reaches both `net_zero` and `co2`.
    pub fn unmerged(mut self) -> Self {
        self.merge_overlaps = false;
        self
    }

    pub fn index(&self) -> &ConceptIndex {
        &self.index
    }

    /// Union of sentence IDs reached by `concepts`.
    pub fn match_concepts(&self, concepts: &[Concept], kind: IndexKind) -> BTreeSet<String> {
        concepts
            .iter()
            .filter_map(|c| self.lookup(c, kind))
            .flat_map(|(_, ids)| ids)
            .collect()
    }

    /// Extract concepts from `text` and match each one.
    pub fn query(&self, text: &str, kind: IndexKind) -> QueryMatches {
        let concepts = if self.merge_overlaps {
            self.extractor.extract_concepts(text)
        } else {
            self.extractor.extract_unmerged(text)
        };
        let total_concepts = concepts.len();
        let mut out = QueryMatches {
            total_concepts,
            ..QueryMatches::default()
        };
        for concept in concepts {
            if let Some((match_kind, sentence_ids)) = self.lookup(&concept, kind) {
                out.sentence_ids.extend(sentence_ids.iter().cloned());
                out.matches.push(ConceptMatch {
                    concept,
                    match_kind,
                    sentence_ids,
                });
            }
        }
        debug!(
            concepts = out.total_concepts,
            matched = out.matches.len(),
            sentences = out.sentence_ids.len(),
            "query matched"
        );
        out
    }

    /// Sentence IDs stored under an exact (case-insensitive) key, optionally
    /// restricted to one concept type.
    pub fn concept_sentences(
        &self,
        text: &str,
        concept_type: Option<&str>,
        kind: IndexKind,
    ) -> BTreeSet<String> {
        let needle = text.to_lowercase();
        let mut out = BTreeSet::new();
        match kind {
            IndexKind::Hybrid => {
                for (t, bucket) in &self.index.hybrid {
                    if concept_type.is_some_and(|want| want != t) {
                        continue;
                    }
                    if let Some((_, entry)) = exact_key(bucket, &needle) {
                        out.extend(entry.sentence_ids().map(str::to_string));
                    }
                }
            }
            IndexKind::Flat => {
                for (t, bucket) in &self.index.flat {
                    if concept_type.is_some_and(|want| want != t) {
                        continue;
                    }
                    if let Some((_, ids)) = exact_key(bucket, &needle) {
                        out.extend(ids.iter().cloned());
                    }
                }
            }
        }
        out
    }

    fn lookup(&self, concept: &Concept, kind: IndexKind) -> Option<(MatchKind, Vec<String>)> {
        match kind {
            IndexKind::Hybrid => {
                let bucket = self.index.hybrid.get(&concept.concept_type)?;
                let (match_kind, entry) = find_key(bucket, &concept.text)?;
                Some((match_kind, entry.sentence_ids().map(str::to_string).collect()))
            }
            IndexKind::Flat => {
                let bucket = self.index.flat.get(&concept.concept_type)?;
                let key = concept.pattern_key.as_deref().unwrap_or(&concept.text);
                let (match_kind, ids) = find_key(bucket, key)?;
                Some((match_kind, ids.clone()))
            }
        }
    }
}

fn exact_key<'a, V>(bucket: &'a BTreeMap<String, V>, needle_lower: &str) -> Option<(&'a String, &'a V)> {
    bucket.iter().find(|(k, _)| k.to_lowercase() == needle_lower)
}

/// Exact match first, then the first key (in sorted order) related by
/// substring containment in either direction.
///
/// There is no minimum length on either side, so a short concept such as
/// "ice" also matches "service". Callers that need precision should inspect
/// [`MatchKind::Partial`] matches.
fn find_key<'a, V>(bucket: &'a BTreeMap<String, V>, concept_text: &str) -> Option<(MatchKind, &'a V)> {
    let needle = concept_text.to_lowercase();
    if let Some((_, value)) = exact_key(bucket, &needle) {
        return Some((MatchKind::Exact, value));
    }
    bucket
        .iter()
        .find(|(k, _)| {
            let key = k.to_lowercase();
            key.contains(&needle) || needle.contains(&key)
        })
        .map(|(k, value)| (MatchKind::Partial { indexed: k.clone() }, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ExtractorOptions;
    use crate::index::IndexRecord;
    use climacheck_core::models::ExtractionSource;

    fn querier() -> ConceptIndexQuerier {
        let records = vec![
            IndexRecord {
                id: "p1".into(),
                text: "CO2 levels rising".into(),
            },
            IndexRecord {
                id: "p2".into(),
                text: "Sea level rise accelerating".into(),
            },
        ];
        let index = ConceptIndex::build(&records, &ConceptExtractor::default());
        ConceptIndexQuerier::new(Arc::new(index), ConceptExtractor::default())
    }

    #[test]
    fn flat_lookup_uses_pattern_key() {
        let q = querier();
        let concept = Concept::new("sea level rising", "CLIMATE_VAR", 3, 19, ExtractionSource::Regex)
            .with_pattern_key("sea_level_rise");
        let ids = q.match_concepts(&[concept], IndexKind::Flat);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["p2".to_string()]);
    }

    #[test]
    fn partial_match_either_direction() {
        let mut bucket = BTreeMap::new();
        bucket.insert("sea level rise".to_string(), 1);
        bucket.insert("Sea".to_string(), 2);
        let (kind, v) = find_key(&bucket, "SEA").unwrap();
        assert_eq!((kind, *v), (MatchKind::Exact, 2));
        let (kind, v) = find_key(&bucket, "level").unwrap();
        assert_eq!(*v, 1);
        assert_eq!(
            kind,
            MatchKind::Partial {
                indexed: "sea level rise".into()
            }
        );
        // "Sea" sorts before "sea level rise" and is contained in the needle.
        let (_, v) = find_key(&bucket, "sea levels").unwrap();
        assert_eq!(*v, 2);
    }

    #[test]
    fn unknown_type_matches_nothing() {
        let q = querier();
        let concept = Concept::new("x", "NO_SUCH_TYPE", 0, 1, ExtractionSource::Regex);
        assert!(q.match_concepts(&[concept], IndexKind::Hybrid).is_empty());
    }

    #[test]
    fn query_reports_match_kinds() {
        let q = ConceptIndexQuerier::new(
            querier().index.clone(),
            ConceptExtractor::new(ExtractorOptions::patterns_only()),
        );
        let result = q.query("Is sea level rising?", IndexKind::Flat);
        assert_eq!(result.sentence_ids.iter().collect::<Vec<_>>(), vec!["p2"]);
        assert_eq!(result.exact_matches(), 1);
    }

    #[test]
    fn unmerged_query_keeps_overlapping_pattern_hits() {
        let records = vec![
            IndexRecord {
                id: "p1".into(),
                text: "CO2 levels rising".into(),
            },
            IndexRecord {
                id: "p2".into(),
                text: "Net zero targets announced".into(),
            },
        ];
        let index = Arc::new(ConceptIndex::build(&records, &ConceptExtractor::default()));
        let extractor = ConceptExtractor::without_taggers(ExtractorOptions::patterns_only());
        let text = "Can we reach net zero CO2 by 2050?";

        let merged = ConceptIndexQuerier::new(index.clone(), extractor.clone()).query(text, IndexKind::Flat);
        assert!(!merged.sentence_ids.contains("p1"));

        let raw = ConceptIndexQuerier::new(index, extractor)
            .unmerged()
            .query(text, IndexKind::Flat);
        assert_eq!(raw.sentence_ids.iter().collect::<Vec<_>>(), vec!["p1", "p2"]);
        assert!(raw.total_concepts > merged.total_concepts);
    }

    #[test]
    fn concept_sentences_filters_by_type() {
        let q = querier();
        let ids = q.concept_sentences("SEA_LEVEL_RISE", Some("CLIMATE_VAR"), IndexKind::Flat);
        assert!(ids.contains("p2"));
        assert!(q
            .concept_sentences("sea_level_rise", Some("EMISSION"), IndexKind::Flat)
            .is_empty());
    }
}
