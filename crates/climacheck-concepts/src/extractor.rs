//! Multi-method concept extraction and overlap resolution.
//!
//! Every enabled method scans the text independently. Candidates are then
//! merged: sorted by `(start asc, confidence desc)`, each candidate is checked
//! against the first already-merged concept it intersects, and the winner of
//! that pair is kept (source priority, then span length, then confidence).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use climacheck_core::constants::TRANSFORMER_MIN_SCORE;
use climacheck_core::models::{Concept, ExtractionSource};
use climacheck_core::traits::IEntityTagger;
use serde::Serialize;
use tracing::{debug, warn};

use crate::patterns;
use crate::taggers::{concept_type_for_label, HeuristicTagger};

/// Which extraction methods run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    pub phrases: bool,
    pub patterns: bool,
    pub domain_rules: bool,
    pub taggers: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            phrases: true,
            patterns: true,
            domain_rules: true,
            taggers: true,
        }
    }
}

impl ExtractorOptions {
    /// Pattern catalog only.
    pub fn patterns_only() -> Self {
        Self {
            phrases: false,
            patterns: true,
            domain_rules: false,
            taggers: false,
        }
    }

    /// Everything except the pattern catalog.
    pub fn entities_only() -> Self {
        Self {
            patterns: false,
            ..Self::default()
        }
    }
}

/// What an extractor is able to run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionStats {
    pub enabled_sources: Vec<ExtractionSource>,
    pub taggers: Vec<String>,
    pub pattern_count: usize,
    pub domain_rule_count: usize,
    pub phrase_count: usize,
}

/// Runs the configured extraction methods over a text.
#[derive(Clone)]
pub struct ConceptExtractor {
    options: ExtractorOptions,
    taggers: Vec<Arc<dyn IEntityTagger>>,
}

impl Default for ConceptExtractor {
    fn default() -> Self {
        Self::new(ExtractorOptions::default())
    }
}

impl ConceptExtractor {
    /// Extractor with the built-in heuristic tagger.
    pub fn new(options: ExtractorOptions) -> Self {
        Self::without_taggers(options).with_tagger(Arc::new(HeuristicTagger::new()))
    }

    /// Extractor with no taggers registered.
    pub fn without_taggers(options: ExtractorOptions) -> Self {
        Self {
            options,
            taggers: Vec::new(),
        }
    }

    /// Register an additional tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn IEntityTagger>) -> Self {
        self.taggers.push(tagger);
        self
    }

    pub fn options(&self) -> ExtractorOptions {
        self.options
    }

    /// Run every enabled method, grouped by source.
    pub fn extract_all(&self, text: &str) -> BTreeMap<ExtractionSource, Vec<Concept>> {
        let mut out: BTreeMap<ExtractionSource, Vec<Concept>> = BTreeMap::new();
        if self.options.phrases {
            out.insert(ExtractionSource::EntityRuler, patterns::match_phrases(text));
        }
        if self.options.patterns {
            out.insert(ExtractionSource::Regex, patterns::match_patterns(text));
        }
        if self.options.domain_rules {
            out.insert(
                ExtractionSource::DomainSpecific,
                patterns::match_domain_rules(text),
            );
        }
        if self.options.taggers {
            for tagger in &self.taggers {
                let concepts = self.run_tagger(tagger.as_ref(), text);
                out.entry(tagger.source()).or_default().extend(concepts);
            }
        }
        out
    }

    /// All enabled methods, flattened in source order and merged.
    pub fn extract_concepts(&self, text: &str) -> Vec<Concept> {
        merge_overlapping(self.extract_all(text).into_values().flatten().collect())
    }

    /// All enabled methods, flattened but not merged.
    pub fn extract_unmerged(&self, text: &str) -> Vec<Concept> {
        self.extract_all(text).into_values().flatten().collect()
    }

    pub fn extraction_stats(&self) -> ExtractionStats {
        let mut enabled_sources = Vec::new();
        if self.options.phrases {
            enabled_sources.push(ExtractionSource::EntityRuler);
        }
        if self.options.patterns {
            enabled_sources.push(ExtractionSource::Regex);
        }
        if self.options.domain_rules {
            enabled_sources.push(ExtractionSource::DomainSpecific);
        }
        if self.options.taggers {
            enabled_sources.extend(self.taggers.iter().map(|t| t.source()));
        }
        enabled_sources.sort();
        enabled_sources.dedup();
        ExtractionStats {
            enabled_sources,
            taggers: self.taggers.iter().map(|t| t.name().to_string()).collect(),
            pattern_count: patterns::pattern_catalog().len(),
            domain_rule_count: patterns::domain_rules().len(),
            phrase_count: patterns::phrase_count(),
        }
    }

    fn run_tagger(&self, tagger: &dyn IEntityTagger, text: &str) -> Vec<Concept> {
        let source = tagger.source();
        let entities = match tagger.tag(text) {
            Ok(entities) => entities,
            Err(e) => {
                warn!(tagger = tagger.name(), error = %e, "tagger failed, skipping its concepts");
                return Vec::new();
            }
        };
        entities
            .into_iter()
            .filter(|e| {
                source != ExtractionSource::Transformers
                    || e.score.map_or(true, |s| s >= TRANSFORMER_MIN_SCORE)
            })
            .filter_map(|e| {
                let in_bounds = e.start < e.end
                    && text.is_char_boundary(e.start)
                    && text.is_char_boundary(e.end);
                if !in_bounds {
                    debug!(tagger = tagger.name(), start = e.start, end = e.end, "entity span out of bounds");
                    return None;
                }
                let concept_type = concept_type_for_label(source, &e.label)?;
                Some(Concept::new(e.text, concept_type, e.start, e.end, source))
            })
            .collect()
    }
}

/// Resolve overlapping candidates.
///
/// Only the first intersecting merged concept is considered for each
/// candidate. Because candidates arrive in start order and merged concepts
/// stay disjoint, at most one merged concept can contain the candidate's
/// start, so the output is disjoint and sorted by start.
pub fn merge_overlapping(concepts: Vec<Concept>) -> Vec<Concept> {
    let mut candidates: Vec<Concept> = concepts
        .into_iter()
        .filter(Concept::is_well_formed)
        .collect();
    candidates.sort_by(|a, b| {
        a.start.cmp(&b.start).then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut merged: Vec<Concept> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match merged.iter().position(|m| m.overlaps(&candidate)) {
            Some(i) => {
                if should_replace(&candidate, &merged[i]) {
                    merged[i] = candidate;
                }
            }
            None => merged.push(candidate),
        }
    }
    merged
}

fn should_replace(candidate: &Concept, existing: &Concept) -> bool {
    let (new_priority, old_priority) = (candidate.source.priority(), existing.source.priority());
    if new_priority != old_priority {
        return new_priority > old_priority;
    }
    let (new_len, old_len) = (candidate.span_len(), existing.span_len());
    if new_len != old_len {
        return new_len > old_len;
    }
    candidate.confidence > existing.confidence
}
