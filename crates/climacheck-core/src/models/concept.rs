use std::fmt;

use serde::{Deserialize, Serialize};

/// The method that produced a concept.
///
/// Declaration order is priority order (highest first), so the derived `Ord`
/// is also the order in which extraction results are flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Exact-phrase matcher.
    EntityRuler,
    /// Pattern catalog matcher.
    Regex,
    /// Climate-domain rule matcher.
    DomainSpecific,
    /// Transformer NER tagger.
    Transformers,
    /// Statistical NER tagger.
    Spacy,
    /// Heuristic chunk tagger.
    Nltk,
}

impl ExtractionSource {
    pub const ALL: [ExtractionSource; 6] = [
        ExtractionSource::EntityRuler,
        ExtractionSource::Regex,
        ExtractionSource::DomainSpecific,
        ExtractionSource::Transformers,
        ExtractionSource::Spacy,
        ExtractionSource::Nltk,
    ];

    /// Tie-break rank when spans overlap. Higher wins.
    pub fn priority(self) -> u8 {
        match self {
            Self::EntityRuler => 6,
            Self::Regex => 5,
            Self::DomainSpecific => 4,
            Self::Transformers => 3,
            Self::Spacy => 2,
            Self::Nltk => 1,
        }
    }

    /// Fixed confidence assigned to every concept from this source.
    pub fn confidence(self) -> f64 {
        match self {
            Self::EntityRuler | Self::Regex => 1.0,
            Self::DomainSpecific => 0.9,
            Self::Transformers => 0.8,
            Self::Spacy => 0.7,
            Self::Nltk => 0.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EntityRuler => "entity_ruler",
            Self::Regex => "regex",
            Self::DomainSpecific => "domain_specific",
            Self::Transformers => "transformers",
            Self::Spacy => "spacy",
            Self::Nltk => "nltk",
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, confidence-scored span `[start, end)` found by one extraction method.
///
/// Offsets are byte offsets into the text the concept was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub text: String,
    #[serde(rename = "type")]
    pub concept_type: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
    pub source: ExtractionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruler_id: Option<String>,
}

impl Concept {
    /// Build a concept whose confidence is the fixed confidence of its source.
    pub fn new(
        text: impl Into<String>,
        concept_type: impl Into<String>,
        start: usize,
        end: usize,
        source: ExtractionSource,
    ) -> Self {
        Self {
            text: text.into(),
            concept_type: concept_type.into(),
            start,
            end,
            confidence: source.confidence(),
            source,
            pattern_key: None,
            ruler_id: None,
        }
    }

    pub fn with_pattern_key(mut self, key: impl Into<String>) -> Self {
        self.pattern_key = Some(key.into());
        self
    }

    pub fn with_ruler_id(mut self, id: impl Into<String>) -> Self {
        self.ruler_id = Some(id.into());
        self
    }

    pub fn span_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Half-open interval intersection.
    pub fn overlaps(&self, other: &Concept) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// A concept with an empty span or a non-finite confidence carries no
    /// usable position or score and is dropped before merging.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start && self.confidence.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_declaration_order() {
        let mut sorted = ExtractionSource::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, ExtractionSource::ALL.to_vec());
        for pair in ExtractionSource::ALL.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn source_serializes_as_method_name() {
        let json = serde_json::to_string(&ExtractionSource::DomainSpecific).unwrap();
        assert_eq!(json, "\"domain_specific\"");
        let back: ExtractionSource = serde_json::from_str("\"entity_ruler\"").unwrap();
        assert_eq!(back, ExtractionSource::EntityRuler);
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        let a = Concept::new("sea", "X", 0, 3, ExtractionSource::Regex);
        let b = Concept::new("level", "X", 3, 8, ExtractionSource::Regex);
        assert!(!a.overlaps(&b));
        let c = Concept::new("a level", "X", 2, 5, ExtractionSource::Nltk);
        assert!(a.overlaps(&c) && c.overlaps(&b));
    }

    #[test]
    fn concept_type_serializes_as_type() {
        let c = Concept::new("CO2", "EMISSION", 0, 3, ExtractionSource::Regex).with_pattern_key("co2");
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["type"], "EMISSION");
        assert_eq!(v["pattern_key"], "co2");
        assert!(v.get("ruler_id").is_none());
    }
}
