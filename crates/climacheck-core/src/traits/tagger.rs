use crate::errors::ClimacheckResult;
use crate::models::ExtractionSource;

/// A raw named-entity span before it is mapped onto a concept type.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEntity {
    pub text: String,
    /// Tagger-native label, e.g. `ORG` or `GPE`.
    pub label: String,
    pub start: usize,
    pub end: usize,
    /// Model score, when the tagger reports one.
    pub score: Option<f64>,
}

/// Named-entity tagger plugged into concept extraction.
///
/// The reported source decides the fixed confidence, the overlap priority,
/// and which label table maps native labels to concept types.
pub trait IEntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> ClimacheckResult<Vec<TaggedEntity>>;

    fn source(&self) -> ExtractionSource;

    fn name(&self) -> &str;
}
