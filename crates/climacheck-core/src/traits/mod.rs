mod embedding;
mod entailment;
mod tagger;

pub use embedding::IEmbeddingProvider;
pub use entailment::IEntailmentClassifier;
pub use tagger::{IEntityTagger, TaggedEntity};
