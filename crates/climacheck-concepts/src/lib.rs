//! # climacheck-concepts
//!
//! Typed concept extraction over claim and passage text, overlap resolution,
//! and the two-shape concept index (flat pattern index + hybrid occurrence
//! index) used to map query concepts to corpus sentence IDs.

pub mod extractor;
pub mod index;
pub mod patterns;
pub mod querier;
pub mod taggers;

pub use extractor::{merge_overlapping, ConceptExtractor, ExtractorOptions};
pub use index::{ConceptIndex, IndexRecord};
pub use querier::{ConceptIndexQuerier, IndexKind};
