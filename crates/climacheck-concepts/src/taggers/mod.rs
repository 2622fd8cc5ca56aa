//! Named-entity taggers and their label tables.

mod heuristic;
mod labels;

pub use heuristic::HeuristicTagger;
pub use labels::concept_type_for_label;
