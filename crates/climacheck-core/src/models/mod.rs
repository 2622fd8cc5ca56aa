mod concept;
mod degradation_event;
mod entailment;
mod evaluation;
mod gold;
mod passage;
mod resource;
mod retrieval_state;

pub use concept::{Concept, ExtractionSource};
pub use degradation_event::DegradationEvent;
pub use entailment::EntailmentLabel;
pub use evaluation::{EvaluationPair, Metric, MetricResult, MetricScores, RelevantTarget};
pub use gold::GoldEntry;
pub use passage::{DedupKey, Passage};
pub use resource::Resource;
pub use retrieval_state::{RetrievalStage, RetrievalState};
