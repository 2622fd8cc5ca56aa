//! # climacheck-retrieval
//!
//! Evidence retrieval over a passage corpus. Five stages per query batch:
//! pattern concepts (R), entity concepts (N), whole-corpus similarity (S),
//! similarity re-rank of R ∪ N (H), and the fused, deduplicated output (F).

pub mod corpus;
pub mod dedup;
pub mod pipeline;
pub mod resources;
pub mod similarity;

pub use corpus::{Corpus, LoadReport};
pub use dedup::dedup_passages;
pub use pipeline::{ControlledRun, FusionPipeline, PipelineRun, PipelineSettings, RunReport, StageReport};
pub use resources::RetrievalResources;
pub use similarity::{cosine_similarity, rank};
