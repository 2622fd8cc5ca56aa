/// climacheck version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gold-set marker for a claim that has no supporting evidence in the corpus.
pub const CONTROL_SENTINEL: &str = "__CONTROL_CASE__";

/// Maximum passages kept by pattern retrieval, per query.
pub const PATTERN_STAGE_CAP: usize = 10;

/// Maximum passages kept by entity retrieval, per query.
pub const ENTITY_STAGE_CAP: usize = 15;

/// Hard ceiling on the hybrid re-rank cut, per query.
pub const HYBRID_STAGE_CAP: usize = 3;

/// Maximum passages in the fused output, per query.
pub const FINAL_STAGE_CAP: usize = 10;

/// Cutoffs evaluated when the caller does not supply any.
pub const DEFAULT_K_VALUES: [usize; 4] = [1, 3, 5, 10];

/// The cutoff used for report recommendations.
pub const RECOMMENDATION_K: usize = 5;

/// Records between progress logs while building a concept index.
pub const INDEX_PROGRESS_INTERVAL: usize = 1000;

/// Minimum tagger score for a transformer-backed entity to be kept.
pub const TRANSFORMER_MIN_SCORE: f64 = 0.8;
