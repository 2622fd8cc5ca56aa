//! # climacheck-core
//!
//! Foundation crate for the climacheck evidence retrieval engine.
//! Defines the shared data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{ClimacheckConfig, RunConfig};
pub use errors::{ClimacheckError, ClimacheckResult};
pub use models::{Concept, ExtractionSource, Passage, RelevantTarget, Resource};
