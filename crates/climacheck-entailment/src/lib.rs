//! # climacheck-entailment
//!
//! Three-way NLI over (passage, claim) pairs and contradiction detection for
//! a batch of claims and their retrieved evidence.

pub mod detector;
pub mod http_classifier;
pub mod label;
pub mod models;

pub use detector::ContradictionDetector;
pub use http_classifier::{HttpEntailmentClassifier, HttpEntailmentSettings};
pub use models::{ContradictionEvidence, ContradictionResult};
