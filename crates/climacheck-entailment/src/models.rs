use serde::{Deserialize, Serialize};

/// A retrieved passage that contradicts a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionEvidence {
    #[serde(rename = "contradictory_passage")]
    pub passage: String,
    /// Passage provenance; `"Unknown source"` when the passage had none.
    pub source: serde_json::Value,
}

/// Contradiction findings for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionResult {
    pub sentence: String,
    pub contradictions: Vec<ContradictionEvidence>,
    pub has_contradictions: bool,
}

impl ContradictionResult {
    pub fn new(sentence: impl Into<String>, contradictions: Vec<ContradictionEvidence>) -> Self {
        let has_contradictions = !contradictions.is_empty();
        Self {
            sentence: sentence.into(),
            contradictions,
            has_contradictions,
        }
    }

    pub fn none(sentence: impl Into<String>) -> Self {
        Self::new(sentence, Vec::new())
    }
}
