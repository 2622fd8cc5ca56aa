use serde::{Deserialize, Serialize};

/// A unit of evidence text with a stable ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Provenance as supplied by ingestion (object or plain string).
    #[serde(default)]
    pub source: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Identity used when deduplicating passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DedupKey<'a> {
    Id(&'a str),
    /// Only used when the passage has no ID.
    Text(&'a str),
}

impl Passage {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: serde_json::Value::Null,
            embedding: None,
        }
    }

    pub fn with_source(mut self, source: serde_json::Value) -> Self {
        self.source = source;
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Drop the embedding vector. Output passages never carry one.
    pub fn without_embedding(mut self) -> Self {
        self.embedding = None;
        self
    }

    /// `None` for a passage with neither ID nor text; such passages are discarded.
    pub fn dedup_key(&self) -> Option<DedupKey<'_>> {
        if !self.id.is_empty() {
            Some(DedupKey::Id(&self.id))
        } else if !self.text.is_empty() {
            Some(DedupKey::Text(&self.text))
        } else {
            None
        }
    }
}
