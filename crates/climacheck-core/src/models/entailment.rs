use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-way natural language inference label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntailmentLabel {
    Entailment,
    Contradiction,
    Neutral,
}

impl EntailmentLabel {
    pub const ALL: [EntailmentLabel; 3] = [
        EntailmentLabel::Entailment,
        EntailmentLabel::Contradiction,
        EntailmentLabel::Neutral,
    ];

    /// Map the label vocabularies seen in gold sets and model outputs onto the
    /// three canonical labels. Case and surrounding whitespace are ignored.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "entailment" | "entail" | "supports" | "true" => Some(Self::Entailment),
            "contradiction" | "contradict" | "refutes" | "false" => Some(Self::Contradiction),
            "neutral" | "neither" | "unknown" | "unrelated" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entailment => "entailment",
            Self::Contradiction => "contradiction",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EntailmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_synonyms_case_insensitively() {
        assert_eq!(EntailmentLabel::parse_loose(" SUPPORTS "), Some(EntailmentLabel::Entailment));
        assert_eq!(EntailmentLabel::parse_loose("Refutes"), Some(EntailmentLabel::Contradiction));
        assert_eq!(EntailmentLabel::parse_loose("unrelated"), Some(EntailmentLabel::Neutral));
        assert_eq!(EntailmentLabel::parse_loose("LABEL_2"), None);
    }
}
