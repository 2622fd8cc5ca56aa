//! Offline chunk tagger.
//!
//! Finds runs of capitalized words and labels the ones it can classify
//! without a model: acronyms and runs containing an organisation noun become
//! `ORGANIZATION`, runs introduced by a locative preposition become
//! `LOCATION`. Everything else is left untagged.

use std::sync::LazyLock;

use climacheck_core::errors::ClimacheckResult;
use climacheck_core::models::ExtractionSource;
use climacheck_core::traits::{IEntityTagger, TaggedEntity};
use regex::Regex;

static CAPITALIZED_RUN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]*(?:[ \t]+[A-Z][A-Za-z]*)*\b").ok());

const ORG_NOUNS: &[&str] = &[
    "Agency",
    "Association",
    "Bank",
    "Commission",
    "Council",
    "Department",
    "Fund",
    "Institute",
    "Ministry",
    "Organisation",
    "Organization",
    "Panel",
    "Program",
    "Programme",
    "Union",
    "University",
];

const LOCATIVES: &[&str] = &["in", "across", "from", "near", "at"];

/// Capitalized only because they open a sentence or a noun phrase.
const LEADING_FILLERS: &[&str] = &[
    "A", "An", "Are", "At", "From", "In", "Is", "On", "That", "The", "These", "This", "Those",
];

/// Capitalization-driven tagger reporting as the chunker source.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }

    /// Drop leading filler words from a run, returning the new start offset.
    fn trim_fillers(run: &str, start: usize) -> Option<(usize, &str)> {
        let mut rest = run;
        let mut offset = start;
        loop {
            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if !LEADING_FILLERS.contains(&&rest[..word_end]) {
                break;
            }
            let next = rest[word_end..].trim_start();
            if next.is_empty() {
                return None;
            }
            offset += rest.len() - next.len();
            rest = next;
        }
        Some((offset, rest))
    }

    fn classify(text: &str, start: usize, run: &str) -> Option<&'static str> {
        let words: Vec<&str> = run.split_whitespace().collect();
        let is_acronym = words.len() == 1
            && words[0].len() >= 2
            && words[0].chars().all(|c| c.is_ascii_uppercase());
        if is_acronym || words.iter().any(|w| ORG_NOUNS.contains(w)) {
            return Some("ORGANIZATION");
        }
        let preceding = text[..start].split_whitespace().next_back()?;
        if LOCATIVES.contains(&preceding.to_lowercase().as_str()) {
            return Some("LOCATION");
        }
        None
    }
}

impl IEntityTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> ClimacheckResult<Vec<TaggedEntity>> {
        let Some(re) = CAPITALIZED_RUN.as_ref() else {
            return Ok(Vec::new());
        };
        Ok(re
            .find_iter(text)
            .filter_map(|m| {
                let (start, run) = Self::trim_fillers(m.as_str(), m.start())?;
                Self::classify(text, start, run).map(|label| TaggedEntity {
                    text: run.to_string(),
                    label: label.to_string(),
                    start,
                    end: m.end(),
                    score: None,
                })
            })
            .collect())
    }

    fn source(&self) -> ExtractionSource {
        ExtractionSource::Nltk
    }

    fn name(&self) -> &str {
        "heuristic-chunker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<(String, String)> {
        HeuristicTagger
            .tag(text)
            .unwrap()
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn sentence_initial_word_is_not_tagged() {
        assert!(labels("Is sea level rising?").is_empty());
    }

    #[test]
    fn acronyms_and_org_nouns_are_organizations() {
        assert_eq!(
            labels("The IPCC and the World Meteorological Organization agree"),
            vec![
                ("IPCC".to_string(), "ORGANIZATION".to_string()),
                ("World Meteorological Organization".to_string(), "ORGANIZATION".to_string()),
            ]
        );
    }

    #[test]
    fn locative_runs_are_locations() {
        assert_eq!(
            labels("Glaciers in Greenland are retreating"),
            vec![("Greenland".to_string(), "LOCATION".to_string())]
        );
    }

    #[test]
    fn digits_break_runs() {
        assert!(labels("levels of CO2 rose").is_empty());
    }
}
