//! Exact-phrase matcher.
//!
//! Phrases match case-sensitively on word boundaries. When phrases overlap,
//! the longest wins, then the earliest.

use climacheck_core::models::{Concept, ExtractionSource};

use super::catalog::RULER_TABLE;

struct PhraseHit {
    start: usize,
    end: usize,
    ruler_id: &'static str,
    concept_type: &'static str,
}

/// Number of phrases across all ruler entries.
pub fn phrase_count() -> usize {
    RULER_TABLE.iter().map(|(_, _, phrases)| phrases.len()).sum()
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Run the phrase table over `text`.
pub fn match_phrases(text: &str) -> Vec<Concept> {
    let mut hits = Vec::new();
    for (ruler_id, concept_type, phrases) in RULER_TABLE {
        for phrase in *phrases {
            for (start, matched) in text.match_indices(phrase) {
                let end = start + matched.len();
                if on_word_boundary(text, start, end) {
                    hits.push(PhraseHit {
                        start,
                        end,
                        ruler_id,
                        concept_type,
                    });
                }
            }
        }
    }

    hits.sort_by(|a, b| {
        (b.end - b.start)
            .cmp(&(a.end - a.start))
            .then(a.start.cmp(&b.start))
    });
    let mut kept: Vec<PhraseHit> = Vec::new();
    for hit in hits {
        if kept.iter().all(|k| hit.end <= k.start || k.end <= hit.start) {
            kept.push(hit);
        }
    }
    kept.sort_by_key(|h| h.start);

    kept.into_iter()
        .map(|h| {
            Concept::new(
                &text[h.start..h.end],
                h.concept_type,
                h.start,
                h.end,
                ExtractionSource::EntityRuler,
            )
            .with_ruler_id(h.ruler_id)
        })
        .collect()
}
