//! Order-preserving passage deduplication.

use std::collections::HashSet;

use climacheck_core::models::{DedupKey, Passage};

/// Keep the first passage per ID.
///
/// A passage without an ID is kept only when its text differs from the text
/// of every passage kept so far. A passage with neither ID nor text is dropped.
pub fn dedup_passages<I>(passages: I) -> Vec<Passage>
where
    I: IntoIterator<Item = Passage>,
{
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut kept_texts: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for passage in passages {
        let keep = match passage.dedup_key() {
            Some(DedupKey::Id(id)) => !seen_ids.contains(id),
            Some(DedupKey::Text(text)) => !kept_texts.contains(text),
            None => false,
        };
        if !keep {
            continue;
        }
        if !passage.id.is_empty() {
            seen_ids.insert(passage.id.clone());
        }
        kept_texts.insert(passage.text.clone());
        out.push(passage);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(passages: &[Passage]) -> Vec<&str> {
        passages.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let out = dedup_passages(vec![
            Passage::new("p2", "second"),
            Passage::new("p1", "first"),
            Passage::new("p2", "second again"),
        ]);
        assert_eq!(ids(&out), vec!["p2", "p1"]);
        assert_eq!(out[0].text, "second");
    }

    #[test]
    fn id_less_passages_dedup_on_text() {
        let out = dedup_passages(vec![
            Passage::new("p1", "shared text"),
            Passage::new("", "shared text"),
            Passage::new("", "unique"),
            Passage::new("", "unique"),
            Passage::new("", ""),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "p1");
        assert_eq!(out[1].text, "unique");
    }

    #[test]
    fn same_text_different_ids_are_both_kept() {
        let out = dedup_passages(vec![Passage::new("a", "same"), Passage::new("b", "same")]);
        assert_eq!(ids(&out), vec!["a", "b"]);
    }
}
