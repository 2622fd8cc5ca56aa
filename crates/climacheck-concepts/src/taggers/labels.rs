use climacheck_core::models::ExtractionSource;

/// Map a tagger-native label onto a concept type.
///
/// Each tagger family has its own vocabulary. Labels outside the table, and
/// sources that are not taggers, yield `None` and the entity is dropped.
/// Transformer labels may carry a `B-`/`I-` prefix.
pub fn concept_type_for_label(source: ExtractionSource, label: &str) -> Option<&'static str> {
    match source {
        ExtractionSource::Spacy => spacy_label(label),
        ExtractionSource::Nltk => chunker_label(label),
        ExtractionSource::Transformers => {
            let bare = label
                .strip_prefix("B-")
                .or_else(|| label.strip_prefix("I-"))
                .unwrap_or(label);
            transformer_label(bare)
        }
        _ => None,
    }
}

fn spacy_label(label: &str) -> Option<&'static str> {
    Some(match label {
        "ORG" => "AGENCIES",
        "GPE" | "LOC" => "LOCATION",
        "PERSON" => "PERSON",
        "DATE" | "TIME" => "TEMPORAL",
        "MONEY" => "ECONOMIC",
        "PERCENT" | "QUANTITY" | "CARDINAL" | "ORDINAL" => "QUANTITATIVE",
        "PRODUCT" | "FAC" => "TECHNOLOGY",
        "EVENT" => "CLIMATE_VAR",
        "LANGUAGE" => "OTHER",
        "LAW" => "POLICY",
        "NORP" => "SOCIAL",
        "WORK_OF_ART" => "REPORTS",
        _ => return None,
    })
}

fn chunker_label(label: &str) -> Option<&'static str> {
    Some(match label {
        "ORGANIZATION" => "AGENCIES",
        "PERSON" => "PERSON",
        "LOCATION" | "GPE" | "GSP" => "LOCATION",
        "FACILITY" => "TECHNOLOGY",
        _ => return None,
    })
}

fn transformer_label(label: &str) -> Option<&'static str> {
    Some(match label {
        "ORG" => "AGENCIES",
        "PER" => "PERSON",
        "LOC" => "LOCATION",
        "MISC" => "OTHER",
        _ => return None,
    })
}
