//! Label extraction from the response shapes NLI endpoints return.

use climacheck_core::models::EntailmentLabel;
use serde_json::Value;
use tracing::warn;

/// Pull the top label out of `[{label}]`, `[[{label}, ...]]` or `{label}`.
///
/// Anything else, including a label outside the three-way vocabulary,
/// reads as neutral.
pub fn label_from_value(value: &Value) -> EntailmentLabel {
    let top = match value {
        Value::Array(items) => match items.first() {
            Some(Value::Array(inner)) => inner.first(),
            first => first,
        },
        Value::Object(_) => Some(value),
        _ => None,
    };
    top.and_then(|v| v.get("label"))
        .and_then(Value::as_str)
        .and_then(EntailmentLabel::parse_loose)
        .unwrap_or(EntailmentLabel::Neutral)
}

/// Parse a raw response body. Unparseable bodies read as neutral.
pub fn label_from_body(body: &str) -> EntailmentLabel {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => label_from_value(&value),
        Err(e) => {
            warn!(error = %e, "unparseable NLI response, reading as neutral");
            EntailmentLabel::Neutral
        }
    }
}
