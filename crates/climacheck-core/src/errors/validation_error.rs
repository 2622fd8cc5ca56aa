/// Caller contract violations in evaluation code.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("length mismatch: {left_name} has {left} items, {right_name} has {right}")]
    LengthMismatch {
        left_name: String,
        left: usize,
        right_name: String,
        right: usize,
    },

    #[error("empty input: {what}")]
    EmptyInput { what: String },

    #[error("unrecognized label: {label}")]
    UnrecognizedLabel { label: String },

    #[error("unknown method: {method}")]
    UnknownMethod { method: String },
}
