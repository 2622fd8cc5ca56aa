/// Malformed input data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("malformed document {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    #[error("invalid pattern {key}: {reason}")]
    InvalidPattern { key: String, reason: String },
}
