mod data_error;
mod remote_error;
mod retrieval_error;
mod validation_error;

pub use data_error::DataError;
pub use remote_error::RemoteServiceError;
pub use retrieval_error::RetrievalError;
pub use validation_error::ValidationError;

/// Umbrella error for every climacheck crate.
///
/// `ConfigError` and `ValidationError` are fatal to the invocation that raised
/// them. `DataError` and `RemoteServiceError` are normally recovered where they
/// occur (skip the record, substitute the fallback) and only surface here when
/// a caller asks for a whole resource explicitly.
#[derive(Debug, thiserror::Error)]
pub enum ClimacheckError {
    #[error("data error: {0}")]
    DataError(#[from] DataError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("remote service error: {0}")]
    RemoteServiceError(#[from] RemoteServiceError),

    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type ClimacheckResult<T> = Result<T, ClimacheckError>;
