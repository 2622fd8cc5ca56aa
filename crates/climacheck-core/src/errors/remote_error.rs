/// Failures talking to an external model service.
#[derive(Debug, thiserror::Error)]
pub enum RemoteServiceError {
    #[error("{service} is not configured: {reason}")]
    NotConfigured { service: String, reason: String },

    #[error("{service} failed to initialize: {reason}")]
    InitFailed { service: String, reason: String },

    #[error("{service} request failed: {reason}")]
    RequestFailed { service: String, reason: String },

    #[error("{service} returned an unusable response: {reason}")]
    InvalidResponse { service: String, reason: String },
}
