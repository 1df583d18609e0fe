//! Error types for commdash-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown page path: {0}")]
    UnknownPage(String),

    #[error("Server reported an error: {0}")]
    Envelope(String),

    #[error("Envelope is missing its {0} payload")]
    MissingPayload(&'static str),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
