//! API client error types.

use thiserror::Error;

/// Failure of a wrapped request.
///
/// `Display` is the human message shown in the error notification.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("{0}")]
    Api(String),
}

impl ApiError {
    /// HTTP status for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http_error",
            Self::Transport(_) | Self::ClientBuild(_) | Self::InvalidRequest(_) => {
                "transport_error"
            }
            Self::Decode(_) => "decode_error",
            Self::Api(_) => "api_error",
        }
    }
}

impl From<commdash_core::CoreError> for ApiError {
    fn from(e: commdash_core::CoreError) -> Self {
        Self::Api(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message() {
        let err = ApiError::Http { status: 500 };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.outcome(), "http_error");
    }
}
