//! UI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid key binding: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type UiResult<T> = Result<T, UiError>;
