//! Export error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {index} does not serialize to an object")]
    NotAnObject { index: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Download failed: {0}")]
    Download(#[from] commdash_ui::UiError),
}

pub type ExportResult<T> = Result<T, ExportError>;
