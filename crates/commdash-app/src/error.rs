//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] commdash_client::ApiError),

    #[error("Export error: {0}")]
    Export(#[from] commdash_export::ExportError),

    #[error("UI error: {0}")]
    Ui(#[from] commdash_ui::UiError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] commdash_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
