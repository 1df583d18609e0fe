//! Runner configuration.

use std::path::Path;

use commdash_client::ClientConfig;
use commdash_export::ExportConfig;
use commdash_ui::UiConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Environment variable prefix for overrides (`COMMDASH__CLIENT__BASE_URL`).
pub const ENV_PREFIX: &str = "COMMDASH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the page shown at start-up.
    #[serde(default = "default_page")]
    pub page: String,
    /// Directory downloads are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_page() -> String {
    "/".to_string()
}

fn default_export_dir() -> String {
    "exports".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
            export_dir: default_export_dir(),
            client: ClientConfig::default(),
            ui: UiConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a TOML file as is.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Read `path` if it exists and layer `COMMDASH__*` environment
    /// overrides on top. A missing file means defaults.
    pub fn load(path: &str) -> AppResult<Self> {
        Self::load_from(path, None)
    }

    /// Like [`AppConfig::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_from(path: &str, env: Option<config::Map<String, String>>) -> AppResult<Self> {
        if !Path::new(path).exists() {
            warn!(path = %path, "Config file not found, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(Path::new(path)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| AppError::Config(format!("Failed to load config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
