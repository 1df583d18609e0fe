//! Export configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Filename used when the caller does not name one.
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

fn default_filename() -> String {
    "data.csv".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_filename: default_filename(),
        }
    }
}
