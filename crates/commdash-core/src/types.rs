//! Visual state types shared by the surface, the notifier and the indicator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification severity.
///
/// Each severity maps to a fixed Bootstrap alert class and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ];

    /// Alert style class for the banner.
    #[must_use]
    pub fn alert_class(&self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Error => "alert-danger",
        }
    }

    /// Icon class shown in front of the message.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "bi-info-circle",
            Self::Success => "bi-check-circle",
            Self::Warning | Self::Error => "bi-exclamation-triangle",
        }
    }

    /// Lowercase label, also used as a metrics label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Unrecognized labels fall back to `Info`.
impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        match label {
            "error" => Self::Error,
            "success" => Self::Success,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known reachability of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Badge background class.
    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Connected => "bg-success",
            Self::Disconnected => "bg-danger",
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Connected => "bi-database",
            Self::Disconnected => "bi-database-x",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
