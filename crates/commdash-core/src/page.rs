//! Dashboard pages and the URL paths that select them.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dashboard page with a refreshable data view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Home overview, served at `/` and `/home`.
    Summary,
    Trends,
    GrossCommission,
    NetCommission,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Summary,
        Page::Trends,
        Page::GrossCommission,
        Page::NetCommission,
    ];

    /// Resolve a URL path to a page. Unknown paths yield `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "/home" => Some(Self::Summary),
            "/trends" => Some(Self::Trends),
            "/gross-commission" => Some(Self::GrossCommission),
            "/net-commission" => Some(Self::NetCommission),
            _ => None,
        }
    }

    /// Canonical path of the page.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Summary => "/",
            Self::Trends => "/trends",
            Self::GrossCommission => "/gross-commission",
            Self::NetCommission => "/net-commission",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Trends => "trends",
            Self::GrossCommission => "gross-commission",
            Self::NetCommission => "net-commission",
        }
    }

    /// Default export filename for the page.
    #[must_use]
    pub fn export_filename(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl FromStr for Page {
    type Err = CoreError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::from_path(path).ok_or_else(|| CoreError::UnknownPage(path.to_string()))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_aliases() {
        assert_eq!(Page::from_path("/"), Some(Page::Summary));
        assert_eq!(Page::from_path("/home"), Some(Page::Summary));
    }

    #[test]
    fn test_known_paths_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(Page::from_path("/settings"), None);
        assert_eq!(Page::from_path("/trends/"), None);
        assert!("/reports".parse::<Page>().is_err());
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(Page::NetCommission.export_filename(), "net-commission.csv");
    }
}
