//! Category definitions for snapshot sources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract families served by the dashboard
///
/// Each category corresponds to one archived CSV of daily distribution
/// snapshots, covering every contract tied to that kind of economic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Federal funds target-level contracts (one market group per FOMC meeting)
    FedLevels,
    /// Monthly headline CPI release contracts
    HeadlineCpiReleases,
    /// Monthly unemployment-rate release contracts
    UnemploymentReleases,
}

impl Category {
    /// Stable identifier used in source file names and query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FedLevels => "fed_levels",
            Category::HeadlineCpiReleases => "headline_cpi_releases",
            Category::UnemploymentReleases => "unemployment_releases",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fed_levels" => Ok(Category::FedLevels),
            "headline_cpi_releases" => Ok(Category::HeadlineCpiReleases),
            "unemployment_releases" => Ok(Category::UnemploymentReleases),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}
