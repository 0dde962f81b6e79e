//! Package detail types.
//!
//! Defines the structures decoded from Packagist's per-package detail
//! endpoint and re-serialized verbatim in aggregated responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full detail record for one published package
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PackageDetail {
    pub name: String,
    pub description: Option<String>,
    /// Publish timestamp of the package
    pub time: DateTime<Utc>,
    /// Package type, e.g. "library" or "composer-plugin"
    #[serde(rename = "type")]
    pub package_type: String,
    pub repository: String,
    pub downloads: Downloads,
    pub favers: u64,
}

/// Download counters reported by the registry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Downloads {
    pub total: u64,
    pub monthly: u64,
    pub daily: u64,
}

impl PackageDetail {
    /// Vendor prefix of the package name, if the name is namespaced
    pub fn vendor(&self) -> Option<&str> {
        self.name.split_once('/').map(|(vendor, _)| vendor)
    }
}
