//! Packagist API response types

use serde::{Deserialize, Serialize};

use husk_core::types::PackageDetail;

/// Response from the vendor package list endpoint
///
/// `GET /packages/list.json?vendor={vendor}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageListResponse {
    /// Names of every package published under the vendor
    #[serde(rename = "packageNames")]
    pub package_names: Vec<String>,
}

/// Response envelope from the package detail endpoint
///
/// `GET /packages/{name}.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageDetailResponse {
    /// The package detail record
    pub package: PackageDetail,
}
