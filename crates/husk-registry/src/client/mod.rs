//! HTTP client for Packagist's enumeration and detail endpoints
//!
//! Every request carries its own fixed timeout, independent of any deadline
//! the caller layers on top. Failed calls are not retried: the aggregation
//! built on this client treats a single failure as fatal for the whole
//! request, so retrying here would only delay the outcome.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::debug;

use husk_core::error::{HuskError, HuskResult};
use husk_core::types::PackageDetail;

use crate::api::{PackageDetailResponse, PackageListResponse};

/// Default Packagist registry base URL
pub const DEFAULT_BASE_URL: &str = "https://packagist.org";

/// Fixed timeout for every single upstream request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for Packagist registry operations
#[derive(Debug, Clone)]
pub struct PackagistClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base registry URL
    base_url: String,
}

impl PackagistClient {
    /// Create a new client against the public Packagist registry
    pub fn new() -> HuskResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom registry base URL
    pub fn with_base_url(base_url: String) -> HuskResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .user_agent(concat!("husk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HuskError::upstream("Failed to create HTTP client".to_string(), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Enumerate the names of every package published under a vendor
    pub async fn list_package_names(&self, vendor: &str) -> HuskResult<Vec<String>> {
        let url = format!("{}/packages/list.json", self.base_url);
        debug!(vendor, url = %url, "Enumerating vendor packages");

        let response = self
            .client
            .get(&url)
            .query(&[("vendor", vendor)])
            .send()
            .await
            .map_err(|e| HuskError::upstream(format!("Failed to fetch package list for vendor '{vendor}'"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HuskError::Upstream {
                message: format!("Package list for vendor '{vendor}' returned {status}"),
                source: None,
            });
        }

        let list: PackageListResponse = response
            .json()
            .await
            .map_err(|e| HuskError::Decode {
                message: format!("Invalid package list body for vendor '{vendor}': {e}"),
            })?;

        Ok(list.package_names)
    }

    /// Fetch the full detail record for one package
    pub async fn package_detail(&self, name: &str) -> HuskResult<PackageDetail> {
        let url = format!("{}/packages/{}.json", self.base_url, name);
        debug!(package = name, url = %url, "Fetching package detail");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HuskError::upstream(format!("Failed to fetch detail for package '{name}'"), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HuskError::PackageNotFound {
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(HuskError::Upstream {
                message: format!("Detail for package '{name}' returned {status}"),
                source: None,
            });
        }

        let detail: PackageDetailResponse = response
            .json()
            .await
            .map_err(|e| HuskError::Decode {
                message: format!("Invalid detail body for package '{name}': {e}"),
            })?;

        Ok(detail.package)
    }
}
