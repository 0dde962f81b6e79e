//! Fan-out/fan-in aggregation of vendor package details
//!
//! One aggregation request enumerates a vendor's package names, then fetches
//! every detail record concurrently under a single shared deadline. The
//! catalog is all-or-nothing: any worker failure or a deadline expiry voids
//! the whole result, and no partial catalog ever reaches a caller.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use husk_core::error::{HuskError, HuskResult};
use husk_core::types::{PackageDetail, VendorCatalog};
use husk_registry::PackagistClient;

/// Tuning knobs for one aggregator instance
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Overall time budget shared by the entire fan-out
    pub deadline: Duration,
    /// Cap on concurrently running detail fetches
    pub max_in_flight: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(10),
            max_in_flight: 32,
        }
    }
}

/// Concurrent aggregator over a vendor's packages
#[derive(Debug)]
pub struct Aggregator {
    client: Arc<PackagistClient>,
    config: AggregateConfig,
}

impl Aggregator {
    /// Create an aggregator over the given registry client
    pub fn new(client: PackagistClient, mut config: AggregateConfig) -> Self {
        // a zero-wide pool would never make progress
        config.max_in_flight = config.max_in_flight.max(1);
        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Fetch the complete, current catalog for a vendor.
    ///
    /// Enumerates package names, then runs one worker per name against a
    /// shared deadline. Returns the full name-to-detail catalog only when
    /// every worker succeeded in time; the first worker failure or the
    /// deadline expiry fails the whole request and discards any partial
    /// catalog. A vendor with zero packages yields an empty catalog, which
    /// is a valid, cacheable result.
    pub async fn fetch_vendor(&self, vendor: &str) -> HuskResult<VendorCatalog> {
        let names = self.client.list_package_names(vendor).await?;
        debug!(vendor, count = names.len(), "Vendor enumeration complete");

        if names.is_empty() {
            return Ok(VendorCatalog::new());
        }

        let deadline = Instant::now() + self.config.deadline;
        let limiter = Arc::new(Semaphore::new(self.config.max_in_flight));
        let mut workers = JoinSet::new();

        for name in names {
            let client = Arc::clone(&self.client);
            let limiter = Arc::clone(&limiter);
            workers.spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .map_err(|_| HuskError::Upstream {
                        message: format!("Fetch slot closed before package '{name}' was scheduled"),
                        source: None,
                    })?;
                let detail = client.package_detail(&name).await?;
                Ok::<(String, PackageDetail), HuskError>((name, detail))
            });
        }

        // Single collector: workers only produce (name, detail) messages,
        // this loop is the one owner merging them into the catalog.
        let mut catalog = VendorCatalog::new();
        loop {
            let joined = match timeout_at(deadline, workers.join_next()).await {
                Ok(joined) => joined,
                Err(_) => {
                    // Cancels every in-flight fetch at its await point so no
                    // worker can outlive the request or block the collector.
                    workers.abort_all();
                    warn!(vendor, limit = ?self.config.deadline, "Aggregation deadline expired");
                    return Err(HuskError::DeadlineExceeded {
                        vendor: vendor.to_string(),
                        limit: self.config.deadline,
                    });
                }
            };

            match joined {
                Some(Ok(Ok((name, detail)))) => {
                    catalog.insert(name, detail);
                }
                Some(Ok(Err(err))) => {
                    workers.abort_all();
                    warn!(vendor, error = %err, "Detail fetch failed, aborting aggregation");
                    return Err(err);
                }
                Some(Err(join_err)) => {
                    workers.abort_all();
                    return Err(HuskError::Upstream {
                        message: format!("Detail worker for vendor '{vendor}' died: {join_err}"),
                        source: None,
                    });
                }
                None => break,
            }
        }

        debug!(vendor, count = catalog.len(), "Aggregation complete");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests;
