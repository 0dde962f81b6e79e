//! # husk-server
//!
//! Aggregation service and HTTP surface for the husk vendor API.
//!
//! This crate provides:
//! - The fan-out aggregator that turns one vendor enumeration plus N detail
//!   fetches into a single bounded-time catalog
//! - The conditional-cache (ETag) layer over aggregated catalogs
//! - The axum router, request handler, and server lifecycle

pub mod aggregate;
pub mod config;
pub mod etag;
pub mod routes;

// Re-export main types
pub use aggregate::{AggregateConfig, Aggregator};
pub use config::ServerConfig;
pub use routes::{router, AppState};

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use husk_core::error::{HuskError, HuskResult};
use husk_registry::PackagistClient;

/// Run the API server until a shutdown signal arrives
pub async fn serve(config: ServerConfig) -> HuskResult<()> {
    let client = PackagistClient::with_base_url(config.registry_url.clone())?;
    let aggregator = Aggregator::new(
        client,
        AggregateConfig {
            deadline: Duration::from_secs(config.deadline_secs),
            max_in_flight: config.max_in_flight,
        },
    );
    let app = router(AppState {
        aggregator: Arc::new(aggregator),
    });

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HuskError::io(format!("Failed to bind to {addr}"), e))?;
    info!(addr = %addr, registry = %config.registry_url, "husk API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HuskError::io("Server error".to_string(), e))
}

/// Resolve once a shutdown signal (SIGINT or SIGTERM) has been received
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
