//! HTTP routes and request handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use husk_core::error::HuskError;

use crate::aggregate::Aggregator;
use crate::etag;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(vendor_packages))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct VendorQuery {
    vendor: Option<String>,
}

/// Aggregate and serve the full package catalog for a vendor.
///
/// Upstream failures and deadline expiries both surface as a generic 500;
/// the distinction lives in the logs, not in the response.
async fn vendor_packages(
    State(state): State<AppState>,
    Query(query): Query<VendorQuery>,
    headers: HeaderMap,
) -> Response {
    let vendor = match query.vendor.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(vendor) => vendor.to_string(),
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &HuskError::MissingVendor.to_string(),
            );
        }
    };

    let catalog = match state.aggregator.fetch_vendor(&vendor).await {
        Ok(catalog) => catalog,
        Err(err @ HuskError::DeadlineExceeded { .. }) => {
            error!(vendor = %vendor, error = %err, "Aggregation timed out");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch packages");
        }
        Err(err) => {
            error!(vendor = %vendor, error = %err, "Aggregation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch packages");
        }
    };

    let caller_validator = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    let (digest, unchanged) = match etag::validate(&catalog, caller_validator) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(vendor = %vendor, error = %err, "Failed to generate ETag");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate ETag");
        }
    };

    if unchanged {
        info!(vendor = %vendor, etag = %digest, "Catalog unchanged, short-circuiting");
        return StatusCode::NOT_MODIFIED.into_response();
    }

    info!(vendor = %vendor, packages = catalog.len(), "Serving aggregated catalog");
    ([(header::ETAG, digest)], Json(catalog)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
