//! Packagist registry client for the husk vendor API
//!
//! This crate provides HTTP client functionality for enumerating a vendor's
//! packages and fetching per-package detail from Packagist, with connection
//! pooling and fixed per-request timeouts.

pub mod api;
pub mod client;

// Re-export main types
pub use api::{PackageDetailResponse, PackageListResponse};
pub use client::PackagistClient;
