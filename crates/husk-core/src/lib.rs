//! # husk-core
//!
//! Core types shared across all husk crates.
//!
//! This crate provides:
//! - PackageDetail and Downloads types mirroring Packagist's package schema
//! - The VendorCatalog mapping produced by aggregation
//! - HuskError enum for unified error handling

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{HuskError, HuskResult};
pub use types::{Downloads, PackageDetail, VendorCatalog};
