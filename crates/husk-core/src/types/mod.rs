//! Core data types for vendor package aggregation.
//!
//! This module provides the types flowing through an aggregation request:
//! - Package detail structures mirroring Packagist's JSON schema
//! - The catalog mapping assembled from concurrent detail fetches

pub mod package;

// Re-export all public types
pub use package::{Downloads, PackageDetail};

use std::collections::BTreeMap;

/// Aggregated mapping from package name to its detail record.
///
/// A `BTreeMap` rather than `HashMap` on purpose: iteration (and therefore
/// serialization) is ordered by package name, so the serialized form of two
/// catalogs with the same content is identical no matter which order the
/// detail fetches completed in.
pub type VendorCatalog = BTreeMap<String, PackageDetail>;
