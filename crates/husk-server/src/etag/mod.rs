//! Content-derived conditional-cache validation
//!
//! Derives a stable fingerprint from an aggregated catalog and compares it
//! against a caller-supplied validator. The catalog is assembled by workers
//! completing in arbitrary order, so the fingerprint must be computed over a
//! canonical form: serializing the `BTreeMap` emits entries sorted by package
//! name, which is exactly that canonicalization. Blake3 is used as the digest
//! the same way the rest of the workspace hashes content; the fingerprint is
//! a cache validator, not a security token.

use husk_core::error::{HuskError, HuskResult};
use husk_core::types::VendorCatalog;

/// Compute the fingerprint of a catalog.
///
/// Two catalogs with identical key/value content produce identical
/// fingerprints regardless of insertion order. The empty catalog has a
/// stable, reproducible fingerprint of its own.
pub fn fingerprint(catalog: &VendorCatalog) -> HuskResult<String> {
    let canonical = serde_json::to_vec(catalog).map_err(|e| HuskError::Encode {
        message: e.to_string(),
    })?;
    Ok(blake3::hash(&canonical).to_hex().to_string())
}

/// Compute a catalog's fingerprint and compare it with the caller's validator.
///
/// Returns the fingerprint plus whether the caller's copy is still current.
/// Accepts the bare digest as well as the quoted form a well-behaved proxy
/// may echo back in `If-None-Match`.
pub fn validate(
    catalog: &VendorCatalog,
    caller_validator: Option<&str>,
) -> HuskResult<(String, bool)> {
    let digest = fingerprint(catalog)?;
    let unchanged = caller_validator
        .map(|v| v.trim().trim_matches('"') == digest)
        .unwrap_or(false);
    Ok((digest, unchanged))
}
