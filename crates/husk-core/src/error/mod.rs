//! Error types and result aliases for husk operations.
//!
//! Provides a unified error type covering validation, upstream registry,
//! aggregation, and server lifecycle failures.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for all husk operations
#[derive(Error, Debug)]
pub enum HuskError {
    // Request validation errors
    #[error("vendor query parameter is required")]
    MissingVendor,

    // Upstream registry errors
    #[error("Package '{name}' not found in registry")]
    PackageNotFound { name: String },

    #[error("Upstream registry error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to decode registry response: {message}")]
    Decode { message: String },

    // Aggregation errors
    #[error("Aggregation for vendor '{vendor}' exceeded the {limit:?} deadline")]
    DeadlineExceeded { vendor: String, limit: Duration },

    // Response encoding errors
    #[error("Failed to encode response body: {message}")]
    Encode { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for husk operations
pub type HuskResult<T> = Result<T, HuskError>;

impl HuskError {
    /// Create an upstream error from any error type
    pub fn upstream<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check whether this failure came from the upstream registry
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            HuskError::PackageNotFound { .. } | HuskError::Upstream { .. } | HuskError::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_constructor_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = HuskError::upstream("connection dropped".to_string(), io);

        assert!(err.is_upstream());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_deadline_is_not_upstream() {
        let err = HuskError::DeadlineExceeded {
            vendor: "acme".to_string(),
            limit: Duration::from_secs(10),
        };

        assert!(!err.is_upstream());
    }

    #[test]
    fn test_missing_vendor_message() {
        let err = HuskError::MissingVendor;
        assert_eq!(err.to_string(), "vendor query parameter is required");
    }
}
