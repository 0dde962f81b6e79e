//! Server configuration

use husk_registry::client::DEFAULT_BASE_URL;

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener on
    pub bind_address: String,
    /// Port to bind the listener on
    pub port: u16,
    /// Base URL of the upstream package registry
    pub registry_url: String,
    /// Overall deadline for one aggregation request, in seconds
    pub deadline_secs: u64,
    /// Maximum number of concurrent detail fetches per request
    pub max_in_flight: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            registry_url: DEFAULT_BASE_URL.to_string(),
            deadline_secs: 10,
            max_in_flight: 32,
        }
    }
}
