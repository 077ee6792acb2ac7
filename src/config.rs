//! Configuration Module
//!
//! Handles loading and managing gateway and client configuration from
//! environment variables.

use std::env;
use std::str::FromStr;

/// Default endpoint the client facade posts cache requests to.
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000/api/cache";

/// Which key-value store the gateway forwards commands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Redis REST command proxy reached over HTTP
    Rest,
    /// In-process store, for local development
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(StoreBackend::Rest),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server and client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Store the gateway talks to
    pub backend: StoreBackend,
    /// Base URL of the REST store; never sent to clients
    pub store_url: Option<String>,
    /// Bearer token for the REST store; never sent to clients
    pub store_token: Option<String>,
    /// Memory backend cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Gateway endpoint used by the client facade
    pub gateway_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - `rest` or `memory` (default: rest)
    /// - `KV_REST_API_URL` - REST store base URL (no default)
    /// - `KV_REST_API_TOKEN` - REST store bearer token (no default)
    /// - `CLEANUP_INTERVAL` - Memory backend cleanup frequency in seconds (default: 1)
    /// - `CACHE_GATEWAY_URL` - Gateway endpoint for the client facade
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(StoreBackend::Rest),
            store_url: non_empty_var("KV_REST_API_URL"),
            store_token: non_empty_var("KV_REST_API_TOKEN"),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            gateway_url: non_empty_var("CACHE_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        }
    }

    /// Whether both REST store credentials are present.
    pub fn has_store_credentials(&self) -> bool {
        self.store_url.is_some() && self.store_token.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            backend: StoreBackend::Rest,
            store_url: None,
            store_token: None,
            cleanup_interval: 1,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}
