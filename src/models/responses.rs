//! Response DTOs for the cache gateway
//!
//! Defines the structure of outgoing HTTP response bodies, and the lenient
//! shape the client facade decodes them into.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body for the `get` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResponse {
    /// Parsed stored value, null on miss or store failure
    pub result: Option<Value>,
}

impl GetResponse {
    pub fn new(result: Option<Value>) -> Self {
        Self { result }
    }
}

/// Response body for the `set` and `del` actions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Any successful gateway reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Get(GetResponse),
    Success(SuccessResponse),
}

/// Gateway reply as seen by the client.
///
/// Every field is optional: the facade only trusts what is actually present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GatewayReply {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GatewayReply {
    /// True only for an explicit `{success: true}`.
    pub fn succeeded(&self) -> bool {
        self.success == Some(true)
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Store backend the gateway forwards to
    pub backend: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(backend: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            backend: backend.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
