//! Request DTOs for the cache gateway
//!
//! Defines the body the client facade posts and the gateway accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three actions the gateway understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    Get,
    Set,
    Del,
}

impl CacheAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheAction::Get => "get",
            CacheAction::Set => "set",
            CacheAction::Del => "del",
        }
    }
}

impl FromStr for CacheAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(CacheAction::Get),
            "set" => Ok(CacheAction::Set),
            "del" => Ok(CacheAction::Del),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CacheAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `POST /api/cache`.
///
/// `action` stays a plain string on the wire so that an unknown action is
/// answered with the gateway's own 400 rather than a deserialization error.
///
/// # Fields
/// - `action`: `get`, `set` or `del`
/// - `key`: the cache key
/// - `data`: payload for `set`
/// - `expirySeconds`: relative store TTL for `set`, null for none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, rename = "expirySeconds")]
    pub expiry_seconds: Option<f64>,
}

impl CacheRequest {
    pub fn get(key: impl Into<String>) -> Self {
        Self::new(CacheAction::Get, key, None, None)
    }

    pub fn set(key: impl Into<String>, data: Value, expiry_seconds: Option<f64>) -> Self {
        Self::new(CacheAction::Set, key, Some(data), expiry_seconds)
    }

    pub fn del(key: impl Into<String>) -> Self {
        Self::new(CacheAction::Del, key, None, None)
    }

    fn new(
        action: CacheAction,
        key: impl Into<String>,
        data: Option<Value>,
        expiry_seconds: Option<f64>,
    ) -> Self {
        Self {
            action: action.as_str().to_string(),
            key: key.into(),
            data,
            expiry_seconds,
        }
    }

    /// Parses the action, `None` if it is not one the gateway handles.
    pub fn action(&self) -> Option<CacheAction> {
        self.action.parse().ok()
    }
}
