//! Cache Entry Module
//!
//! Defines the unit of storage shared by the volatile index and the remote
//! store, with an embedded absolute expiry.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Milliseconds in one day.
pub const DAY_MS: f64 = 86_400_000.0;

/// Seconds in one day.
pub const DAY_SECONDS: f64 = 86_400.0;

// == Cache Entry ==
/// A cached payload with creation time and optional deadline.
///
/// The serialized form (`data`, `timestamp`, `expiry`) is what the remote
/// store holds, so a client that restarts can judge freshness from the value
/// alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload
    pub data: Value,
    /// Creation timestamp (Unix milliseconds), informational only
    #[serde(deserialize_with = "deserialize_millis")]
    pub timestamp: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub expiry: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now_ms` that lives for `expiry_days`.
    ///
    /// Only a finite positive number of days sets a deadline; anything else
    /// produces an entry that never expires.
    pub fn new(data: Value, expiry_days: Option<f64>, now_ms: u64) -> Self {
        let expiry =
            ttl_days(expiry_days).map(|days| now_ms.saturating_add((days * DAY_MS) as u64));

        Self {
            data,
            timestamp: now_ms,
            expiry,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: the entry stops being fresh once the clock reaches
    /// the deadline, so `now_ms >= expiry` counts as expired.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expiry {
            Some(expiry) => now_ms >= expiry,
            None => false,
        }
    }

    /// Returns remaining lifetime in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.expiry.map(|expiry| expiry.saturating_sub(now_ms))
    }
}

// == Timestamp Decoding ==
/// Millisecond timestamp as other writers may encode it.
///
/// Fractional-day lifetimes computed in floating point land as non-integer
/// millis; those are truncated.
#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Int(u64),
    Float(f64),
}

impl Millis {
    fn into_ms(self) -> u64 {
        match self {
            Millis::Int(ms) => ms,
            // Saturating cast: negatives and NaN become 0.
            Millis::Float(ms) => ms as u64,
        }
    }
}

fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Millis::deserialize(deserializer).map(Millis::into_ms)
}

fn deserialize_opt_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<Millis>::deserialize(deserializer).map(|ms| ms.map(Millis::into_ms))
}

// == Utility Functions ==
/// Normalizes a requested lifetime in days: `Some` only for finite positive values.
pub fn ttl_days(expiry_days: Option<f64>) -> Option<f64> {
    expiry_days.filter(|days| days.is_finite() && *days > 0.0)
}

/// Relative store TTL in seconds for a lifetime in days.
pub fn expiry_seconds(expiry_days: Option<f64>) -> Option<f64> {
    ttl_days(expiry_days).map(|days| days * DAY_SECONDS)
}
