//! Volatile Index Module
//!
//! The client's in-memory mirror of cache entries. Lives as long as the
//! facade that owns it.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::CacheEntry;

/// Result of probing the index for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexLookup {
    /// Present and fresh
    Fresh(Value),
    /// Was present but expired; it has been removed
    Expired,
    /// Not present
    Absent,
}

// == Volatile Index ==
/// Key to entry map with lazy expiry on read.
#[derive(Debug, Default)]
pub struct VolatileIndex {
    entries: HashMap<String, CacheEntry>,
}

impl VolatileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores an entry, replacing any previous entry for the key wholesale.
    pub fn insert(&mut self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(key.into(), entry);
    }

    // == Lookup ==
    /// Returns the payload if the entry is fresh at `now_ms`.
    ///
    /// Expired entries are removed on the way out.
    pub fn lookup(&mut self, key: &str, now_ms: u64) -> IndexLookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now_ms) => {
                self.entries.remove(key);
                IndexLookup::Expired
            }
            Some(entry) => IndexLookup::Fresh(entry.data.clone()),
            None => IndexLookup::Absent,
        }
    }

    // == Remove ==
    /// Removes a key, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw entry access, without expiry checks.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Drops every entry, as a fresh process would start.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
