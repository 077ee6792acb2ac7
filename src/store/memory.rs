//! In-process store backend
//!
//! A HashMap with Redis-like replies and TTL expiration, for running the
//! gateway without an external store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{Clock, SystemClock};
use crate::error::StoreError;
use crate::store::{KvStore, StoreCommand};

/// A stored string with its absolute deadline.
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    /// Unix milliseconds, None = no expiration
    expires_at: Option<u64>,
}

impl StoredValue {
    fn is_expired_at(&self, now_ms: u64) -> bool {
        matches!(self.expires_at, Some(expires) if now_ms >= expires)
    }
}

// == Memory Store ==
/// In-memory key-value store with per-key TTL.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a store whose TTLs are measured against `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired_at(now));
        before - entries.len()
    }

    /// Remaining TTL of a live key in milliseconds; None if absent or persistent.
    pub async fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|stored| !stored.is_expired_at(now))
            .and_then(|stored| stored.expires_at)
            .map(|expires| expires - now)
    }

    // == Length ==
    /// Returns the number of physically present entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn insert(entries: &mut HashMap<String, StoredValue>, key: String, stored: StoredValue) -> Value {
        entries.insert(key, stored);
        Value::String("OK".to_string())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn execute(&self, command: StoreCommand) -> Result<Option<Value>, StoreError> {
        let now = self.clock.now_ms();
        // Write lock even for GET: expired keys are dropped on read.
        let mut entries = self.entries.write().await;

        let reply = match command {
            StoreCommand::Get { key } => match entries.get(&key) {
                Some(stored) if stored.is_expired_at(now) => {
                    debug!("Memory store: dropping expired key {}", key);
                    entries.remove(&key);
                    None
                }
                Some(stored) => Some(Value::String(stored.value.clone())),
                None => None,
            },
            StoreCommand::Set { key, value } => Some(Self::insert(
                &mut entries,
                key,
                StoredValue {
                    value,
                    expires_at: None,
                },
            )),
            StoreCommand::SetEx { key, seconds, value } => {
                if seconds == 0 {
                    return Err(StoreError::Command(
                        "invalid expire time in 'setex' command".to_string(),
                    ));
                }
                Some(Self::insert(
                    &mut entries,
                    key,
                    StoredValue {
                        value,
                        expires_at: Some(now.saturating_add(seconds.saturating_mul(1000))),
                    },
                ))
            }
            StoreCommand::Del { key } => {
                let removed = match entries.remove(&key) {
                    Some(stored) if !stored.is_expired_at(now) => 1,
                    _ => 0,
                };
                Some(Value::from(removed))
            }
        };

        Ok(reply)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn store_with_clock() -> (MemoryStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        (MemoryStore::with_clock(clock.clone()), clock)
    }

    fn get(key: &str) -> StoreCommand {
        StoreCommand::Get { key: key.into() }
    }

    fn set(key: &str, value: &str) -> StoreCommand {
        StoreCommand::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new();

        let reply = store.execute(set("key1", "value1")).await.unwrap();
        assert_eq!(reply, Some(json!("OK")));

        let value = store.execute(get("key1")).await.unwrap();
        assert_eq!(value, Some(json!("value1")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.execute(get("nonexistent")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_setex_huge_ttl_saturates() {
        let (store, clock) = store_with_clock();
        let reply = store
            .execute(StoreCommand::SetEx {
                key: "k".into(),
                seconds: u64::MAX / 10,
                value: "v".into(),
            })
            .await
            .unwrap();
        assert_eq!(reply, Some(json!("OK")));

        clock.advance_days(365 * 1000);
        assert_eq!(store.execute(get("k")).await.unwrap(), Some(json!("v")));
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = MemoryStore::new();
        store.execute(set("key1", "value1")).await.unwrap();

        let reply = store
            .execute(StoreCommand::Del { key: "key1".into() })
            .await
            .unwrap();
        assert_eq!(reply, Some(json!(1)));
        assert!(store.is_empty().await);

        let reply = store
            .execute(StoreCommand::Del { key: "key1".into() })
            .await
            .unwrap();
        assert_eq!(reply, Some(json!(0)));
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = MemoryStore::new();
        store.execute(set("key1", "value1")).await.unwrap();
        store.execute(set("key1", "value2")).await.unwrap();

        assert_eq!(store.execute(get("key1")).await.unwrap(), Some(json!("value2")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_setex_expiration() {
        let (store, clock) = store_with_clock();
        store
            .execute(StoreCommand::SetEx {
                key: "key1".into(),
                seconds: 1,
                value: "value1".into(),
            })
            .await
            .unwrap();

        assert_eq!(store.ttl_remaining_ms("key1").await, Some(1_000));
        assert!(store.execute(get("key1")).await.unwrap().is_some());

        clock.advance_ms(1_000);

        assert_eq!(store.execute(get("key1")).await.unwrap(), None);
        assert!(store.is_empty().await, "Expired key should be dropped on read");
    }

    #[tokio::test]
    async fn test_plain_set_clears_previous_ttl() {
        let (store, clock) = store_with_clock();
        store
            .execute(StoreCommand::SetEx {
                key: "key1".into(),
                seconds: 1,
                value: "old".into(),
            })
            .await
            .unwrap();
        store.execute(set("key1", "new")).await.unwrap();

        clock.advance_days(365);
        assert_eq!(store.execute(get("key1")).await.unwrap(), Some(json!("new")));
        assert_eq!(store.ttl_remaining_ms("key1").await, None);
    }

    #[tokio::test]
    async fn test_setex_zero_seconds_is_an_error() {
        let store = MemoryStore::new();
        let result = store
            .execute(StoreCommand::SetEx {
                key: "key1".into(),
                seconds: 0,
                value: "v".into(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::Command(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let (store, clock) = store_with_clock();
        store
            .execute(StoreCommand::SetEx {
                key: "key1".into(),
                seconds: 1,
                value: "value1".into(),
            })
            .await
            .unwrap();
        store
            .execute(StoreCommand::SetEx {
                key: "key2".into(),
                seconds: 10,
                value: "value2".into(),
            })
            .await
            .unwrap();

        clock.advance_ms(1_100);

        let removed = store.cleanup_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.execute(get("key2")).await.unwrap().is_some());
    }
}
