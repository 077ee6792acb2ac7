//! Client Cache Facade
//!
//! Presents the remote cache as a local key-value store: every write lands in
//! the volatile index immediately and is forwarded to the gateway; reads are
//! answered from memory while fresh and fall back to the gateway otherwise.
//!
//! No operation returns an error to its caller. Failures are logged and
//! reported as `false`/`None`, or as the richer [`Lookup`]/[`WriteOutcome`]
//! for callers that need to tell a miss from a broken remote tier.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{
    expiry_seconds, CacheEntry, CacheStats, Clock, IndexLookup, SystemClock, VolatileIndex,
};
use crate::client::{CacheTransport, HttpTransport, Lookup, WriteOutcome};
use crate::config::Config;
use crate::error::TransportError;
use crate::models::{CacheRequest, GatewayReply};

/// Key written and removed by [`CacheFacade::is_storage_available`].
pub const STORAGE_PROBE_KEY: &str = "__storage_test__";

const STORAGE_PROBE_VALUE: &str = "test";

// == Cache Facade ==
/// Two-tier cache: a private volatile index in front of the gateway.
///
/// One instance per client process. The index dies with the instance.
pub struct CacheFacade {
    index: Mutex<VolatileIndex>,
    stats: Mutex<CacheStats>,
    transport: Arc<dyn CacheTransport>,
    clock: Arc<dyn Clock>,
}

impl CacheFacade {
    // == Constructors ==
    pub fn new(transport: Arc<dyn CacheTransport>) -> Self {
        Self::with_clock(transport, Arc::new(SystemClock))
    }

    pub fn with_clock(transport: Arc<dyn CacheTransport>, clock: Arc<dyn Clock>) -> Self {
        Self {
            index: Mutex::new(VolatileIndex::new()),
            stats: Mutex::new(CacheStats::new()),
            transport,
            clock,
        }
    }

    /// Facade posting to `config.gateway_url` over HTTP.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpTransport::from_config(config)))
    }

    // Guards are only ever held for synchronous map work, never across an await.
    fn index(&self) -> MutexGuard<'_, VolatileIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stats_mut(&self) -> MutexGuard<'_, CacheStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Request Primitive ==
    async fn cache_request(&self, request: CacheRequest) -> Result<GatewayReply, TransportError> {
        self.transport.send(&request).await.map_err(|e| {
            warn!(
                "Cache request '{}' for key '{}' failed: {}",
                request.action, request.key, e
            );
            self.stats_mut().record_remote_failure();
            e
        })
    }

    async fn write_request(&self, request: CacheRequest) -> WriteOutcome {
        match self.cache_request(request).await {
            Ok(reply) if reply.succeeded() => WriteOutcome::Acknowledged,
            Ok(reply) => {
                warn!("Gateway did not acknowledge write: {:?}", reply.error);
                WriteOutcome::Rejected
            }
            Err(e) => WriteOutcome::TransportError(e.to_string()),
        }
    }

    // == Save ==
    /// Stores `data` under `key` in both tiers.
    ///
    /// The in-memory write happens before the remote request and is kept even
    /// when the remote write fails, so a non-acknowledged outcome does not mean
    /// the value is unavailable to this process.
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        expiry_days: Option<f64>,
    ) -> WriteOutcome {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(e) => {
                let err = TransportError::Encode(e.to_string());
                warn!("Not caching '{}': {}", key, err);
                return WriteOutcome::TransportError(err.to_string());
            }
        };

        let entry = CacheEntry::new(data, expiry_days, self.clock.now_ms());
        self.index().insert(key, entry.clone());

        let payload = match serde_json::to_value(&entry) {
            Ok(payload) => payload,
            Err(e) => return WriteOutcome::TransportError(e.to_string()),
        };

        self.write_request(CacheRequest::set(key, payload, expiry_seconds(expiry_days)))
            .await
    }

    /// Stores `data`; `true` only if the gateway acknowledged the write.
    pub async fn save_to_storage<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        expiry_days: Option<f64>,
    ) -> bool {
        self.save(key, data, expiry_days).await.succeeded()
    }

    /// Same as [`save_to_storage`](Self::save_to_storage), for settings call sites.
    pub async fn save_settings<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        expiry_days: Option<f64>,
    ) -> bool {
        self.save_to_storage(key, data, expiry_days).await
    }

    // == Lookup ==
    /// Reads `key`, memory first.
    pub async fn lookup(&self, key: &str) -> Lookup {
        let probe = self.index().lookup(key, self.clock.now_ms());
        match probe {
            IndexLookup::Fresh(data) => {
                debug!("Cache hit in memory for '{}'", key);
                self.stats_mut().record_memory_hit();
                return Lookup::Hit(data);
            }
            IndexLookup::Expired => debug!("Memory entry for '{}' expired, asking remote", key),
            IndexLookup::Absent => {}
        }

        let reply = match self.cache_request(CacheRequest::get(key)).await {
            Ok(reply) => reply,
            Err(e) => {
                self.stats_mut().record_miss();
                return Lookup::TransportError(e.to_string());
            }
        };

        let Some(result) = reply.result.filter(|result| !result.is_null()) else {
            debug!("Cache miss for '{}'", key);
            self.stats_mut().record_miss();
            return Lookup::Miss;
        };

        let entry: CacheEntry = match serde_json::from_value(result) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Remote value for '{}' is not a cache entry: {}", key, e);
                let mut stats = self.stats_mut();
                stats.record_remote_failure();
                stats.record_miss();
                return Lookup::TransportError(format!("malformed cache entry: {}", e));
            }
        };

        if entry.is_expired_at(self.clock.now_ms()) {
            debug!("Remote entry for '{}' expired, removing", key);
            self.index().remove(key);
            self.remove_remote_detached(key).await;
            self.stats_mut().record_miss();
            return Lookup::Miss;
        }

        let data = entry.data.clone();
        self.index().insert(key, entry);
        self.stats_mut().record_remote_hit();
        Lookup::Hit(data)
    }

    /// Reads `key` and deserializes it; `None` on miss, failure or type mismatch.
    pub async fn get_from_storage<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.lookup(key).await.into_value()?;
        match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Cached value for '{}' has an unexpected shape: {}", key, e);
                None
            }
        }
    }

    // == Remove ==
    /// Deletes `key` from memory at once and from the remote tier.
    pub async fn remove(&self, key: &str) -> WriteOutcome {
        self.index().remove(key);
        self.write_request(CacheRequest::del(key)).await
    }

    /// Deletes `key`; returns the gateway's success flag.
    pub async fn remove_from_storage(&self, key: &str) -> bool {
        self.remove(key).await.succeeded()
    }

    /// Issues a remote delete without waiting for it when a runtime is available.
    async fn remove_remote_detached(&self, key: &str) {
        let transport = Arc::clone(&self.transport);
        let request = CacheRequest::del(key);
        let task = async move {
            if let Err(e) = transport.send(&request).await {
                warn!("Removing expired key '{}' failed: {}", request.key, e);
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(_) => task.await,
        }
    }

    // == Self Test ==
    /// Writes, reads back and deletes a sentinel value.
    ///
    /// `true` only if both remote requests were acknowledged and the value read
    /// back equals the one written.
    pub async fn is_storage_available(&self) -> bool {
        let saved = self.save(STORAGE_PROBE_KEY, STORAGE_PROBE_VALUE, None).await;
        let read: Option<String> = self.get_from_storage(STORAGE_PROBE_KEY).await;
        let removed = self.remove(STORAGE_PROBE_KEY).await;

        saved.succeeded() && removed.succeeded() && read.as_deref() == Some(STORAGE_PROBE_VALUE)
    }

    // == Inspection ==
    /// Whether the volatile index physically holds `key`, fresh or not.
    pub fn cached_in_memory(&self, key: &str) -> bool {
        self.index().contains(key)
    }

    /// Copy of the in-memory entry for `key`, without expiry checks.
    pub fn memory_entry(&self, key: &str) -> Option<CacheEntry> {
        self.index().peek(key).cloned()
    }

    pub fn memory_len(&self) -> usize {
        self.index().len()
    }

    /// Forgets every in-memory entry, as after a full reload.
    pub fn clear_memory(&self) {
        self.index().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_mut().clone()
    }
}
