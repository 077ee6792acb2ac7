//! Gateway Handlers
//!
//! Translates `{action, key, data, expirySeconds}` requests into store
//! commands. Store credentials never leave this process.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GatewayError, Result};
use crate::models::{
    ActionResponse, CacheAction, CacheRequest, GetResponse, HealthResponse, SuccessResponse,
};
use crate::store::{KvStore, StoreCommand};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store every command is forwarded to
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

/// Whole-second store TTL for a requested `expirySeconds`.
///
/// Fractional seconds round up so an entry never outlives its request by less
/// than asked; zero, negative and non-finite values mean no store TTL.
pub fn store_ttl_seconds(expiry_seconds: Option<f64>) -> Option<u64> {
    expiry_seconds
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .map(|seconds| seconds.ceil() as u64)
}

/// Runs one store command. Store failures are logged and read as a null result.
async fn run_command(state: &AppState, command: StoreCommand) -> Option<Value> {
    let name = command.name();
    let key = command.key().to_string();

    match state.store.execute(command).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Store command {} for '{}' failed: {}", name, key, e);
            None
        }
    }
}

/// Handler for POST /api/cache
///
/// - `get` answers `{result}`, null on miss or store failure
/// - `set` and `del` answer `{success: true}` once the command has been issued
/// - anything else is a 400 that never reaches the store
pub async fn cache_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CacheRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>> {
    let Json(req) = payload.map_err(|e| GatewayError::Internal(e.body_text()))?;
    let action = req.action().ok_or(GatewayError::InvalidAction)?;
    debug!("Cache action {} for '{}'", action, req.key);

    let response = match action {
        CacheAction::Get => {
            let result = match run_command(&state, StoreCommand::Get { key: req.key.clone() }).await
            {
                Some(Value::String(raw)) => Some(serde_json::from_str(&raw).map_err(|e| {
                    GatewayError::Internal(format!(
                        "stored value for '{}' is not JSON: {}",
                        req.key, e
                    ))
                })?),
                other => other,
            };
            ActionResponse::Get(GetResponse::new(result))
        }
        CacheAction::Set => {
            let value = serde_json::to_string(&req.data.unwrap_or(Value::Null))
                .map_err(|e| GatewayError::Internal(e.to_string()))?;
            let command = match store_ttl_seconds(req.expiry_seconds) {
                Some(seconds) => StoreCommand::SetEx {
                    key: req.key,
                    seconds,
                    value,
                },
                None => StoreCommand::Set {
                    key: req.key,
                    value,
                },
            };
            run_command(&state, command).await;
            ActionResponse::Success(SuccessResponse::ok())
        }
        CacheAction::Del => {
            run_command(&state, StoreCommand::Del { key: req.key }).await;
            ActionResponse::Success(SuccessResponse::ok())
        }
    };

    Ok(Json(response))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.store.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RestStore};
    use serde_json::json;

    fn memory_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AppState::new(store.clone()), store)
    }

    async fn call(state: &AppState, body: Value) -> Result<Json<ActionResponse>> {
        let req: CacheRequest = serde_json::from_value(body).unwrap();
        cache_handler(State(state.clone()), Ok(Json(req))).await
    }

    #[test]
    fn test_store_ttl_seconds() {
        assert_eq!(store_ttl_seconds(Some(604_800.0)), Some(604_800));
        assert_eq!(store_ttl_seconds(Some(1.2)), Some(2));
        assert_eq!(store_ttl_seconds(Some(0.0)), None);
        assert_eq!(store_ttl_seconds(Some(-5.0)), None);
        assert_eq!(store_ttl_seconds(None), None);
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let (state, _) = memory_state();

        let set = call(&state, json!({"action": "set", "key": "k", "data": {"a": [1, 2]}}))
            .await
            .unwrap();
        assert_eq!(set.0, ActionResponse::Success(SuccessResponse::ok()));

        let get = call(&state, json!({"action": "get", "key": "k"})).await.unwrap();
        assert_eq!(get.0, ActionResponse::Get(GetResponse::new(Some(json!({"a": [1, 2]})))));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (state, _) = memory_state();
        let get = call(&state, json!({"action": "get", "key": "nope"})).await.unwrap();
        assert_eq!(get.0, ActionResponse::Get(GetResponse::new(None)));
    }

    #[tokio::test]
    async fn test_set_with_expiry_uses_store_ttl() {
        let (state, store) = memory_state();
        call(
            &state,
            json!({"action": "set", "key": "k", "data": 1, "expirySeconds": 60}),
        )
        .await
        .unwrap();

        let ttl = store.ttl_remaining_ms("k").await.unwrap();
        assert!(ttl <= 60_000 && ttl > 59_000);
    }

    #[tokio::test]
    async fn test_set_without_expiry_is_persistent() {
        let (state, store) = memory_state();
        call(
            &state,
            json!({"action": "set", "key": "k", "data": 1, "expirySeconds": null}),
        )
        .await
        .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.ttl_remaining_ms("k").await, None);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let (state, store) = memory_state();
        call(&state, json!({"action": "set", "key": "k", "data": "v"})).await.unwrap();

        let del = call(&state, json!({"action": "del", "key": "k"})).await.unwrap();
        assert_eq!(del.0, ActionResponse::Success(SuccessResponse::ok()));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalid_action() {
        let (state, store) = memory_state();
        let result = call(&state, json!({"action": "bogus", "key": "k", "data": 1})).await;

        assert!(matches!(result, Err(GatewayError::InvalidAction)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unconfigured_store_degrades_to_null() {
        let state = AppState::new(Arc::new(RestStore::new(None, None)));

        let get = call(&state, json!({"action": "get", "key": "k"})).await.unwrap();
        assert_eq!(get.0, ActionResponse::Get(GetResponse::new(None)));

        let set = call(&state, json!({"action": "set", "key": "k", "data": 1})).await.unwrap();
        assert_eq!(set.0, ActionResponse::Success(SuccessResponse::ok()));
    }

    #[tokio::test]
    async fn test_corrupt_stored_value_is_internal_error() {
        let (state, store) = memory_state();
        store
            .execute(StoreCommand::Set {
                key: "k".into(),
                value: "{not json".into(),
            })
            .await
            .unwrap();

        let result = call(&state, json!({"action": "get", "key": "k"})).await;
        assert!(matches!(result, Err(GatewayError::Internal(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let (state, _) = memory_state();
        let response = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.backend, "memory");
    }
}
