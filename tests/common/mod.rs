//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, Router};
use folio_cache::client::CacheTransport;
use folio_cache::error::{StoreError, TransportError};
use folio_cache::models::{CacheAction, CacheRequest, GatewayReply};
use folio_cache::store::{KvStore, StoreCommand};
use serde_json::Value;

/// Serves `app` on an ephemeral localhost port.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// HTTP client that never routes localhost traffic through an env proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store that records every command and answers like an empty Redis.
#[derive(Default)]
pub struct RecordingStore {
    commands: Mutex<Vec<StoreCommand>>,
}

impl RecordingStore {
    pub fn commands(&self) -> Vec<StoreCommand> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl KvStore for RecordingStore {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn execute(&self, command: StoreCommand) -> Result<Option<Value>, StoreError> {
        let reply = match &command {
            StoreCommand::Get { .. } => None,
            StoreCommand::Set { .. } | StoreCommand::SetEx { .. } => Some(Value::from("OK")),
            StoreCommand::Del { .. } => Some(Value::from(0)),
        };
        self.commands.lock().unwrap().push(command);
        Ok(reply)
    }
}

/// Store whose every command fails, like an unreachable backend.
pub struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn execute(&self, _command: StoreCommand) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Http("connection refused".to_string()))
    }
}

/// Wraps a transport and logs the actions it forwards.
pub struct CountingTransport<T> {
    inner: T,
    actions: Mutex<Vec<CacheAction>>,
}

impl<T> CountingTransport<T> {
    pub fn new(inner: T) -> Arc<Self> {
        Arc::new(Self {
            inner,
            actions: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self, action: CacheAction) -> usize {
        self.actions
            .lock()
            .unwrap()
            .iter()
            .filter(|a| **a == action)
            .count()
    }

    pub fn total(&self) -> usize {
        self.actions.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: CacheTransport> CacheTransport for CountingTransport<T> {
    async fn send(&self, request: &CacheRequest) -> Result<GatewayReply, TransportError> {
        if let Some(action) = request.action() {
            self.actions.lock().unwrap().push(action);
        }
        self.inner.send(request).await
    }
}
