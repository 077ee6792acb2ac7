//! Redis REST store backend
//!
//! Talks to a Redis-over-HTTP command proxy: each command is one request to
//! `{base}/COMMAND/arg1/.../argN`, authenticated with a bearer token, and
//! answered with `{"result": ...}` or `{"error": "..."}`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::store::{KvStore, StoreCommand};

/// Reply body of the REST proxy.
#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

// == Rest Store ==
/// REST-proxied Redis. Credentials stay inside this struct.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: Option<String>,
    token: Option<String>,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RestStore {
    /// Creates a store; missing credentials make every command fail.
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, token)
    }

    /// Reuses an existing HTTP client.
    pub fn with_client(client: Client, base_url: Option<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_url.clone(), config.store_token.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.token.is_some()
    }

    // == Command URL ==
    /// Builds the request URL for a command, percent-encoding each argument
    /// as its own path segment.
    pub fn command_url(&self, command: &StoreCommand) -> Result<Url, StoreError> {
        let base = self.base_url.as_deref().ok_or(StoreError::NotConfigured)?;
        let mut url =
            Url::parse(base).map_err(|e| StoreError::Http(format!("invalid store URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| StoreError::Http(format!("store URL cannot take a path: {}", base)))?
            .pop_if_empty()
            .extend(command.args());

        Ok(url)
    }
}

#[async_trait]
impl KvStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn execute(&self, command: StoreCommand) -> Result<Option<Value>, StoreError> {
        let token = self.token.as_deref().ok_or(StoreError::NotConfigured)?;
        let url = self.command_url(&command)?;
        debug!("Store command {} {}", command.name(), command.key());

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16(), body));
        }

        let reply: RestReply =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;

        match reply.error {
            Some(error) => Err(StoreError::Command(error)),
            None => Ok(reply.result.filter(|result| !result.is_null())),
        }
    }
}
