//! Transport between the client facade and the gateway.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::TransportError;
use crate::models::{CacheRequest, GatewayReply};

// == Transport Trait ==
/// Delivers one cache request to the gateway and returns its reply.
#[async_trait]
pub trait CacheTransport: Send + Sync {
    async fn send(&self, request: &CacheRequest) -> Result<GatewayReply, TransportError>;
}

// == HTTP Transport ==
/// Posts JSON to the gateway endpoint. Any non-2xx status is an error.
///
/// No timeout is set here; the reqwest client defaults apply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Reuses an existing client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gateway_url.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CacheTransport for HttpTransport {
    async fn send(&self, request: &CacheRequest) -> Result<GatewayReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<GatewayReply>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
