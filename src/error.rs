//! Error types for the cache gateway and client facade
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Errors the gateway endpoint reports to its HTTP caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request named an action other than get/set/del
    #[error("Invalid action")]
    InvalidAction,

    /// Anything else that failed while handling the request
    #[error("Failed to process cache request: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::InvalidAction => (StatusCode::BAD_REQUEST, "Invalid action"),
            GatewayError::Internal(detail) => {
                tracing::error!("Cache request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process cache request",
                )
            }
        };

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Store Error Enum ==
/// Failures while talking to the external key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Base URL or access token is missing
    #[error("Store is not configured")]
    NotConfigured,

    /// The HTTP call itself failed
    #[error("Store request failed: {0}")]
    Http(String),

    /// The store answered with a non-success status
    #[error("Store returned status {0}: {1}")]
    Status(u16, String),

    /// The store executed the command and reported an error
    #[error("Store command error: {0}")]
    Command(String),

    /// The store reply could not be decoded
    #[error("Invalid store reply: {0}")]
    Decode(String),
}

// == Transport Error Enum ==
/// Failures between the client facade and the gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Network-level failure
    #[error("Gateway unreachable: {0}")]
    Http(String),

    /// Gateway answered with a non-2xx status
    #[error("Gateway returned status {0}")]
    Status(u16),

    /// Gateway reply was not the expected JSON
    #[error("Invalid gateway reply: {0}")]
    Decode(String),

    /// Payload could not be serialized for sending
    #[error("Could not encode payload: {0}")]
    Encode(String),
}

// == Result Type Alias ==
/// Convenience Result type for the gateway handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;
