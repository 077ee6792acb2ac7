//! Request and Response models for the cache gateway
//!
//! This module defines the DTOs (Data Transfer Objects) shared by the
//! gateway and the client facade.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CacheAction, CacheRequest};
pub use responses::{
    ActionResponse, ErrorResponse, GatewayReply, GetResponse, HealthResponse, SuccessResponse,
};
