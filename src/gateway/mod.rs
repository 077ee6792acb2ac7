//! Gateway Module
//!
//! HTTP endpoint that proxies cache actions to the backing store.
//!
//! # Endpoints
//! - `POST /api/cache` - `{action, key, data?, expirySeconds?}`
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, CACHE_PATH};
