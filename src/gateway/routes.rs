//! Gateway Routes
//!
//! Configures the Axum router with the cache endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cache_handler, health_handler, AppState};

/// Path of the single cache endpoint.
pub const CACHE_PATH: &str = "/api/cache";

/// Creates the router.
///
/// # Endpoints
/// - `POST /api/cache` - get/set/del against the backing store
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CACHE_PATH, post(cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
