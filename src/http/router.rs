//! Route table for the relay

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;
use crate::http::handlers::{generate_handler, head_handler, health_handler};
use crate::http::middleware::log_request;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router over shared services
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/", post(generate_handler).head(head_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
