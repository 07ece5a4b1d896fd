//! HTTP request handlers for the relay
//!
//! Implements the three routes: status check, health, and the
//! streaming generation endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::RelayError;
use crate::core::services::Services;
use crate::core::types::{ChatRequest, HealthResponse};
use crate::http::error::error_response;
use crate::http::streaming::StreamingResponder;

/// Status check for `HEAD /`
pub async fn head_handler() -> StatusCode {
    StatusCode::OK
}

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Generation handler for `POST /`
///
/// Parses the body as a [`ChatRequest`], runs the pipeline and
/// streams the answer as chunked plain text.
///
/// # Errors
///
/// Tier exhaustion answers with a plain-text apology. Other failures
/// before the first fragment become a JSON error body; an unparseable
/// body is reported as a 500. In development mode the JSON body carries
/// the error chain under `stack`.
pub async fn generate_handler(State(services): State<Arc<Services>>, body: Bytes) -> Response {
    let development = services.config.server.development;

    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to parse request body: {}", e);
            return error_response(RelayError::from(e), development);
        }
    };

    tracing::info!(
        feature = %request.resolved_feature(),
        force_search = request.force_search,
        "Processing request: {}",
        request.preview()
    );

    match services.pipeline.respond(&request).await {
        Ok(fragments) => StreamingResponder::new(fragments).into_response(),
        Err(e) => error_response(e, development),
    }
}
