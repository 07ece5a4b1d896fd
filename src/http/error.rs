//! HTTP mapping for relay errors.
//!
//! Converts [`RelayError`] into a status code and a JSON body of the
//! form `{ "error": string, "stack"?: string }`. Tier exhaustion is the
//! exception: it answers with the fixed apology as plain text.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::{RelayError, EXHAUSTED_MESSAGE};
use crate::core::types::ErrorBody;

/// Convert error to appropriate HTTP status code
pub fn status_code(err: &RelayError) -> StatusCode {
    match err {
        RelayError::InvalidRequest(_) | RelayError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        RelayError::SearchUnconfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        RelayError::SearchBackend { .. }
        | RelayError::Generation(_)
        | RelayError::MalformedResponse(_)
        | RelayError::GenerationTimeout(_) => StatusCode::BAD_GATEWAY,
        RelayError::PipelineExhausted
        | RelayError::ConfigError(_)
        | RelayError::Http(_)
        | RelayError::IoError(_)
        | RelayError::SerdeError(_)
        | RelayError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Debug rendering of the error and its source chain
fn error_chain(err: &RelayError) -> String {
    let mut chain = format!("{err:?}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        chain.push_str("\nCaused by: ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Plain-text 500 sent when every generation tier failed
pub fn exhausted_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        EXHAUSTED_MESSAGE,
    )
        .into_response()
}

/// Build the error response, exposing the error chain only when asked
pub fn error_response(err: RelayError, expose_details: bool) -> Response {
    if matches!(err, RelayError::PipelineExhausted) {
        return exhausted_response();
    }

    let status = status_code(&err);
    if err.is_bad_request() {
        tracing::warn!(status = status.as_u16(), error = %err, "Rejected request");
    } else if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %err, "Request failed");
    }

    let body = ErrorBody {
        error: err.message(),
        stack: expose_details.then(|| error_chain(&err)),
    };

    (status, Json(body)).into_response()
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error_response(self, false)
    }
}
