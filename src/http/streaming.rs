//! Chunked plain-text responses.
//!
//! Writes a [`TextStream`] to the caller as it is produced. Each
//! fragment becomes one body chunk and the body ends exactly once,
//! when the stream is exhausted.

use std::convert::Infallible;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures::StreamExt;

use crate::core::pipeline::TextStream;

/// Adapter from answer fragments to a chunked HTTP body
pub struct StreamingResponder {
    fragments: TextStream,
}

impl StreamingResponder {
    pub fn new(fragments: TextStream) -> Self {
        Self { fragments }
    }
}

impl IntoResponse for StreamingResponder {
    fn into_response(self) -> Response {
        let mut sent = 0usize;
        let chunks = self
            .fragments
            .filter(|fragment| futures::future::ready(!fragment.is_empty()))
            .map(move |fragment| {
                sent += 1;
                tracing::debug!(chunk = sent, bytes = fragment.len(), "Flushing fragment");
                Ok::<_, Infallible>(Bytes::from(fragment))
            });

        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            Body::from_stream(chunks),
        )
            .into_response()
    }
}
