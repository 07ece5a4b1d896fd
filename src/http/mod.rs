//! HTTP adapter for the relay
//!
//! Thin layer over `core/`: parses requests, calls the pipeline and
//! writes answers back as chunked text. Depends only on `core/`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod streaming;

pub use error::{error_response, status_code};
pub use handlers::*;
pub use router::{router, MAX_BODY_BYTES};
pub use streaming::StreamingResponder;
