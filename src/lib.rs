//! Gemini Relay - orchestration relay for Gemini answers
//!
//! Accepts chat requests from a browser extension, wraps them in
//! feature-specific rules, and streams back answers from Google's
//! Gemini API. Generation falls back across three tiers and can be
//! augmented with Google Custom Search, either on request or when the
//! model asks for it in-band with a `<<SEARCH: ...>>` directive.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - rules, prompt (rule catalog and prompt composition)
//!   - generation (Gemini client, three tiers)
//!   - search (Google Custom Search, query shaping)
//!   - directive, pipeline (orchestration)
//!   - services (unified service container)
//!
//! - **http**: HTTP adapter (depends on core)
//!   - handlers, middleware, router, streaming
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - ask, search, rules, config, verify, completions

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{RelayError, Result};
pub use core::pipeline::GenerationPipeline;
pub use core::services::Services;
pub use core::types::*;
