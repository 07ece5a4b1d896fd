//! Core domain logic (protocol-agnostic)
//!
//! This module contains all orchestration logic that is independent
//! of transport protocols (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **rules**: Feature rule catalog
//! - **prompt**: Prompt composition
//! - **generation**: Upstream generation tiers (Gemini)
//! - **search**: Web search and query shaping (Google Custom Search)
//! - **directive**: In-band search directive scanning
//! - **pipeline**: Request orchestration state machine
//! - **services**: Unified service container

pub mod config;
pub mod directive;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod prompt;
pub mod rules;
pub mod search;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{RelayError, Result};
pub use services::Services;
