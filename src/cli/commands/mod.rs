//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod ask;
pub mod completions;
pub mod config;
pub mod rules;
pub mod search;
pub mod verify;

// Re-export argument types for use in mod.rs
pub use ask::AskArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use rules::RulesArgs;
pub use search::SearchArgs;
pub use verify::VerifyArgs;
