//! CLI adapter for the relay
//!
//! Drives the same pipeline the HTTP server uses, from a terminal.
//! This module is parallel to `http/` - both depend on `core/` but not
//! on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Gemini Relay - tiered Gemini answers with search augmentation
///
/// Ask questions through the same rules, fallback tiers and search
/// directives the relay server uses, or inspect its configuration.
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(version)]
#[command(about = "Gemini orchestration relay", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question through the generation pipeline
    Ask(commands::AskArgs),

    /// Run a web search and print the formatted results
    Search(commands::SearchArgs),

    /// Show the rule set applied for each feature
    Rules(commands::RulesArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Check Google Search API credentials with a test query
    #[command(name = "verify-search")]
    VerifySearch(commands::VerifyArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  relay completions bash > ~/.local/share/bash-completion/completions/relay
    ///   zsh:   relay completions zsh > ~/.zfunc/_relay
    ///   fish:  relay completions fish > ~/.config/fish/completions/relay.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Load configuration
    let config = Config::load()?;

    // Create services
    let services = Arc::new(Services::new(config)?);

    // Execute command
    match cli.command {
        Commands::Ask(args) => commands::ask::execute(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Rules(args) => commands::rules::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::VerifySearch(args) => {
            commands::verify::execute(args, &services, cli.format).await
        }
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
