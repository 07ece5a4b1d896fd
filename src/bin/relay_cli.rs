//! Relay CLI - command-line interface for the Gemini relay
//!
//! Runs the relay pipeline from a terminal. Use this for scripting,
//! debugging rules, or checking credentials without starting the server.
//!
//! # Examples
//!
//! ```bash
//! # Ask with the code explainer rules
//! relay ask "fn main() {}" --feature chat
//!
//! # Search scoped to a site
//! relay search "borrow checker" --site doc.rust-lang.org
//!
//! # Show the rules for each feature
//! relay rules
//!
//! # Show configuration
//! relay show-config
//! ```

use clap::Parser;
use gemini_relay::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        gemini_relay::cli::output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
