//! Verify-search command - check Google Search API credentials

use crate::cli::output::{print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::search::GoogleSearchClient;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the verify-search command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Exit with an error when verification fails
    #[arg(long)]
    pub strict: bool,
}

/// Verification result
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub configured: bool,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute the verify-search command
pub async fn execute(
    args: VerifyArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let configured = services.config.search.has_credentials();

    let error = if configured {
        let client = GoogleSearchClient::new(&services.config.search)?;
        client.verify_credentials().await.err().map(|e| e.to_string())
    } else {
        Some("Google Search API credentials not configured".to_string())
    };

    let response = VerifyResponse {
        configured,
        verified: error.is_none(),
        error,
    };

    match format {
        OutputFormat::Human => match &response.error {
            None => print_success("Google Search API credentials verified successfully"),
            Some(e) => print_warning(&format!("Google Search API verification failed: {e}")),
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    if args.strict && !response.verified {
        return Err("search credential verification failed".into());
    }

    Ok(())
}
