//! Ask command - run a question through the generation pipeline

use crate::cli::output::{colors, format_duration_colored};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{ChatRequest, Feature};
use clap::Args;
use futures::StreamExt;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message to send (selected text, question, or page content)
    pub message: String,

    /// Feature whose rules wrap the message (chat, ask, code-test, default)
    #[arg(long, short = 'f')]
    pub feature: Option<String>,

    /// Search first and answer from the results
    #[arg(long)]
    pub force_search: bool,

    /// Site to scope a forced search to
    #[arg(long, requires = "force_search")]
    pub site: Option<String>,
}

impl AskArgs {
    fn to_request(&self) -> ChatRequest {
        let mut request = ChatRequest::new(self.message.clone());
        if let Some(feature) = &self.feature {
            request = request.with_feature(feature.clone());
        }
        if self.force_search {
            request = request.with_forced_search(self.site.clone());
        }
        request
    }
}

/// Ask response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub feature: Feature,
    pub force_search: bool,
    pub answer: String,
    pub elapsed_ms: u128,
}

/// Execute the ask command
///
/// Human output prints fragments as they arrive; JSON output waits for
/// the full answer.
pub async fn execute(
    args: AskArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = args.to_request();
    let start = Instant::now();

    let mut fragments = services.pipeline.respond(&request).await?;

    match format {
        OutputFormat::Human => {
            let mut stdout = std::io::stdout();
            while let Some(fragment) = fragments.next().await {
                write!(stdout, "{fragment}")?;
                stdout.flush()?;
            }
            println!();
            eprintln!(
                "{} {} in {}",
                colors::dim("feature:"),
                colors::feature(request.resolved_feature().as_str()),
                format_duration_colored(start.elapsed().as_secs_f64())
            );
        }
        OutputFormat::Json => {
            let mut answer = String::new();
            while let Some(fragment) = fragments.next().await {
                answer.push_str(&fragment);
            }
            let response = AskResponse {
                feature: request.resolved_feature(),
                force_search: request.force_search,
                answer,
                elapsed_ms: start.elapsed().as_millis(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
