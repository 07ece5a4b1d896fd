//! Search command - run a web search through the configured backend

use crate::cli::output::{colors, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::search::shape_query;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Restrict results to this site (ignored for local pages)
    #[arg(long, short = 's')]
    pub site: Option<String>,

    /// Print the text exactly as the model would receive it
    #[arg(long)]
    pub raw: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub shaped_query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = services
        .search
        .search(&args.query, args.site.as_deref())
        .await?;

    if args.raw && format == OutputFormat::Human {
        println!("{}", result.formatted());
        return Ok(());
    }

    let output = SearchResponseOutput {
        query: args.query.clone(),
        shaped_query: shape_query(&args.query, args.site.as_deref()),
        total_results: result.hits.len(),
        results: result
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                title: hit.title.clone(),
                link: hit.link.clone(),
                snippet: hit.snippet.clone(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!("No results found for '{}'", colors::label(&output.shaped_query));
            } else {
                println!(
                    "Found {} result(s) for '{}':\n",
                    colors::number(&output.total_results.to_string()),
                    colors::label(&output.shaped_query)
                );

                for item in &output.results {
                    println!(
                        "[{}] {}",
                        colors::rank(&item.rank.to_string()),
                        colors::label(&item.title)
                    );
                    println!("    {}", colors::url(&item.link));
                    println!("    {}", colors::dim(&truncate_chars(&item.snippet, 100)));
                    println!();
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
