//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where configuration is read from
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
///
/// Credentials are reported as present or absent, never printed.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub server: ServerSummary,
    pub generation: GenerationSummary,
    pub search: SearchSummary,
}

#[derive(Debug, Serialize)]
pub struct ServerSummary {
    pub host: String,
    pub port: u16,
    pub development: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerationSummary {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub tier_timeout_sec: u64,
    pub api_key_set: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchSummary {
    pub base_url: String,
    pub timeout_sec: u64,
    pub credentials_set: bool,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;

    let config_file = args.all.then(|| {
        let xdg = crate::core::xdg::XdgDirs::new();
        xdg.config_file().to_string_lossy().into_owned()
    });

    let response = ConfigResponse {
        config_file,
        server: ServerSummary {
            host: config.server.host.clone(),
            port: config.server.port,
            development: config.server.development,
        },
        generation: GenerationSummary {
            model: config.generation.model.clone(),
            base_url: config.generation.base_url.clone(),
            temperature: config.generation.temperature,
            top_p: config.generation.top_p,
            top_k: config.generation.top_k,
            max_output_tokens: config.generation.max_output_tokens,
            tier_timeout_sec: config.generation.tier_timeout_sec,
            api_key_set: config.generation.api_key.is_some(),
        },
        search: SearchSummary {
            base_url: config.search.base_url.clone(),
            timeout_sec: config.search.timeout_sec,
            credentials_set: config.search.has_credentials(),
        },
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            if let Some(path) = &response.config_file {
                println!("  config_file: {path}");
            }
            println!("  server:");
            println!("    host: {}", response.server.host);
            println!("    port: {}", response.server.port);
            println!("    development: {}", response.server.development);
            println!("  generation:");
            println!("    model: {}", response.generation.model);
            println!("    base_url: {}", response.generation.base_url);
            println!("    temperature: {}", response.generation.temperature);
            println!("    top_p: {}", response.generation.top_p);
            println!("    top_k: {}", response.generation.top_k);
            println!(
                "    max_output_tokens: {}",
                response.generation.max_output_tokens
            );
            println!(
                "    tier_timeout_sec: {}",
                response.generation.tier_timeout_sec
            );
            println!("    api_key_set: {}", response.generation.api_key_set);
            println!("  search:");
            println!("    base_url: {}", response.search.base_url);
            println!("    timeout_sec: {}", response.search.timeout_sec);
            println!("    credentials_set: {}", response.search.credentials_set);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
