//! Gemini relay HTTP server entry point
//!
//! Starts the relay that turns browser requests into streamed Gemini
//! answers.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_relay::core::config::Config;
use gemini_relay::core::services::Services;
use gemini_relay::core::xdg::XdgDirs;
use gemini_relay::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_relay=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gemini relay");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let xdg = XdgDirs::new();
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    if config.generation.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create shared services
    let services = Arc::new(Services::new(config)?);

    // Credential check is informational only
    services.verify_search_credentials().await;

    let app = http::router(Arc::clone(&services));

    // Bind to address and start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
