//! Unified service container for the relay
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::generation::{GeminiClient, GenerationBackend};
use crate::core::pipeline::GenerationPipeline;
use crate::core::rules::RuleCatalog;
use crate::core::search::{GoogleSearchClient, SearchBackend};
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access. Everything
/// in it is read-only after construction.
#[derive(Clone)]
pub struct Services {
    /// Feature rule catalog, built once from configuration
    pub rules: Arc<RuleCatalog>,

    /// Search backend, shared with the pipeline
    pub search: Arc<dyn SearchBackend>,

    /// Request orchestrator
    pub pipeline: Arc<GenerationPipeline>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services backed by Gemini and Google Custom Search
    pub fn new(config: Config) -> Result<Self> {
        let generator = Arc::new(GeminiClient::new(&config.generation)?);
        let search = Arc::new(GoogleSearchClient::new(&config.search)?);
        Ok(Self::with_backends(config, generator, search))
    }

    /// Create services over arbitrary backends
    pub fn with_backends(
        config: Config,
        generator: Arc<dyn GenerationBackend>,
        search: Arc<dyn SearchBackend>,
    ) -> Self {
        let rules = Arc::new(RuleCatalog::with_overrides(&config.rules));

        let pipeline = Arc::new(GenerationPipeline::new(
            Arc::clone(&rules),
            generator,
            Arc::clone(&search),
            &config.generation,
        ));

        Self {
            rules,
            search,
            pipeline,
            config: Arc::new(config),
        }
    }

    /// Check search credentials once, logging the outcome
    ///
    /// Never fails: a bad or missing credential only means searches
    /// fail later, at request time.
    pub async fn verify_search_credentials(&self) -> bool {
        if !self.config.search.has_credentials() {
            tracing::warn!("Google Search API credentials not configured");
            return false;
        }

        tracing::info!("Verifying Google Search API credentials...");
        let client = match GoogleSearchClient::new(&self.config.search) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Google Search API verification failed: {}", e);
                return false;
            }
        };

        match client.verify_credentials().await {
            Ok(()) => {
                tracing::info!("Google Search API credentials verified successfully");
                true
            }
            Err(e) => {
                tracing::warn!("Google Search API verification failed: {}", e);
                false
            }
        }
    }
}
