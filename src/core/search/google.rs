//! Google Custom Search adapter.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use super::query::{is_site_scoped, shape_query};
use super::results::{SearchHit, SearchResult};
use super::SearchBackend;
use crate::core::config::SearchConfig;
use crate::core::error::{Result, RelayError};

/// API key plus engine (cx) identifier
#[derive(Clone)]
struct Credentials {
    api_key: String,
    engine_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("engine_id", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
}

#[derive(Deserialize)]
struct ApiItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl From<ApiItem> for SearchHit {
    fn from(item: ApiItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
        }
    }
}

/// Web search over the Google Custom Search JSON API
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl GoogleSearchClient {
    /// Create from configuration
    ///
    /// Missing credentials are not an error here; searches fail with
    /// `SearchUnconfigured` when attempted.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RelayError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        let credentials = if config.has_credentials() {
            match (&config.api_key, &config.engine_id) {
                (Some(api_key), Some(engine_id)) => Some(Credentials {
                    api_key: api_key.trim().to_string(),
                    engine_id: engine_id.trim().to_string(),
                }),
                _ => None,
            }
        } else {
            None
        };

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| {
            RelayError::SearchUnconfigured(
                "GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID must both be set".to_string(),
            )
        })
    }

    /// Send an already-shaped query
    async fn execute(&self, query: &str) -> Result<SearchResult> {
        let credentials = self.credentials()?;

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", credentials.api_key.as_str()),
                ("cx", credentials.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            tracing::error!(status = status.as_u16(), body = %body, "Search API error");
            return Err(RelayError::SearchBackend {
                status: status.as_u16(),
                message,
            });
        }

        let data: ApiResponse = resp.json().await?;
        let hits = data.items.into_iter().map(SearchHit::from).collect();
        Ok(SearchResult::new(query, hits))
    }

    /// One-off check that the credentials are accepted
    ///
    /// Runs a `test` query. Callers log failures; they never stop the
    /// server from starting.
    pub async fn verify_credentials(&self) -> Result<()> {
        self.execute("test").await.map(|_| ())
    }
}

#[async_trait]
impl SearchBackend for GoogleSearchClient {
    async fn search(&self, query: &str, current_site: Option<&str>) -> Result<SearchResult> {
        // Credentials are checked before anything else
        self.credentials()?;

        if query.trim().is_empty() {
            return Err(RelayError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let shaped = shape_query(query, current_site);
        if is_site_scoped(&shaped, query) {
            tracing::info!(query = %shaped, "Performing site-specific search");
        } else {
            tracing::info!(query = %shaped, "Performing search");
        }

        self.execute(&shaped).await
    }
}
