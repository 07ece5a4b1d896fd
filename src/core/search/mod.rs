//! Web search for forced searches and in-band directives.
//!
//! This module provides the search backend abstraction, the Google
//! Custom Search adapter, site-scoped query shaping, and the text
//! formatting of results handed back to the generation backend.

mod google;
mod query;
mod results;

use async_trait::async_trait;

use crate::core::error::Result;

pub use google::GoogleSearchClient;
pub use query::{is_site_scoped, shape_query};
pub use results::{SearchHit, SearchResult, MISSING_QUERY, NO_RESULTS};

/// A backend that answers one web-search query
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run `query`, scoped to `current_site` when the shaping rules allow
    async fn search(&self, query: &str, current_site: Option<&str>) -> Result<SearchResult>;
}
