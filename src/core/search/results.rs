//! Search result formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text rendered for a search with no hits
pub const NO_RESULTS: &str = "No results found.";

/// Stands in for results when a forced search had no query
pub const MISSING_QUERY: &str = "Please provide a search query.";

/// One hit returned by the search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Hits for one query, in backend order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The query actually sent, after shaping
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    pub fn new(query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        Self {
            query: query.into(),
            hits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Text handed to the generation backend
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits.is_empty() {
            return f.write_str(NO_RESULTS);
        }

        write!(f, "Search Results for \"{}\":\n\n", self.query)?;
        for (i, hit) in self.hits.iter().enumerate() {
            writeln!(f, "{}. \"{}\"", i + 1, hit.title)?;
            writeln!(f, "   URL: {}", hit.link)?;
            write!(f, "   Snippet: {}\n\n", hit.snippet)?;
        }
        Ok(())
    }
}
