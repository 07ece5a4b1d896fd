//! In-band search directives and forced-search query extraction.
//!
//! The backend may ask for a web search by emitting
//! `<<SEARCH: some query>>` in its answer. Only the first directive in
//! a response is honored; any later ones stay in the text untouched.

use once_cell::sync::Lazy;
use regex::Regex;

// Regex pattern compiled once at startup
static DIRECTIVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<SEARCH:\s*([^>]+)>>").expect("directive pattern is valid"));

/// Marker the extension uses when it builds a forced-search message
pub const FORCED_SEARCH_MARKER: &str = "Please search for information about: ";

/// A search requested by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDirective {
    pub query: String,
}

/// Find the first `<<SEARCH: ...>>` directive in backend output
///
/// The captured query is trimmed. A directive whose query is blank
/// after trimming is ignored.
pub fn scan_for_directive(text: &str) -> Option<SearchDirective> {
    let captures = DIRECTIVE_PATTERN.captures(text)?;
    let query = captures.get(1)?.as_str().trim();
    if query.is_empty() {
        return None;
    }
    Some(SearchDirective {
        query: query.to_string(),
    })
}

/// Pull the query out of a forced-search message
///
/// Messages built by the extension carry [`FORCED_SEARCH_MARKER`];
/// the query is the rest of that line. Anything else is taken whole.
pub fn extract_forced_query(message: &str) -> String {
    match message.find(FORCED_SEARCH_MARKER) {
        Some(pos) => message[pos + FORCED_SEARCH_MARKER.len()..]
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string(),
        None => message.trim().to_string(),
    }
}
