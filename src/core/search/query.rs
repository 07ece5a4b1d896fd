//! Query shaping for site-scoped web search.
//!
//! When the caller tells us which site they are browsing, a query is
//! rewritten to `site:{host} {query}` so results come from that site.
//! Queries that already carry a `site:` operator and local or
//! extension origins are left alone.

/// Hosts that never get a `site:` prefix
const UNSCOPED_HOST_MARKERS: [&str; 3] = ["localhost", "127.0.0.1", "chrome-extension"];

/// Shape a query for the search backend.
///
/// The query is trimmed. It is prefixed with `site:{current_site}` only
/// when all of the following hold:
/// 1. the query has no `site:` operator (case-insensitive)
/// 2. a non-empty `current_site` is given
/// 3. the site is not a loopback host or a browser-extension origin
///
/// # Examples
///
/// ```
/// use gemini_relay::core::search::shape_query;
///
/// assert_eq!(shape_query("foo", Some("example.com")), "site:example.com foo");
/// assert_eq!(shape_query("site:x.com foo", Some("example.com")), "site:x.com foo");
/// assert_eq!(shape_query("foo", Some("localhost:3000")), "foo");
/// assert_eq!(shape_query("foo", None), "foo");
/// ```
pub fn shape_query(query: &str, current_site: Option<&str>) -> String {
    let trimmed = query.trim();

    let already_scoped = trimmed.to_lowercase().contains("site:");
    let site = current_site
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| !UNSCOPED_HOST_MARKERS.iter().any(|m| s.contains(m)));

    match site {
        Some(site) if !already_scoped => format!("site:{site} {trimmed}"),
        _ => trimmed.to_string(),
    }
}

/// Whether [`shape_query`] rewrote the query
pub fn is_site_scoped(shaped: &str, original: &str) -> bool {
    shaped != original.trim()
}
