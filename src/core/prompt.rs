//! Prompt composition.
//!
//! Builds the literal text sent to the generation backend. The user
//! message is appended verbatim; the backend treats it as natural
//! language, so nothing is escaped.

use crate::core::rules::RuleSet;
use crate::core::search::SearchResult;
use crate::core::types::Turn;
use std::fmt;

/// Delimiter between the rule text and the user message
pub const USER_QUERY_DELIMITER: &str = "\n\nUser query: ";

/// Visual separator between first-round and follow-up text
pub const FOLLOWUP_SEPARATOR: &str = "\n\n--- Additional Information from Search ---\n\n";

/// Literal prompt for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prompt as the opening user turn of a history
    pub fn as_turn(&self) -> Turn {
        Turn::user(self.0.clone())
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rules (blank-line separated), the delimiter, then the message
pub fn compose(rules: &RuleSet, user_message: &str) -> Prompt {
    let mut text = rules.joined();
    text.push_str(USER_QUERY_DELIMITER);
    text.push_str(user_message);
    Prompt(text)
}

/// History for the second round after an in-band directive was served
pub fn followup_history(
    prompt: &Prompt,
    first_round: &str,
    query: &str,
    results: &SearchResult,
) -> Vec<Turn> {
    let request = format!(
        "I performed a search for \"{query}\" and found these results:\n\n{results}\n\nPlease use this information to provide a comprehensive answer."
    );
    vec![
        prompt.as_turn(),
        Turn::model(first_round),
        Turn::user(request),
    ]
}

/// Prompt for a caller-forced search
///
/// `results` is usually a [`SearchResult`]; a plain notice stands in
/// when there was nothing to search for.
pub fn forced_search_prompt(
    query: &str,
    current_site: Option<&str>,
    results: &impl fmt::Display,
) -> Prompt {
    let scope = current_site
        .map(|site| format!(" on {site}"))
        .unwrap_or_default();
    Prompt(format!(
        "I searched for \"{query}\"{scope} and found these results:\n\n{results}\n\nPlease analyze these results and provide a helpful response. If there are code examples, format them properly."
    ))
}
