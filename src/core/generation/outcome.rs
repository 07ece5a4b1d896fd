//! Normalization of generation backend responses.
//!
//! The backend may answer with a top-level `text` field, with the
//! nested `candidates[].content.parts[].text` structure, or with
//! either of those wrapped in a `response` object. Everything is
//! folded into [`GenerationOutcome`] here so callers never inspect
//! response shapes themselves.

use serde_json::Value;

use crate::core::error::{Result, RelayError};

/// Text or failure, independent of the wire shape it came from
#[derive(Debug)]
pub enum GenerationOutcome {
    Text(String),
    Error(RelayError),
}

impl GenerationOutcome {
    /// Classify a decoded JSON response body
    pub fn from_value(value: &Value) -> Self {
        let body = value.get("response").unwrap_or(value);

        if let Some(message) = body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return Self::Error(RelayError::Generation(message.to_string()));
        }

        if let Some(text) = direct_text(body).or_else(|| candidate_text(body)) {
            return Self::Text(text);
        }

        let reason = body
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(Value::as_str)
            .map(|r| format!("prompt blocked: {r}"))
            .unwrap_or_else(|| "Unable to extract text from response".to_string());
        Self::Error(RelayError::MalformedResponse(reason))
    }

    pub fn into_result(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Error(err) => Err(err),
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn direct_text(body: &Value) -> Option<String> {
    body.get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .and_then(non_blank)
}

/// First candidate's parts, concatenated
fn candidate_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    non_blank(text)
}
