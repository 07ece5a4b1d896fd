//! Core data types for the Gemini relay.
//!
//! This module defines the data structures shared by the pipeline
//! and its adapters: features, inbound requests, message history
//! turns, and response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-selected use case that decides which rules steer generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Chat overlay
    Chat,
    /// Ask about selected text
    Ask,
    /// Quiz generation from a whole page
    CodeTest,
    /// Fallback for anything else
    #[default]
    Default,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Chat,
        Feature::Ask,
        Feature::CodeTest,
        Feature::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Ask => "ask",
            Feature::CodeTest => "code-test",
            Feature::Default => "default",
        }
    }

    /// Resolve a caller-supplied tag. Unknown or missing tags map to `Default`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Feature::Chat),
            "ask" => Ok(Feature::Ask),
            "code-test" => Ok(Feature::CodeTest),
            "default" => Ok(Feature::Default),
            other => Err(format!("unknown feature: {other}")),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request from the browser extension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Selected text, chat message, or page content
    pub message: String,

    /// Feature tag; anything unrecognised falls back to `default`
    #[serde(default)]
    pub feature: Option<String>,

    /// Skip rule-based generation and search first
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub force_search: bool,

    /// Hostname the caller is browsing (forced search only)
    #[serde(default)]
    pub current_site: Option<String>,

    /// Accepted for compatibility; never used to look up history
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Boolean flag where an explicit `null` means `false`
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    pub fn with_forced_search(mut self, current_site: Option<String>) -> Self {
        self.force_search = true;
        self.current_site = current_site;
        self
    }

    pub fn resolved_feature(&self) -> Feature {
        Feature::from_tag(self.feature.as_deref())
    }

    /// First 100 characters of the message, for logs
    pub fn preview(&self) -> String {
        let mut preview: String = self.message.chars().take(100).collect();
        if self.message.chars().count() > 100 {
            preview.push_str("...");
        }
        preview
    }
}

/// Speaker of a turn in the message history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One role-tagged text segment sent to the generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,

    /// Service version
    pub version: String,
}

/// Error body returned on unrecoverable failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    /// Error chain, only exposed in development mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
