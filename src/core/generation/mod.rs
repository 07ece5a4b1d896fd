//! Generation backend access.
//!
//! Three call strategies ("tiers") reach the same upstream model with
//! different trade-offs. The pipeline tries them in
//! [`Tier::FALLBACK_ORDER`] until one yields text.

mod gemini;
mod outcome;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::GenerationConfig;
use crate::core::error::{Result, RelayError};
use crate::core::prompt::Prompt;
use crate::core::types::Turn;

pub use gemini::{ChatSession, GeminiClient};
pub use outcome::GenerationOutcome;

/// Sampling limits sent with `direct` and `chat-session` calls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for SamplingParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// One of the alternative call strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Single non-conversational call; preferred
    Direct,
    /// Fresh conversational session, one message
    ChatSession,
    /// Flattened text, no generation config; last resort
    Simplified,
}

impl Tier {
    pub const FALLBACK_ORDER: [Tier; 3] = [Tier::Direct, Tier::ChatSession, Tier::Simplified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Direct => "direct",
            Tier::ChatSession => "chat-session",
            Tier::Simplified => "simplified",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one tier call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationAttempt {
    pub tier: Tier,
    /// Extracted text, or the failure cause
    pub outcome: std::result::Result<String, String>,
}

impl GenerationAttempt {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Upstream text generation
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Non-conversational call over a full history
    async fn direct(&self, history: &[Turn], params: &SamplingParams) -> Result<String>;

    /// Open a fresh session and send one message
    async fn chat_session(&self, message: &str, params: &SamplingParams) -> Result<String>;

    /// Minimal call with a single flattened text and no config
    async fn simplified(&self, prompt: &str) -> Result<String>;
}

/// Run one tier for `prompt`, bounded by `timeout`
///
/// Blank text counts as a failure, whatever the backend reported.
pub async fn attempt_tier(
    backend: &dyn GenerationBackend,
    tier: Tier,
    prompt: &Prompt,
    params: &SamplingParams,
    timeout: Duration,
) -> Result<String> {
    let call = async {
        match tier {
            Tier::Direct => backend.direct(&[prompt.as_turn()], params).await,
            Tier::ChatSession => backend.chat_session(prompt.as_str(), params).await,
            Tier::Simplified => backend.simplified(prompt.as_str()).await,
        }
    };

    let text = tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| RelayError::GenerationTimeout(timeout))??;

    if text.trim().is_empty() {
        return Err(RelayError::MalformedResponse(format!(
            "{tier} tier returned empty text"
        )));
    }
    Ok(text)
}
