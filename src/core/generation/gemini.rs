//! Gemini `generateContent` adapter.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::outcome::GenerationOutcome;
use super::{GenerationBackend, SamplingParams};
use crate::core::config::GenerationConfig;
use crate::core::error::{Result, RelayError};
use crate::core::types::{Role, Turn};

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a SamplingParams>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> From<&'a Turn> for Content<'a> {
    fn from(turn: &'a Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Model => "model",
        };
        Self {
            role: Some(role),
            parts: [Part { text: &turn.text }],
        }
    }
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// REST client for one Gemini model
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    has_key: bool,
}

impl GeminiClient {
    /// Create from configuration
    ///
    /// A missing API key does not fail construction; every call then
    /// fails, which exhausts the tiers.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = config.api_key.as_deref() {
            let value = HeaderValue::from_str(key.trim())
                .map_err(|_| RelayError::ConfigError("Invalid Gemini API key format".to_string()))?;
            headers.insert("x-goog-api-key", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RelayError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            has_key: config.api_key.is_some(),
        })
    }

    /// Start a fresh conversational session
    pub fn start_chat(&self, params: SamplingParams) -> ChatSession<'_> {
        ChatSession {
            client: self,
            params,
            history: Vec::new(),
        }
    }

    async fn generate_content(&self, request: &GenerateContentRequest<'_>) -> Result<String> {
        if !self.has_key {
            return Err(RelayError::Generation("GEMINI_API_KEY is not set".to_string()));
        }

        let resp = self.client.post(&self.endpoint).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(RelayError::Generation(format!(
                "status {}: {message}",
                status.as_u16()
            )));
        }

        let value: serde_json::Value = resp.json().await?;
        GenerationOutcome::from_value(&value).into_result()
    }
}

/// A conversation that keeps its own history
///
/// Sessions are request-local and dropped after use; nothing is
/// shared between requests.
pub struct ChatSession<'a> {
    client: &'a GeminiClient,
    params: SamplingParams,
    history: Vec<Turn>,
}

impl ChatSession<'_> {
    /// Send a user message and record the model's reply
    pub async fn send_message(&mut self, message: &str) -> Result<String> {
        self.history.push(Turn::user(message));

        let request = GenerateContentRequest {
            contents: self.history.iter().map(Content::from).collect(),
            generation_config: Some(&self.params),
        };
        let result = self.client.generate_content(&request).await;

        match result {
            Ok(text) => {
                self.history.push(Turn::model(text.clone()));
                Ok(text)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn direct(&self, history: &[Turn], params: &SamplingParams) -> Result<String> {
        if history.is_empty() {
            return Err(RelayError::InvalidRequest(
                "Message history cannot be empty".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: history.iter().map(Content::from).collect(),
            generation_config: Some(params),
        };
        self.generate_content(&request).await
    }

    async fn chat_session(&self, message: &str, params: &SamplingParams) -> Result<String> {
        let mut session = self.start_chat(*params);
        session.send_message(message).await
    }

    async fn simplified(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: [Part { text: prompt }],
            }],
            generation_config: None,
        };
        self.generate_content(&request).await
    }
}
