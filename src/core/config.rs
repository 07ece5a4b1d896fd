//! Configuration management for the Gemini relay.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Credentials are read from the environment and never serialized.

use crate::core::error::{Result, RelayError};
use crate::core::types::Feature;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Per-feature rule overrides, keyed by feature tag
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Expose error chains in error responses
    #[serde(default)]
    pub development: bool,
}

/// Upstream generation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Upper bound for a single tier call, in seconds
    #[serde(default = "default_tier_timeout")]
    pub tier_timeout_sec: u64,

    /// Read from GEMINI_API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Upstream web-search backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    #[serde(default = "default_search_timeout")]
    pub timeout_sec: u64,

    /// Read from GOOGLE_SEARCH_API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Read from GOOGLE_SEARCH_ENGINE_ID
    #[serde(default, skip_serializing)]
    pub engine_id: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_tier_timeout() -> u64 {
    60
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_search_timeout() -> u64 {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            development: false,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_gemini_base_url(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            tier_timeout_sec: default_tier_timeout(),
            api_key: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            timeout_sec: default_search_timeout(),
            api_key: None,
            engine_id: None,
        }
    }
}

impl GenerationConfig {
    pub fn tier_timeout(&self) -> Duration {
        Duration::from_secs(self.tier_timeout_sec)
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    /// Both halves of the credential pair are present and non-blank
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_key) && present(&self.engine_id)
    }
}

/// Read an env var, treating blank values as unset
fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RelayError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. RELAY_CONFIG env var
    /// 2. XDG config file (~/.config/gemini-relay/config.toml)
    /// 3. ./gemini-relay.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("RELAY_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("gemini-relay.toml").exists() {
                Self::from_file("gemini-relay.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Some(host) = env_value("RELAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_value("RELAY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        let mode = env_value("RELAY_ENV").or_else(|| env_value("NODE_ENV"));
        if mode.as_deref() == Some("development") {
            self.server.development = true;
        }

        // Generation configuration
        if let Some(key) = env_value("GEMINI_API_KEY") {
            self.generation.api_key = Some(key);
        }
        if let Some(model) = env_value("RELAY_MODEL") {
            self.generation.model = model;
        }
        if let Some(url) = env_value("RELAY_GEMINI_BASE_URL") {
            self.generation.base_url = url;
        }
        if let Some(temperature) = env_value("RELAY_TEMPERATURE") {
            if let Ok(t) = temperature.parse() {
                self.generation.temperature = t;
            }
        }
        if let Some(max_tokens) = env_value("RELAY_MAX_OUTPUT_TOKENS") {
            if let Ok(m) = max_tokens.parse() {
                self.generation.max_output_tokens = m;
            }
        }
        if let Some(timeout) = env_value("RELAY_TIER_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.generation.tier_timeout_sec = t;
            }
        }

        // Search configuration
        if let Some(key) = env_value("GOOGLE_SEARCH_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(engine) = env_value("GOOGLE_SEARCH_ENGINE_ID") {
            self.search.engine_id = Some(engine);
        }
        if let Some(url) = env_value("RELAY_SEARCH_BASE_URL") {
            self.search.base_url = url;
        }
        if let Some(timeout) = env_value("RELAY_SEARCH_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.search.timeout_sec = t;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(RelayError::ConfigError(
                "Port must be non-zero".to_string(),
            ));
        }

        let generation = &self.generation;
        if generation.model.trim().is_empty() {
            return Err(RelayError::ConfigError(
                "Model name cannot be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(RelayError::ConfigError(
                "Temperature must be between 0 and 2".to_string(),
            ));
        }

        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(RelayError::ConfigError(
                "top_p must be in (0, 1]".to_string(),
            ));
        }

        if generation.top_k == 0 {
            return Err(RelayError::ConfigError(
                "top_k must be non-zero".to_string(),
            ));
        }

        if generation.max_output_tokens == 0 {
            return Err(RelayError::ConfigError(
                "Max output tokens must be non-zero".to_string(),
            ));
        }

        if generation.tier_timeout_sec == 0 {
            return Err(RelayError::ConfigError(
                "Tier timeout must be non-zero".to_string(),
            ));
        }

        if self.search.timeout_sec == 0 {
            return Err(RelayError::ConfigError(
                "Search timeout must be non-zero".to_string(),
            ));
        }

        for feature in self.rules.keys() {
            if feature.parse::<Feature>().is_err() {
                return Err(RelayError::ConfigError(format!(
                    "Unknown feature in [rules]: {feature}"
                )));
            }
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        let redact = |v: &Option<String>| if v.is_some() { "set" } else { "not set" };

        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Development mode: {}", self.server.development);
        tracing::info!("  Model: {}", self.generation.model);
        tracing::info!("  Gemini base URL: {}", self.generation.base_url);
        tracing::info!("  Gemini API key: {}", redact(&self.generation.api_key));
        tracing::info!(
            "  Sampling: temperature={} top_p={} top_k={} max_output_tokens={}",
            self.generation.temperature,
            self.generation.top_p,
            self.generation.top_k,
            self.generation.max_output_tokens
        );
        tracing::info!("  Tier timeout: {}s", self.generation.tier_timeout_sec);
        tracing::info!("  Search base URL: {}", self.search.base_url);
        tracing::info!("  Search API key: {}", redact(&self.search.api_key));
        tracing::info!("  Search engine ID: {}", redact(&self.search.engine_id));
        tracing::info!("  Search timeout: {}s", self.search.timeout_sec);
        tracing::info!("  Rule overrides: {} feature(s)", self.rules.len());
    }
}
