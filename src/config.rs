//! Configuration management for file-agent.
//!
//! Configuration can be set via environment variables:
//! - `OLLAMA_BASE_URL` - Optional. Base URL of the OpenAI-compatible endpoint.
//!   Defaults to `http://localhost:11434/v1`.
//! - `OLLAMA_MODEL` - Optional. The default model name. Defaults to `gpt-oss`.
//! - `OLLAMA_API_KEY` - Optional. Bearer token for endpoints that require one.
//!   Local Ollama does not.
//! - `MAX_ITERATIONS` - Optional. Maximum tool-calling rounds per user turn.
//!   Defaults to `5`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OpenAI-compatible completion endpoint
    pub base_url: String,

    /// Default model identifier
    pub model: String,

    /// Optional bearer token sent with completion requests
    pub api_key: Option<String>,

    /// Maximum tool-calling rounds per user turn
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `MAX_ITERATIONS` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434/v1".to_string());

        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "gpt-oss".to_string());

        let api_key = std::env::var("OLLAMA_API_KEY").ok();

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        Ok(Self {
            base_url,
            model,
            api_key,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            api_key: None,
            max_iterations: 5,
        }
    }
}
