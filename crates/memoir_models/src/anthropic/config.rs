//! Anthropic client configuration.

use derive_getters::Getters;
use std::time::Duration;

/// Environment variable holding the API key.
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Anthropic API configuration.
///
/// A missing API key is reported by the client as a configuration failure on
/// each call, not at startup.
///
/// # Examples
///
/// ```
/// use memoir_models::AnthropicConfig;
///
/// let config = AnthropicConfig::builder()
///     .api_key(Some("sk-test".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(config.endpoint(), "https://api.anthropic.com");
/// assert_eq!(config.model(), "claude-3-7-sonnet-20250219");
/// assert!((config.temperature() - 0.3).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    #[builder(default)]
    api_key: Option<String>,
    /// Base URL without the `/v1/messages` path
    #[builder(default = "\"https://api.anthropic.com\".to_string()")]
    endpoint: String,
    /// Model identifier
    #[builder(default = "\"claude-3-7-sonnet-20250219\".to_string()")]
    model: String,
    /// Sampling temperature, kept low to discourage invented details
    #[builder(default = "0.3")]
    temperature: f32,
    /// Value of the `anthropic-version` header
    #[builder(default = "\"2023-06-01\".to_string()")]
    api_version: String,
    /// Whole-request timeout
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a builder for AnthropicConfig.
    pub fn builder() -> AnthropicConfigBuilder {
        AnthropicConfigBuilder::default()
    }

    /// Default configuration with the key read from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(ANTHROPIC_API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// Full URL of the Messages endpoint.
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.endpoint.trim_end_matches('/'))
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.anthropic.com".to_string(),
            model: "claude-3-7-sonnet-20250219".to_string(),
            temperature: 0.3,
            api_version: "2023-06-01".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let config = AnthropicConfig::builder()
            .endpoint("http://127.0.0.1:9999/")
            .build()
            .unwrap();
        assert_eq!(config.messages_url(), "http://127.0.0.1:9999/v1/messages");
    }

    #[test]
    fn builder_defaults_match_default() {
        let built = AnthropicConfig::builder().build().unwrap();
        assert_eq!(built, AnthropicConfig::default());
    }
}
