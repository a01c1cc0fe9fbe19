//! Layered service settings.
//!
//! Built-in defaults, then an optional TOML file, then `MEMOIR_`-prefixed
//! environment variables with `__` between section and key
//! (`MEMOIR_SERVER__PORT=9000`, `MEMOIR_RATE_LIMIT__MAX_REQUESTS=20`).

use derive_getters::Getters;
use memoir_core::{DEFAULT_MAX_OUTPUT_TOKENS, LogFormat};
use memoir_error::{ConfigError, ConfigErrorKind};
use memoir_models::{AnthropicConfig, RetryPolicy};
use memoir_rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Config file read when no path is given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "memoir.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MEMOIR";

/// Deployment environment. Production hides server error details from clients.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Full error messages are returned
    #[default]
    Development,
    /// 5xx messages are replaced with a generic one
    Production,
}

impl Environment {
    /// True in production.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    host: String,
    /// Bind port
    port: u16,
    /// Deployment environment
    environment: Environment,
    /// Log output format
    log_format: LogFormat,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_format: LogFormat::default(),
        }
    }
}

/// Generation backend settings. The API key is not part of this; it is read
/// from `ANTHROPIC_API_KEY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct BackendSettings {
    /// API base URL
    endpoint: String,
    /// Model identifier
    model: String,
    /// `anthropic-version` header value
    api_version: String,
    /// Sampling temperature
    temperature: f32,
    /// Output token budget per call
    max_output_tokens: u32,
    /// Whole-request timeout in seconds
    timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        let defaults = AnthropicConfig::default();
        Self {
            endpoint: defaults.endpoint().clone(),
            model: defaults.model().clone(),
            api_version: defaults.api_version().clone(),
            temperature: *defaults.temperature(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: defaults.timeout().as_secs(),
        }
    }
}

/// Backend retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per generation, the first included
    max_attempts: usize,
    /// Delay before the first retry, in milliseconds
    initial_backoff_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 1000,
        }
    }
}

/// Per-client rate limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Requests allowed per window
    max_requests: usize,
    /// Window length in seconds
    window_secs: u64,
    /// Seconds between sweeps of stale clients
    sweep_interval_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: memoir_rate_limit::DEFAULT_MAX_REQUESTS,
            window_secs: memoir_rate_limit::DEFAULT_WINDOW.as_secs(),
            sweep_interval_secs: memoir_rate_limit::DEFAULT_RETENTION.as_secs(),
        }
    }
}

/// All service settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct Settings {
    /// Listener
    server: ServerSettings,
    /// Generation backend
    backend: BackendSettings,
    /// Retry policy
    retry: RetrySettings,
    /// Rate limiting
    rate_limit: RateLimitSettings,
}

impl Settings {
    /// Load settings from defaults, a config file, and the process environment.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings with a caller-supplied environment source.
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = config::Config::builder()
            .add_source(file)
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))?;

        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    /// Anthropic client configuration with the given API key.
    pub fn anthropic_config(&self, api_key: Option<String>) -> Result<AnthropicConfig, ConfigError> {
        AnthropicConfig::builder()
            .api_key(api_key)
            .endpoint(self.backend.endpoint.as_str())
            .model(self.backend.model.as_str())
            .api_version(self.backend.api_version.as_str())
            .temperature(self.backend.temperature)
            .timeout(Duration::from_secs(self.backend.timeout_secs))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Backend(e.to_string())))
    }

    /// Retry policy for backend calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.initial_backoff_ms),
        )
    }

    /// Rate limiter configuration.
    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(
            self.rate_limit.max_requests,
            Duration::from_secs(self.rate_limit.window_secs),
        )
    }

    /// Interval between rate limiter sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit.sweep_interval_secs)
    }

    /// Override the bind host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.server.host = host.into();
    }

    /// Override the bind port.
    pub fn set_port(&mut self, port: u16) {
        self.server.port = port;
    }

    /// Override the log format.
    pub fn set_log_format(&mut self, format: LogFormat) {
        self.server.log_format = format;
    }
}
