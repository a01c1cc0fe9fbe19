//! Configuration error types.

/// What went wrong while assembling runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("Failed to load configuration: {_0}")]
    Load(String),
    /// The merged configuration does not fit the settings schema
    #[display("Invalid configuration: {_0}")]
    Invalid(String),
    /// Backend client settings were rejected
    #[display("Invalid backend configuration: {_0}")]
    Backend(String),
    /// The tracing subscriber could not be installed
    #[display("Failed to initialise logging: {_0}")]
    Logging(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use memoir_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid("server.port: invalid digit".into()));
/// assert!(err.to_string().starts_with("Configuration Error: Invalid configuration: server.port"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// Which stage of loading failed
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
