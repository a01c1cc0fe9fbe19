//! Crate-level error aggregation.

use crate::{BackendError, ConfigError, ErrorCategory, HttpError, ValidationError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum MemoirErrorKind {
    /// Generation backend failure
    Backend(BackendError),
    /// Configuration error
    Config(ConfigError),
    /// HTTP listener error
    Http(HttpError),
    /// Inbound request failed validation
    Validation(ValidationError),
}

impl std::fmt::Display for MemoirErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoirErrorKind::Backend(e) => write!(f, "{}", e),
            MemoirErrorKind::Config(e) => write!(f, "{}", e),
            MemoirErrorKind::Http(e) => write!(f, "{}", e),
            MemoirErrorKind::Validation(e) => write!(f, "{}", e),
        }
    }
}

/// Memoir error with kind discrimination.
#[derive(Debug)]
pub struct MemoirError(Box<MemoirErrorKind>);

impl MemoirError {
    /// Create a new error from a kind.
    pub fn new(kind: MemoirErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MemoirErrorKind {
        &self.0
    }

    /// Backend failure category, if this error came from the backend.
    pub fn backend_category(&self) -> Option<ErrorCategory> {
        match self.kind() {
            MemoirErrorKind::Backend(e) => Some(e.kind.category()),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemoirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memoir Error: {}", self.0)
    }
}

impl std::error::Error for MemoirError {}

impl<T> From<T> for MemoirError
where
    T: Into<MemoirErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for memoir operations.
pub type MemoirResult<T> = std::result::Result<T, MemoirError>;
