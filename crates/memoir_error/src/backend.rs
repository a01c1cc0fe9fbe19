//! Generation backend error types and retry classification.

/// How a failure should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorCategory {
    /// Local configuration is unusable (missing credential). Never retried.
    #[display("configuration")]
    Configuration,
    /// The backend rejected the request itself (4xx). Never retried.
    #[display("client_request")]
    ClientRequest,
    /// Server-side or network trouble that may clear up on its own.
    #[display("transient")]
    Transient,
}

/// Backend error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    /// Backend answered with a non-2xx status
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// No response was received at all
    Unreachable(String),
    /// The request could not be constructed locally
    RequestSetup(String),
    /// The API credential is not configured
    MissingCredential(String),
    /// A 2xx response whose body did not contain a completion
    MalformedResponse(String),
}

impl std::fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendErrorKind::Status { status, body } => {
                write!(f, "Backend API error: {} - {}", status, body)
            }
            BackendErrorKind::Unreachable(msg) => {
                write!(f, "No response received from backend API: {}", msg)
            }
            BackendErrorKind::RequestSetup(msg) => {
                write!(f, "Error setting up backend API request: {}", msg)
            }
            BackendErrorKind::MissingCredential(var) => {
                write!(f, "Missing {} environment variable", var)
            }
            BackendErrorKind::MalformedResponse(msg) => {
                write!(f, "Malformed backend API response: {}", msg)
            }
        }
    }
}

impl BackendErrorKind {
    /// Classify this failure.
    ///
    /// 429 is the one 4xx status treated as transient: the backend is asking
    /// us to slow down, not telling us the request is wrong.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BackendErrorKind::MissingCredential(_) => ErrorCategory::Configuration,
            BackendErrorKind::Status { status, .. } if *status == 429 => ErrorCategory::Transient,
            BackendErrorKind::Status { status, .. } if (400..500).contains(status) => {
                ErrorCategory::ClientRequest
            }
            BackendErrorKind::Status { .. }
            | BackendErrorKind::Unreachable(_)
            | BackendErrorKind::RequestSetup(_)
            | BackendErrorKind::MalformedResponse(_) => ErrorCategory::Transient,
        }
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend error with source location tracking.
///
/// # Examples
///
/// ```
/// use memoir_error::{BackendError, BackendErrorKind, ErrorCategory};
///
/// let err = BackendError::new(BackendErrorKind::Status {
///     status: 400,
///     body: "bad prompt".to_string(),
/// });
/// assert_eq!(err.kind.category(), ErrorCategory::ClientRequest);
/// assert!(format!("{}", err).contains("400"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use memoir_error::{BackendError, BackendErrorKind, RetryableError};
///
/// let err = BackendError::new(BackendErrorKind::Status {
///     status: 503,
///     body: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = BackendError::new(BackendErrorKind::MissingCredential("ANTHROPIC_API_KEY".into()));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger another attempt.
    ///
    /// Server errors (5xx), rate limiting (429), and network failures return
    /// true. Client errors (4xx) and configuration problems return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for BackendErrorKind {
    fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }
}

impl RetryableError for BackendError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for single backend calls.
pub type BackendResult<T> = Result<T, BackendError>;
