//! Listener errors.

/// Failures of the HTTP listener lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The configured address could not be bound
    #[display("Failed to bind {addr}: {message}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// OS error text
        message: String,
    },
    /// The bound socket would not report its address
    #[display("Failed to read bound address: {_0}")]
    LocalAddr(String),
    /// The server stopped with an I/O error
    #[display("Server error: {_0}")]
    Serve(String),
}

/// Listener error with location tracking.
///
/// # Examples
///
/// ```
/// use memoir_error::{HttpError, HttpErrorKind};
///
/// let err = HttpError::new(HttpErrorKind::Bind {
///     addr: "0.0.0.0:8080".into(),
///     message: "Address already in use".into(),
/// });
/// assert!(err.to_string().contains("Failed to bind 0.0.0.0:8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// Lifecycle step that failed
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new listener error at the caller's location.
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HttpErrorKind {
        &self.kind
    }
}
