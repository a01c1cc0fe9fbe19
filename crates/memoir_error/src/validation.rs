//! Inbound request validation errors.

/// Validation error kinds, one per rule applied to a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A required top-level parameter is absent or empty
    #[display("Missing required parameter: {_0}")]
    MissingParameter(String),
    /// No question/response pairs were supplied
    #[display("Please provide at least 1 question/response pairs")]
    NoResponses,
    /// A pair lacks its question or its response
    #[display("Each item in userResponses must contain both question and response fields")]
    IncompleteResponse {
        /// Position of the offending pair
        index: usize,
    },
}

/// Validation error with location tracking.
///
/// The `Display` output is exactly the client-facing message, without the
/// location suffix, so the HTTP layer can return it verbatim.
///
/// # Examples
///
/// ```
/// use memoir_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingParameter("lifeStage".into()));
/// assert_eq!(err.to_string(), "Missing required parameter: lifeStage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{}", kind)]
pub struct ValidationError {
    /// The rule that failed
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}
