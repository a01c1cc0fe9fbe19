//! Error types for the memoir story generation service.
//!
//! Every error records the file and line where it was created. Backend
//! failures additionally carry an [`ErrorCategory`] that drives retry and
//! HTTP status decisions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod config;
mod error;
mod http;
mod validation;

pub use backend::{BackendError, BackendErrorKind, BackendResult, ErrorCategory, RetryableError};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{MemoirError, MemoirErrorKind, MemoirResult};
pub use http::{HttpError, HttpErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
