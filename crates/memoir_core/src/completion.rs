//! Unstructured backend output.

use serde::{Deserialize, Serialize};

/// The text returned by the backend for one prompt, before parsing.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct RawCompletion(String);

impl RawCompletion {
    /// Wraps completion text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrows the completion text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the completion, returning the text.
    pub fn into_inner(self) -> String {
        self.0
    }
}
