//! Prompt text sent to the generation backend.

use serde::{Deserialize, Serialize};

/// The single formatted instruction text sent to the backend.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Wraps prompt text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrows the prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the prompt, returning the text.
    pub fn into_inner(self) -> String {
        self.0
    }
}
