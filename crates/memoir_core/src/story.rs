//! Parsed story records.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A titled first-person story extracted from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Story {
    /// Story title, trimmed and non-empty
    title: String,
    /// Story body, trimmed and non-empty
    content: String,
}

impl Story {
    /// Creates a story from already-trimmed parts.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
