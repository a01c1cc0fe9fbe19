//! A single answered question.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One question put to the user and the answer they gave.
///
/// # Examples
///
/// ```
/// use memoir_core::UserResponse;
///
/// let pair = UserResponse::new("Where did you grow up?", "On a farm in Ohio.");
/// assert_eq!(pair.question(), "Where did you grow up?");
/// assert!(pair.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct UserResponse {
    /// The question text
    question: String,
    /// The user's answer
    response: String,
}

impl UserResponse {
    /// Creates a new question/response pair.
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }

    /// True when both the question and the response are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.response.is_empty()
    }
}
