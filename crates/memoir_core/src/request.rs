//! Validated story generation request.

use crate::UserResponse;
use derive_getters::Getters;
use memoir_error::{ValidationError, ValidationErrorKind};
use serde::Serialize;

/// A validated request to turn life-history answers into stories.
///
/// Can only be built through [`GenerationRequest::new`], so every instance
/// has a non-empty life stage and subcategory and at least one complete
/// question/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Life stage (childhood, adolescence, adulthood, ...)
    life_stage: String,
    /// Subcategory within the life stage
    subcategory: String,
    /// Answers in the order they were given
    user_responses: Vec<UserResponse>,
}

impl GenerationRequest {
    /// Validates the parts and builds a request.
    ///
    /// Rules are checked in order and the first failure is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use memoir_core::{GenerationRequest, UserResponse};
    ///
    /// let request = GenerationRequest::new(
    ///     "childhood",
    ///     "family",
    ///     vec![UserResponse::new("Tell me about your first home", "A small apartment.")],
    /// )
    /// .unwrap();
    /// assert_eq!(request.user_responses().len(), 1);
    ///
    /// let err = GenerationRequest::new("childhood", "", vec![]).unwrap_err();
    /// assert_eq!(err.to_string(), "Missing required parameter: subcategory");
    /// ```
    pub fn new(
        life_stage: impl Into<String>,
        subcategory: impl Into<String>,
        user_responses: Vec<UserResponse>,
    ) -> Result<Self, ValidationError> {
        let life_stage = life_stage.into();
        let subcategory = subcategory.into();

        if life_stage.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingParameter(
                "lifeStage".to_string(),
            )));
        }
        if subcategory.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingParameter(
                "subcategory".to_string(),
            )));
        }
        if user_responses.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NoResponses));
        }
        if let Some(index) = user_responses.iter().position(|r| !r.is_complete()) {
            return Err(ValidationError::new(
                ValidationErrorKind::IncompleteResponse { index },
            ));
        }

        Ok(Self {
            life_stage,
            subcategory,
            user_responses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> UserResponse {
        UserResponse::new("Q", "A")
    }

    #[test]
    fn rejects_missing_life_stage_first() {
        let err = GenerationRequest::new("", "", vec![]).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::MissingParameter("lifeStage".into())
        );
    }

    #[test]
    fn rejects_empty_responses() {
        let err = GenerationRequest::new("childhood", "family", vec![]).unwrap_err();
        assert_eq!(err.kind(), &ValidationErrorKind::NoResponses);
        assert_eq!(
            err.to_string(),
            "Please provide at least 1 question/response pairs"
        );
    }

    #[test]
    fn reports_first_incomplete_pair() {
        let err = GenerationRequest::new(
            "childhood",
            "family",
            vec![pair(), UserResponse::new("Q", ""), UserResponse::new("", "A")],
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::IncompleteResponse { index: 1 }
        );
    }

    #[test]
    fn serializes_camel_case() {
        let request = GenerationRequest::new("adulthood", "career", vec![pair()]).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["lifeStage"], "adulthood");
        assert_eq!(json["userResponses"][0]["question"], "Q");
    }
}
