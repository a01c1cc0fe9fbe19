//! Inbound request bodies.

use memoir_core::{GenerationRequest, UserResponse};
use memoir_error::ValidationError;
use serde::Deserialize;

/// One pair as sent by the client. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawUserResponse {
    /// Question text
    #[serde(default)]
    pub question: Option<String>,
    /// Answer text
    #[serde(default)]
    pub response: Option<String>,
}

/// Story generation body exactly as the client sent it, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequestBody {
    /// Life stage
    #[serde(default)]
    pub life_stage: Option<String>,
    /// Subcategory
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Question/response pairs
    #[serde(default)]
    pub user_responses: Option<Vec<RawUserResponse>>,
}

impl StoryRequestBody {
    /// Parse a JSON body. An empty body is treated as `{}`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Number of pairs supplied, complete or not.
    pub fn response_count(&self) -> usize {
        self.user_responses.as_ref().map_or(0, Vec::len)
    }

    /// Apply the validation rules, absent values counting as empty.
    pub fn validate(self) -> Result<GenerationRequest, ValidationError> {
        let user_responses = self
            .user_responses
            .unwrap_or_default()
            .into_iter()
            .map(|pair| {
                UserResponse::new(
                    pair.question.unwrap_or_default(),
                    pair.response.unwrap_or_default(),
                )
            })
            .collect();

        GenerationRequest::new(
            self.life_stage.unwrap_or_default(),
            self.subcategory.unwrap_or_default(),
            user_responses,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoir_error::ValidationErrorKind;

    #[test]
    fn parses_camel_case_body() {
        let body = StoryRequestBody::from_slice(
            br#"{"lifeStage":"childhood","subcategory":"family","userResponses":[{"question":"Q","response":"A"}]}"#,
        )
        .unwrap();

        assert_eq!(body.response_count(), 1);
        let request = body.validate().unwrap();
        assert_eq!(request.life_stage(), "childhood");
        assert_eq!(request.user_responses()[0], UserResponse::new("Q", "A"));
    }

    #[test]
    fn empty_body_reports_missing_life_stage() {
        let body = StoryRequestBody::from_slice(b"").unwrap();
        let err = body.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required parameter: lifeStage"
        );
    }

    #[test]
    fn missing_response_field_is_incomplete() {
        let body = StoryRequestBody::from_slice(
            br#"{"lifeStage":"a","subcategory":"b","userResponses":[{"question":"Q"}]}"#,
        )
        .unwrap();

        assert_eq!(
            body.validate().unwrap_err().kind(),
            &ValidationErrorKind::IncompleteResponse { index: 0 }
        );
    }

    #[test]
    fn wrongly_typed_field_is_a_parse_error() {
        assert!(StoryRequestBody::from_slice(br#"{"userResponses":"nope"}"#).is_err());
        assert!(StoryRequestBody::from_slice(b"{not json").is_err());
    }
}
