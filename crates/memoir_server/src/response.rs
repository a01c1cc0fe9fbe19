//! Response envelopes.

use crate::Environment;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Message returned in place of server error details in production.
pub const SANITIZED_SERVER_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Message returned to rate-limited clients.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<T> {
    /// Always true
    success: bool,
    /// Correlation id for this request
    request_id: String,
    /// Payload
    data: T,
}

impl<T> SuccessEnvelope<T> {
    /// Wraps `data` for request `request_id`.
    pub fn new(request_id: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            request_id: request_id.into(),
            data,
        }
    }
}

/// Machine-readable error codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed or failed validation
    BadRequest,
    /// Unknown route
    NotFound,
    /// Wrong HTTP method
    MethodNotAllowed,
    /// Client exceeded its request allowance
    RateLimitExceeded,
    /// Anything that went wrong on our side
    ServerError,
}

/// Error details inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ErrorBody {
    /// Human-readable message
    message: String,
    /// Machine-readable code
    code: ErrorCode,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ErrorEnvelope {
    /// Always false
    success: bool,
    /// What went wrong
    error: ErrorBody,
}

/// An error on its way to the client.
///
/// # Examples
///
/// ```
/// use memoir_server::{ApiError, Environment, SANITIZED_SERVER_ERROR};
///
/// let err = ApiError::server_error("Backend API error: 503 - overloaded");
/// assert_eq!(err.message(), "Backend API error: 503 - overloaded");
///
/// let err = err.sanitized(Environment::Production);
/// assert_eq!(err.message(), SANITIZED_SERVER_ERROR);
///
/// let err = ApiError::bad_request("Missing required parameter: lifeStage")
///     .sanitized(Environment::Production);
/// assert_eq!(err.message(), "Missing required parameter: lifeStage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ApiError {
    /// HTTP status
    status: StatusCode,
    /// Error code
    code: ErrorCode,
    /// Message shown to the client
    message: String,
}

impl ApiError {
    /// Creates an error.
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 with a validation or parsing message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message)
    }

    /// 404.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Not found")
    }

    /// 405.
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::MethodNotAllowed,
            "Method not allowed",
        )
    }

    /// 429.
    pub fn rate_limited() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::RateLimitExceeded,
            RATE_LIMITED_MESSAGE,
        )
    }

    /// 500 with the underlying message.
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServerError,
            message,
        )
    }

    /// Replace the message of 5xx errors in production.
    pub fn sanitized(self, environment: Environment) -> Self {
        if environment.is_production() && self.status.is_server_error() {
            Self {
                message: SANITIZED_SERVER_ERROR.to_string(),
                ..self
            }
        } else {
            self
        }
    }

    /// The envelope this error renders as.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error: ErrorBody {
                message: self.message.clone(),
                code: self.code,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope())).into_response()
    }
}
