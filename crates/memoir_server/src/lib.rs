//! HTTP surface for the memoir story generation service.
//!
//! Routes, request validation, response envelopes, rate limit enforcement,
//! and layered configuration. The story pipeline itself lives in
//! `memoir_story`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod request;
mod response;
mod server;

pub use api::{
    AppState, SharedPipeline, UNKNOWN_CLIENT, client_id, cors_layer, create_router,
    new_request_id,
};
pub use config::{
    BackendSettings, DEFAULT_CONFIG_FILE, ENV_PREFIX, Environment, RateLimitSettings,
    RetrySettings, ServerSettings, Settings,
};
pub use request::{RawUserResponse, StoryRequestBody};
pub use response::{
    ApiError, ErrorBody, ErrorCode, ErrorEnvelope, RATE_LIMITED_MESSAGE, SANITIZED_SERVER_ERROR,
    SuccessEnvelope,
};
pub use server::serve;
