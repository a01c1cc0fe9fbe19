//! Core data types for the memoir story generation service.
//!
//! This crate provides the request, story, and telemetry types shared by the
//! backend client, the story pipeline, and the HTTP layer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod completion;
mod observability;
mod prompt;
mod request;
mod result;
mod story;
mod timing;
mod user_response;

pub use completion::RawCompletion;
pub use observability::{LogFormat, init_observability};
pub use prompt::Prompt;
pub use request::GenerationRequest;
pub use result::PipelineResult;
pub use story::Story;
pub use timing::{Stage, TimingRecord};
pub use user_response::UserResponse;

/// Output token budget used when the caller does not choose one.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;
