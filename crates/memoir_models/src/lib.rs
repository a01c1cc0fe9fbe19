//! Generation backend clients for memoir.
//!
//! [`AnthropicClient`] performs exactly one Messages API call per
//! [`complete`](memoir_interface::CompletionBackend::complete). Wrap it in a
//! [`RetryingBackend`] to get bounded exponential backoff on transient
//! failures.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod anthropic;
mod retry;

pub use anthropic::{
    ANTHROPIC_API_KEY_ENV, AnthropicClient, AnthropicConfig, AnthropicConfigBuilder,
    AnthropicContent, AnthropicMessage, AnthropicMessageBuilder, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
pub use memoir_core::DEFAULT_MAX_OUTPUT_TOKENS;
pub use retry::{RetryPolicy, RetryingBackend};
