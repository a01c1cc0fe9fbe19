//! Anthropic Messages API integration.

mod client;
mod config;
mod types;

pub use client::AnthropicClient;
pub use config::{ANTHROPIC_API_KEY_ENV, AnthropicConfig, AnthropicConfigBuilder};
pub use types::{
    AnthropicContent, AnthropicMessage, AnthropicMessageBuilder, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
