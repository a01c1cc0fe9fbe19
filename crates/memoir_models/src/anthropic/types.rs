//! Anthropic API request and response types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Anthropic API request.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Optional sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Conversation messages
    messages: Vec<AnthropicMessage>,
}

impl AnthropicRequest {
    /// Creates a builder for `AnthropicRequest`.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// Anthropic message in a conversation.
///
/// Content is sent in the plain string form the API accepts for text-only
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct AnthropicMessage {
    /// Role of the message sender
    role: String,
    /// Message text
    content: String,
}

impl AnthropicMessage {
    /// Creates a builder for `AnthropicMessage`.
    pub fn builder() -> AnthropicMessageBuilder {
        AnthropicMessageBuilder::default()
    }

    /// Creates a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anthropic API response.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct AnthropicResponse {
    /// Response ID
    #[serde(default)]
    id: String,
    /// Response type
    #[serde(rename = "type", default)]
    response_type: String,
    /// Role (should be "assistant")
    #[serde(default)]
    role: String,
    /// Content blocks
    content: Vec<AnthropicContent>,
    /// Model used
    #[serde(default)]
    model: String,
    /// Stop reason
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_reason: Option<String>,
    /// Usage information
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<AnthropicUsage>,
}

impl AnthropicResponse {
    /// Text of the first content block, which carries the completion.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| block.text.as_str())
    }
}

/// Content in an Anthropic response.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct AnthropicContent {
    /// Content type ("text" for completions)
    #[serde(rename = "type")]
    content_type: String,
    /// Text content
    #[serde(default)]
    text: String,
}

/// Usage information from Anthropic API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Getters)]
pub struct AnthropicUsage {
    /// Input tokens
    input_tokens: u32,
    /// Output tokens
    output_tokens: u32,
}
