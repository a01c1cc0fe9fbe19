//! Single-attempt Anthropic Messages client.

use super::{ANTHROPIC_API_KEY_ENV, AnthropicConfig, AnthropicMessage, AnthropicRequest, AnthropicResponse};
use async_trait::async_trait;
use memoir_core::{Prompt, RawCompletion};
use memoir_error::{BackendError, BackendErrorKind, BackendResult};
use memoir_interface::CompletionBackend;
use tracing::{debug, error, instrument, warn};

/// Anthropic HTTP client.
///
/// Each call to [`complete`](CompletionBackend::complete) is exactly one
/// HTTP request. Failures are classified into [`BackendErrorKind`] so a
/// wrapper can decide whether to try again.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    #[instrument(skip(config), fields(model = %config.model(), endpoint = %config.endpoint()))]
    pub fn new(config: AnthropicConfig) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| BackendError::new(BackendErrorKind::RequestSetup(e.to_string())))?;

        debug!("Created Anthropic client");
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn api_key(&self) -> BackendResult<&str> {
        self.config
            .api_key()
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                BackendError::new(BackendErrorKind::MissingCredential(
                    ANTHROPIC_API_KEY_ENV.to_string(),
                ))
            })
    }
}

fn classify_send_error(e: reqwest::Error) -> BackendError {
    if e.is_builder() {
        BackendError::new(BackendErrorKind::RequestSetup(e.to_string()))
    } else {
        BackendError::new(BackendErrorKind::Unreachable(e.to_string()))
    }
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model(), prompt_len = prompt.as_str().len()))]
    async fn complete(
        &self,
        prompt: &Prompt,
        max_output_tokens: u32,
    ) -> BackendResult<RawCompletion> {
        let api_key = self.api_key()?;

        let request = AnthropicRequest::builder()
            .model(self.config.model().clone())
            .max_tokens(max_output_tokens)
            .temperature(Some(*self.config.temperature()))
            .messages(vec![AnthropicMessage::user(prompt.as_str())])
            .build()
            .map_err(|e| BackendError::new(BackendErrorKind::RequestSetup(e.to_string())))?;

        let response = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", self.config.api_version())
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "Failed to read Anthropic error body");
                    String::new()
                }
            };
            error!(status = status.as_u16(), body = %body, "Anthropic API error");
            return Err(BackendError::new(BackendErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let parsed = response.json::<AnthropicResponse>().await.map_err(|e| {
            BackendError::new(BackendErrorKind::MalformedResponse(e.to_string()))
        })?;

        let text = parsed.first_text().ok_or_else(|| {
            BackendError::new(BackendErrorKind::MalformedResponse(
                "response contained no content blocks".to_string(),
            ))
        })?;

        debug!(
            completion_len = text.len(),
            stop_reason = ?parsed.stop_reason(),
            "Received completion"
        );
        Ok(RawCompletion::new(text))
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
