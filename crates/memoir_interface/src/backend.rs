//! Text generation backend trait.

use async_trait::async_trait;
use memoir_core::{Prompt, RawCompletion};
use memoir_error::BackendResult;
use std::sync::Arc;

/// A backend that turns one prompt into one completion.
///
/// Implemented by the single-attempt HTTP client and by the retrying
/// decorator that wraps it, so callers never know which they hold.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce a completion for `prompt` using at most `max_output_tokens`.
    async fn complete(&self, prompt: &Prompt, max_output_tokens: u32)
    -> BackendResult<RawCompletion>;

    /// Short provider identifier for logs (e.g. "anthropic").
    fn provider_name(&self) -> &'static str;

    /// Model identifier sent with each request.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<B> CompletionBackend for Arc<B>
where
    B: CompletionBackend + ?Sized,
{
    async fn complete(
        &self,
        prompt: &Prompt,
        max_output_tokens: u32,
    ) -> BackendResult<RawCompletion> {
        (**self).complete(prompt, max_output_tokens).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
