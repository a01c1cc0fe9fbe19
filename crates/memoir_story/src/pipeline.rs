//! End-to-end story generation.

use crate::{build_request_prompt, parse_stories};
use chrono::Utc;
use memoir_core::{
    DEFAULT_MAX_OUTPUT_TOKENS, GenerationRequest, PipelineResult, Stage, Story, TimingRecord,
};
use memoir_error::BackendResult;
use memoir_interface::{CompletionBackend, TimingSink};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Prompt, backend call, and parsing for one request.
///
/// Each stage reports its elapsed time to the timing sink under the caller's
/// correlation id. Backend failures come back unchanged once the backend
/// (and whatever retrying it wraps) gives up.
#[derive(Debug, Clone)]
pub struct StoryPipeline<B, S> {
    backend: B,
    timing: S,
    max_output_tokens: u32,
}

impl<B, S> StoryPipeline<B, S>
where
    B: CompletionBackend,
    S: TimingSink,
{
    /// Creates a pipeline with the default output token budget.
    pub fn new(backend: B, timing: S) -> Self {
        Self {
            backend,
            timing,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Overrides the output token budget sent with each backend call.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// The backend this pipeline calls.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Output token budget sent with each backend call.
    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    fn record(&self, correlation_id: &str, stage: Stage, started: Instant) {
        self.timing
            .record(&TimingRecord::new(correlation_id, stage, started.elapsed()));
    }

    /// Generate stories for a validated request.
    ///
    /// Zero stories is a successful outcome: the backend answered but
    /// nothing in the answer followed the title format.
    #[instrument(
        skip(self, request),
        fields(
            life_stage = %request.life_stage(),
            subcategory = %request.subcategory(),
            responses = request.user_responses().len(),
        )
    )]
    pub async fn run(
        &self,
        request: &GenerationRequest,
        correlation_id: &str,
    ) -> BackendResult<Vec<Story>> {
        let total = Instant::now();

        let started = Instant::now();
        let prompt = build_request_prompt(request);
        self.record(correlation_id, Stage::PromptGeneration, started);
        debug!(prompt_len = prompt.as_str().len(), "Prompt built");

        let started = Instant::now();
        let completion = self
            .backend
            .complete(&prompt, self.max_output_tokens)
            .await
            .inspect_err(|e| {
                error!(
                    provider = self.backend.provider_name(),
                    model = self.backend.model_name(),
                    error = %e,
                    "Story generation failed"
                );
            })?;
        self.record(correlation_id, Stage::FirstApiCall, started);

        let started = Instant::now();
        let stories = parse_stories(completion.as_str());
        self.record(correlation_id, Stage::Parsing, started);

        self.record(correlation_id, Stage::TotalGenerationTime, total);
        info!(stories = stories.len(), "Stories generated");

        Ok(stories)
    }

    /// Generate stories and wrap them with the request context.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        correlation_id: &str,
    ) -> BackendResult<PipelineResult> {
        let stories = self.run(request, correlation_id).await?;

        Ok(PipelineResult::new(
            request.life_stage().as_str(),
            request.subcategory().as_str(),
            stories,
            Utc::now(),
        ))
    }
}
