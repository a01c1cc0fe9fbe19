//! Bounded exponential-backoff retries around a completion backend.

use async_trait::async_trait;
use derive_getters::Getters;
use memoir_core::{Prompt, RawCompletion};
use memoir_error::{BackendResult, RetryableError};
use memoir_interface::CompletionBackend;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// How many times to call the backend and how long to wait in between.
///
/// The delay before retry `k` (counted from 0) is `initial_backoff * 2^k`,
/// with no jitter.
///
/// # Examples
///
/// ```
/// use memoir_models::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_retries(), 3);
/// assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included
    max_retries: usize,
    /// Delay before the first retry
    initial_backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `max_retries` below 1 is treated as 1.
    pub fn new(max_retries: usize, initial_backoff: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            initial_backoff,
        }
    }

    /// Delay to sleep before retry number `retry` (0 is the first retry).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.initial_backoff.saturating_mul(2u32.saturating_pow(retry))
    }

    /// Every delay this policy can produce, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries.saturating_sub(1)).map(|retry| {
            self.delay_for_retry(u32::try_from(retry).unwrap_or(u32::MAX))
        })
    }

    /// Sum of all delays when every attempt fails transiently.
    pub fn worst_case_delay(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Wraps a backend and retries transient failures.
///
/// Client errors (4xx other than 429) and a missing credential are returned
/// immediately. Anything else is retried until the policy is exhausted, and
/// then the last failure is returned unchanged.
#[derive(Debug, Clone)]
pub struct RetryingBackend<B> {
    inner: B,
    policy: RetryPolicy,
}

impl<B> RetryingBackend<B> {
    /// Wraps `inner` with `policy`.
    pub fn new(inner: B, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// The retry policy in force.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<B> CompletionBackend for RetryingBackend<B>
where
    B: CompletionBackend,
{
    #[instrument(
        skip(self, prompt),
        fields(provider = self.inner.provider_name(), max_attempts = self.policy.max_retries)
    )]
    async fn complete(
        &self,
        prompt: &Prompt,
        max_output_tokens: u32,
    ) -> BackendResult<RawCompletion> {
        let max_attempts = self.policy.max_retries;
        let mut attempt: usize = 0;

        loop {
            match self.inner.complete(prompt, max_output_tokens).await {
                Ok(completion) => {
                    if attempt > 0 {
                        info!(attempt = attempt + 1, "Backend call succeeded after retry");
                    }
                    return Ok(completion);
                }
                Err(e) => {
                    warn!(attempt = attempt + 1, error = %e, "Backend call attempt failed");

                    if !e.is_retryable() {
                        debug!(category = %e.kind.category(), "Failure is not retryable");
                        return Err(e);
                    }

                    if attempt + 1 >= max_attempts {
                        error!(attempts = max_attempts, "Backend retries exhausted");
                        return Err(e);
                    }

                    let delay = self
                        .policy
                        .delay_for_retry(u32::try_from(attempt).unwrap_or(u32::MAX));
                    debug!(
                        next_attempt = attempt + 2,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
