//! Server startup.

use crate::cli::Args;
use memoir_core::init_observability;
use memoir_error::{ConfigError, ConfigErrorKind, MemoirResult};
use memoir_interface::{CompletionBackend, TimingSink};
use memoir_models::{ANTHROPIC_API_KEY_ENV, AnthropicClient, RetryingBackend};
use memoir_rate_limit::SlidingWindowLimiter;
use memoir_server::{AppState, Settings, serve};
use memoir_story::{LoggingTimingSink, StoryPipeline};
use std::sync::Arc;
use tracing::{info, warn};

/// Load configuration, wire the pipeline, and serve until shutdown.
pub async fn run(args: Args) -> MemoirResult<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    init_observability("memoir", *settings.server().log_format())
        .map_err(|e| ConfigError::new(ConfigErrorKind::Logging(e)))?;
    info!(config_file = ?args.config, "Starting Memoir server");

    if args.check_config {
        info!(?settings, "Configuration is valid");
        return Ok(());
    }

    let api_key = std::env::var(ANTHROPIC_API_KEY_ENV).ok();
    if api_key.is_none() {
        warn!(
            var = ANTHROPIC_API_KEY_ENV,
            "API key not set; story generation will fail until it is"
        );
    }

    let client = AnthropicClient::new(settings.anthropic_config(api_key)?)?;
    let policy = settings.retry_policy();
    info!(
        model = client.config().model(),
        max_attempts = policy.max_retries(),
        initial_backoff_ms = u64::try_from(policy.initial_backoff().as_millis()).unwrap_or(u64::MAX),
        "Generation backend configured"
    );

    let backend: Arc<dyn CompletionBackend> = Arc::new(RetryingBackend::new(client, policy));
    let timing: Arc<dyn TimingSink> = Arc::new(LoggingTimingSink);
    let pipeline = StoryPipeline::new(backend, timing)
        .with_max_output_tokens(*settings.backend().max_output_tokens());

    let limiter = Arc::new(SlidingWindowLimiter::new(settings.rate_limit_config()));
    let sweeper = limiter.clone().spawn_sweeper(settings.sweep_interval());

    let state = AppState::new(pipeline, limiter, *settings.server().environment());
    let served = serve(&settings, state).await;

    sweeper.abort();
    info!("Memoir server stopped");
    served?;
    Ok(())
}
