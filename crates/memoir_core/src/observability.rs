//! Tracing subscriber initialization.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for local development
    #[default]
    Pretty,
    /// One JSON object per event, for log collectors
    Json,
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this a
/// second time fails because a global subscriber is already set.
pub fn init_observability(service_name: &'static str, format: LogFormat) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .flatten_event(true)
            .try_init(),
    };
    installed.map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    info!(service_name, log_format = %format, "Tracing initialized");
    Ok(())
}
