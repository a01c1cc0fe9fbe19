//! Per-stage timing telemetry.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline stages that report elapsed time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Rendering the prompt
    PromptGeneration,
    /// Calling the backend, retries included
    FirstApiCall,
    /// Splitting the completion into stories
    Parsing,
    /// Whole pipeline, start to finish
    TotalGenerationTime,
}

/// Elapsed time for one stage of one request.
///
/// # Examples
///
/// ```
/// use memoir_core::{Stage, TimingRecord};
/// use std::time::Duration;
///
/// let record = TimingRecord::new("req-1", Stage::Parsing, Duration::from_millis(12));
/// assert_eq!(record.stage().to_string(), "parsing");
/// assert_eq!(record.duration_millis(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TimingRecord {
    /// Request the measurement belongs to
    correlation_id: String,
    /// Stage that was measured
    stage: Stage,
    /// Elapsed wall time
    duration: Duration,
}

impl TimingRecord {
    /// Creates a timing record.
    pub fn new(correlation_id: impl Into<String>, stage: Stage, duration: Duration) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            stage,
            duration,
        }
    }

    /// Elapsed time in whole milliseconds.
    pub fn duration_millis(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}
