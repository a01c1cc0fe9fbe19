//! Timing sinks.

use memoir_core::TimingRecord;
use memoir_interface::TimingSink;
use tracing::info;

/// Emits each measurement as a structured `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTimingSink;

impl TimingSink for LoggingTimingSink {
    fn record(&self, record: &TimingRecord) {
        info!(
            correlation_id = %record.correlation_id(),
            stage = %record.stage(),
            duration_ms = record.duration_millis(),
            "Stage timing"
        );
    }
}
