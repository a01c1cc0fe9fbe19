//! Timing telemetry sink.

use memoir_core::TimingRecord;
use std::sync::Arc;

/// Receives `(correlation id, stage, duration)` measurements.
///
/// Sinks must not fail the pipeline; delivery problems are the sink's own
/// business.
pub trait TimingSink: Send + Sync {
    /// Record one measurement.
    fn record(&self, record: &TimingRecord);
}

impl<S> TimingSink for Arc<S>
where
    S: TimingSink + ?Sized,
{
    fn record(&self, record: &TimingRecord) {
        (**self).record(record)
    }
}
