//! Limiter settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default requests allowed per window.
pub const DEFAULT_MAX_REQUESTS: usize = 10;
/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
/// Default age after which timestamps are swept.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(3600);

/// Sliding-window limits applied to every client.
///
/// # Examples
///
/// ```
/// use memoir_rate_limit::RateLimitConfig;
/// use std::time::Duration;
///
/// let config = RateLimitConfig::builder()
///     .max_requests(2_usize)
///     .window(Duration::from_secs(1))
///     .build()
///     .unwrap();
/// assert_eq!(*config.max_requests(), 2);
/// assert_eq!(*config.retention(), Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RateLimitConfig {
    /// Requests a client may make inside one window
    #[builder(default = "DEFAULT_MAX_REQUESTS")]
    max_requests: usize,
    /// Length of the sliding window
    #[builder(default = "DEFAULT_WINDOW")]
    window: Duration,
    /// Timestamps older than this are dropped by a sweep
    #[builder(default = "DEFAULT_RETENTION")]
    retention: Duration,
}

impl RateLimitConfig {
    /// Creates a builder for `RateLimitConfig`.
    pub fn builder() -> RateLimitConfigBuilder {
        RateLimitConfigBuilder::default()
    }

    /// Limits with the default retention.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            retention: DEFAULT_RETENTION,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}
