//! Per-client sliding-window request log.

use crate::{Clock, RateLimitConfig, SystemClock};
use derive_getters::Getters;
use memoir_interface::RequestGate;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Snapshot of a client's usage in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RateLimitStatus {
    /// Requests recorded inside the window
    requests_in_window: usize,
    /// Requests left before the client is limited
    remaining_requests: usize,
    /// Whether the client is at or over its allowance
    is_limited: bool,
}

/// Tracks request timestamps per client and limits clients that exceed
/// `max_requests` inside any trailing window.
///
/// Every check is recorded, rejected ones included, so a client that keeps
/// hammering stays limited until it backs off for a full window.
///
/// # Examples
///
/// ```
/// use memoir_rate_limit::{RateLimitConfig, SlidingWindowLimiter};
/// use std::time::Duration;
///
/// let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(2, Duration::from_secs(60)));
/// assert!(!limiter.check("10.0.0.1"));
/// assert!(!limiter.check("10.0.0.1"));
/// assert!(limiter.check("10.0.0.1"));
/// assert!(!limiter.check("10.0.0.2"));
/// ```
#[derive(Debug)]
pub struct SlidingWindowLimiter<C = SystemClock> {
    config: RateLimitConfig,
    clock: C,
    log: Mutex<HashMap<String, Vec<Instant>>>,
}

impl SlidingWindowLimiter<SystemClock> {
    /// Creates a limiter on the system clock.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for SlidingWindowLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl<C: Clock> SlidingWindowLimiter<C> {
    /// Creates a limiter reading time from `clock`.
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            log: Mutex::new(HashMap::new()),
        }
    }

    /// Limits in force.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn in_window(&self, now: Instant, at: Instant) -> bool {
        now.saturating_duration_since(at) < *self.config.window()
    }

    /// Record a request from `client_id` and report whether it is over the limit.
    #[instrument(skip(self))]
    pub fn check(&self, client_id: &str) -> bool {
        let now = self.clock.now();
        let mut log = self.log.lock();
        let entry = log.entry(client_id.to_string()).or_default();

        entry.retain(|at| self.in_window(now, *at));
        entry.push(now);

        let count = entry.len();
        let limited = count > *self.config.max_requests();
        if limited {
            warn!(count, max = *self.config.max_requests(), "Client rate limited");
        } else {
            debug!(count, "Rate limit check passed");
        }
        limited
    }

    /// Usage for `client_id` without recording a request.
    pub fn status(&self, client_id: &str) -> RateLimitStatus {
        let now = self.clock.now();
        let max = *self.config.max_requests();
        let count = self
            .log
            .lock()
            .get(client_id)
            .map_or(0, |entries| {
                entries.iter().filter(|at| self.in_window(now, **at)).count()
            });

        RateLimitStatus {
            requests_in_window: count,
            remaining_requests: max.saturating_sub(count),
            is_limited: count >= max,
        }
    }

    /// Forget everything recorded for `client_id`. Returns whether it had entries.
    pub fn reset(&self, client_id: &str) -> bool {
        let removed = self.log.lock().remove(client_id).is_some();
        debug!(client_id, removed, "Rate limit reset");
        removed
    }

    /// Drop timestamps past the retention period and clients left with none.
    ///
    /// Returns how many clients were dropped.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let retention = *self.config.retention();
        let mut log = self.log.lock();
        let before = log.len();

        log.retain(|_, entries| {
            entries.retain(|at| now.saturating_duration_since(*at) < retention);
            !entries.is_empty()
        });

        let dropped = before - log.len();
        debug!(dropped, remaining = log.len(), "Rate limit sweep");
        dropped
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.log.lock().len()
    }
}

impl<C: Clock + 'static> SlidingWindowLimiter<C> {
    /// Run [`sweep`](Self::sweep) every `interval` on the tokio runtime.
    ///
    /// The first sweep happens one interval from now. Abort the returned
    /// handle to stop.
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!(interval_secs = interval.as_secs(), "Starting rate limit sweeper");
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut timer = tokio::time::interval_at(start, interval);
            loop {
                timer.tick().await;
                self.sweep();
            }
        })
    }
}

impl<C: Clock> RequestGate for SlidingWindowLimiter<C> {
    fn is_limited(&self, client_id: &str) -> bool {
        self.check(client_id)
    }
}
