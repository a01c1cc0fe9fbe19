//! Per-client request limiting for the memoir service.
//!
//! [`SlidingWindowLimiter`] keeps a timestamp log per client id and answers
//! whether the client has made more than the allowed number of requests in
//! the trailing window. It implements
//! [`RequestGate`](memoir_interface::RequestGate) so the HTTP layer can use
//! it without knowing the policy.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    DEFAULT_MAX_REQUESTS, DEFAULT_RETENTION, DEFAULT_WINDOW, RateLimitConfig,
    RateLimitConfigBuilder,
};
pub use limiter::{RateLimitStatus, SlidingWindowLimiter};
