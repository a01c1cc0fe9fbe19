//! Tests for the sliding-window limiter through its public surface.

use memoir_interface::RequestGate;
use memoir_rate_limit::*;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Gate behavior
// ============================================================================

#[test]
fn test_default_allows_ten_per_minute() {
    let limiter = SlidingWindowLimiter::default();

    for _ in 0..10 {
        assert!(!limiter.is_limited("203.0.113.7"));
    }
    assert!(limiter.is_limited("203.0.113.7"));
}

#[test]
fn test_clients_are_independent() {
    let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(1, Duration::from_secs(60)));

    assert!(!limiter.is_limited("a"));
    assert!(limiter.is_limited("a"));
    assert!(!limiter.is_limited("b"));
}

#[test]
fn test_gate_through_trait_object() {
    let clock = ManualClock::new();
    let gate: Arc<dyn RequestGate> = Arc::new(SlidingWindowLimiter::with_clock(
        RateLimitConfig::new(1, Duration::from_secs(10)),
        clock.clone(),
    ));

    assert!(!gate.is_limited("ip"));
    assert!(gate.is_limited("ip"));

    clock.advance(Duration::from_secs(25));
    assert!(!gate.is_limited("ip"));
}

#[test]
fn test_status_does_not_record() {
    let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(2, Duration::from_secs(60)));

    limiter.check("ip");
    for _ in 0..5 {
        assert_eq!(*limiter.status("ip").requests_in_window(), 1);
    }
    assert_eq!(*limiter.status("ip").remaining_requests(), 1);
    assert!(!*limiter.status("ip").is_limited());
}

#[test]
fn test_unknown_client_status() {
    let limiter = SlidingWindowLimiter::default();
    let status = limiter.status("nobody");

    assert_eq!(*status.requests_in_window(), 0);
    assert_eq!(*status.remaining_requests(), DEFAULT_MAX_REQUESTS);
    assert!(!*status.is_limited());
}

// ============================================================================
// Sweeping
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_sweeper_drops_expired_clients() {
    let clock = ManualClock::new();
    let limiter = Arc::new(SlidingWindowLimiter::with_clock(
        RateLimitConfig::default(),
        clock.clone(),
    ));
    limiter.check("old-client");
    clock.advance(Duration::from_secs(2 * 3600));

    let handle = limiter.clone().spawn_sweeper(Duration::from_secs(3600));
    assert_eq!(limiter.tracked_clients(), 1);

    tokio::time::sleep(Duration::from_secs(3601)).await;
    tokio::task::yield_now().await;

    assert_eq!(limiter.tracked_clients(), 0);
    handle.abort();
}

#[test]
fn test_sweep_keeps_recent_clients() {
    let clock = ManualClock::new();
    let limiter = SlidingWindowLimiter::with_clock(RateLimitConfig::default(), clock.clone());

    limiter.check("recent");
    clock.advance(Duration::from_secs(120));

    assert_eq!(limiter.sweep(), 0);
    assert_eq!(limiter.tracked_clients(), 1);
}
