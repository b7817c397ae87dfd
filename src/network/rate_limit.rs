//! src/network/rate_limit.rs
//!
//! Client-side rate limiting for outbound provider requests.

use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::sync::Arc;
use std::time::Duration;

/// A rate limiter enforcing a minimum delay between consecutive
/// requests, wrapping the `governor` crate.
///
/// Cloning is cheap and every clone shares the same quota, so one
/// limiter can gate an entire pool of concurrent fetch workers.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<
        GovernorRateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl RateLimiter {
    /// Creates a limiter that releases one request per `interval`.
    pub fn new(interval: Duration) -> Self {
        let quota = Quota::with_period(interval.max(Duration::from_millis(1)))
            .expect("interval is clamped to a non-zero duration");
        Self { limiter: Arc::new(GovernorRateLimiter::direct(quota)) }
    }

    /// Waits until the next request is allowed.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Non-blocking check, true when a request is allowed right now.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}
