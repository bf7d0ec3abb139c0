//! Shared failure-driven request throttle.

use std::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

/// Rate limiter shared by every concurrent fetch of one client.
///
/// Tracks the most recent retryable failure anywhere in the process of a
/// fetch. While the last failure is closer than `window`, callers sleep for
/// the remaining window scaled by `2^attempt` before issuing a request, so
/// backoff grows both with contention and with the local retry count.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_failure: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_failure: Mutex::new(None),
        }
    }

    /// Sleep out the backoff owed before attempt number `attempt` (0-based).
    pub async fn pause(&self, attempt: u32) {
        let Some(remaining) = self.remaining() else {
            return;
        };
        let wait = remaining * 2u32.saturating_pow(attempt);
        debug!(wait_ms = wait.as_millis() as u64, attempt, "throttling request");
        sleep(wait).await;
    }

    /// Stamp a retryable failure; subsequent calls to [`pause`](Self::pause)
    /// anywhere in the process will back off.
    pub fn record_failure(&self) {
        let mut last = self
            .last_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(Instant::now());
    }

    fn remaining(&self) -> Option<Duration> {
        let last = self
            .last_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let last = (*last)?;
        let elapsed = last.elapsed();
        if elapsed >= self.window {
            None
        } else {
            Some(self.window - elapsed)
        }
    }
}

impl Default for Throttle {
    /// The stock explorer rate limit window.
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn no_failure_means_no_sleep() {
        let throttle = Throttle::new(Duration::from_millis(1500));
        let before = Instant::now();
        throttle.pause(0).await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_inside_window_causes_backoff() {
        let throttle = Throttle::new(Duration::from_millis(1500));
        throttle.record_failure();

        let before = Instant::now();
        throttle.pause(0).await;
        let slept = Instant::now() - before;
        assert_eq!(slept, Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_per_attempt() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        throttle.record_failure();

        let before = Instant::now();
        throttle.pause(2).await;
        let slept = Instant::now() - before;
        assert_eq!(slept, Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_outside_window_is_forgotten() {
        let throttle = Throttle::new(Duration::from_millis(1500));
        throttle.record_failure();
        sleep(Duration::from_millis(2000)).await;

        let before = Instant::now();
        throttle.pause(0).await;
        assert_eq!(Instant::now(), before);
    }
}
