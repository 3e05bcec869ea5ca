//! Generic retry with exponential backoff and jitter.
//!
//! Wraps arbitrary async operations that fail transiently, typically
//! network calls to external analysis services. Backoff grows by `factor`
//! per attempt with uniform jitter in [0.9, 1.1), capped at `max_delay`.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that can report whether retrying may help.
///
/// Implementations typically return true for connection resets, timeouts,
/// HTTP 429, and any 5xx response.
pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

/// Exponential-backoff retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the initial one included.
    max_attempts: u32,
    /// Delay before the first retry.
    initial_delay: Duration,
    /// Upper bound for any inter-attempt delay.
    max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
        factor: f64,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
            factor,
        }
    }

    /// Execute `operation`, retrying errors whose `is_retryable()` is true.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + std::fmt::Display,
    {
        self.execute_if(E::is_retryable, operation).await
    }

    /// Execute `operation` with a custom retry predicate.
    ///
    /// Never invokes the operation more than `max_attempts` times; a
    /// non-retryable error propagates immediately.
    pub async fn execute_if<F, Fut, T, E, P>(
        &self,
        should_retry: P,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut delay = self.initial_delay;
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "Operation succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if attempt >= self.max_attempts || !should_retry(&err) {
                        return Err(err);
                    }
                    warn!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Attempt failed with transient error, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                    delay = self.next_delay(delay);
                }
            }
        }
    }

    /// `min(delay * factor * jitter, max_delay)` with jitter in [0.9, 1.1).
    fn next_delay(&self, delay: Duration) -> Duration {
        let jitter = rand::thread_rng().gen_range(0.9..1.1);
        let next = delay.as_secs_f64() * self.factor * jitter;
        Duration::from_secs_f64(next.min(self.max_delay.as_secs_f64()))
    }
}
