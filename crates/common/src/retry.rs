//! Retry utilities.
//!
//! Outbound calls (the external book catalogue) retry transient failures with
//! exponential backoff. The caller decides which errors are transient.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy for outbound calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 means a single attempt)
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Upper bound for any single delay
    pub max_delay: Duration,

    /// Multiplier applied per retry
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(2)
    }
}

impl RetryPolicy {
    /// Exponential backoff starting at 100ms and doubling.
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Override the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let delay_ms = self.initial_delay.as_millis() as f64 * factor;
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Run `operation`, retrying while `should_retry` accepts the error and the
/// policy has retries left.
///
/// # Examples
///
/// ```no_run
/// use ebookstore_common::retry::{retry_if, RetryPolicy};
///
/// # async fn run() {
/// let result = retry_if(
///     &RetryPolicy::exponential(2),
///     || async { Err::<(), _>(std::io::Error::from(std::io::ErrorKind::TimedOut)) },
///     |err| err.kind() == std::io::ErrorKind::TimedOut,
/// )
/// .await;
/// # }
/// ```
pub async fn retry_if<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut retry = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if retry >= policy.max_retries || !should_retry(&error) {
                    return Err(error);
                }

                retry += 1;
                let delay = policy.delay_for(retry);
                tracing::debug!(
                    retry,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying operation after transient error"
                );
                sleep(delay).await;
            }
        }
    }
}
