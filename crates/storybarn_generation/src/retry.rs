//! Bounded retry with a linear backoff ladder.

use std::future::Future;
use std::time::Duration;
use storybarn_error::{RetryableError, StorybarnResult};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// The retry schedule for provider calls.
///
/// Defaults to 3 attempts total with a linear ladder: the second attempt
/// starts 1 unit after the first failure, the third 2 units after the
/// second. Only errors classified retryable are retried; fatal
/// classifications (auth, content policy, oversized input) propagate
/// immediately.
///
/// # Examples
///
/// ```
/// use storybarn_generation::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy with a custom attempt count and backoff unit.
    pub fn new(max_attempts: usize, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// A single-attempt policy (tests, interactive tooling).
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// The waits between attempts: `unit × 1, unit × 2, …`.
    fn intervals(&self) -> impl Iterator<Item = Duration> {
        let unit = self.backoff_unit;
        (1..self.max_attempts as u32).map(move |i| unit * i)
    }

    /// Run an operation under this policy.
    ///
    /// The operation is invoked once per attempt. Errors classified
    /// retryable trigger the next rung of the ladder; anything else fails
    /// fast. After the final attempt the last error is propagated.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> StorybarnResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = StorybarnResult<T>>,
    {
        Retry::spawn(self.intervals(), move || {
            let attempt = operation();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, "Transient provider error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "Permanent provider error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
