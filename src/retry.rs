//! Retry logic for transient fetch failures
//!
//! The retry loop is a small state machine per candidate: it attempts the
//! operation up to `max_attempts` times (inclusive of the first attempt),
//! sleeps a fixed delay between attempts, and stops immediately on a
//! non-retryable error. The terminal states are [`RetryOutcome::Succeeded`]
//! and [`RetryOutcome::GaveUp`]; neither is fatal to the caller.

use crate::config::RetryConfig;
use crate::error::FetchError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (connection errors, timeouts, bad status codes) should
/// return `true`. Permanent failures should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            // The connection may succeed on the next dial
            FetchError::Transport(_) => true,
            // The server may recover between attempts
            FetchError::Status(_) => true,
            // A torn read after a success status is not retried
            FetchError::Body(_) => false,
        }
    }
}

/// Terminal state of a bounded retry loop
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    /// The operation succeeded on attempt number `attempts`
    Succeeded {
        /// The operation's result
        value: T,
        /// Attempts made, including the successful one (1-based)
        attempts: u32,
    },
    /// All attempts failed, or a non-retryable error stopped the loop
    GaveUp {
        /// The last error observed
        error: E,
        /// Attempts made before giving up
        attempts: u32,
    },
}

impl<T, E> RetryOutcome<T, E> {
    /// Number of attempts the loop performed
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::GaveUp { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Execute an async operation with a bounded fixed-delay retry loop
///
/// `policy.max_attempts` counts the first attempt; a value of 0 is treated as
/// 1 so the operation always runs at least once. The delay between attempts
/// is fixed (`policy.retry_delay`), optionally stretched by uniform jitter.
///
/// Unlike a `Result`-returning wrapper, the outcome always carries the number
/// of attempts made, which callers report alongside the result.
pub async fn run_with_retry<F, Fut, T, E>(policy: &RetryConfig, mut operation: F) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "operation succeeded after retry");
                }
                return RetryOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                let delay = if policy.jitter {
                    add_jitter(policy.retry_delay)
                } else {
                    policy.retry_delay
                };

                tracing::warn!(
                    error = %error,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis(),
                    "attempt failed, retrying"
                );

                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                if error.is_retryable() {
                    tracing::warn!(
                        error = %error,
                        attempts = attempt,
                        "giving up after exhausting retry budget"
                    );
                } else {
                    tracing::warn!(
                        error = %error,
                        attempts = attempt,
                        "giving up on non-retryable error"
                    );
                }
                return RetryOutcome::GaveUp {
                    error,
                    attempts: attempt,
                };
            }
        }
    }
}

/// Stretch a delay by a uniform random factor in `[1.0, 2.0]`
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}
