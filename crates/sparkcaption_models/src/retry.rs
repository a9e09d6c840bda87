//! Bounded exponential backoff for rate-limited chat calls.

use serde::{Deserialize, Serialize};
use sparkcaption_error::RetryableError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Retry configuration for single-shot chat calls.
///
/// Only rate limiting (HTTP 429) is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait before the first retry, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Factor applied to the backoff after every retry.
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff_ms: 1000,
            backoff_multiplier: 2,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Runs `operation`, retrying while it fails with a rate-limit error.
///
/// Waits for the provider's `retry-after` hint when there is one, otherwise
/// for the current backoff. The backoff doubles after every retry either way.
/// Any other error, or running out of attempts, returns the error annotated
/// with the number of attempts made.
#[instrument(skip(operation))]
pub async fn retry_on_rate_limit<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    let mut backoff = Duration::from_millis(config.initial_backoff_ms);

    loop {
        attempt += 1;
        debug!(attempt, max_attempts, "Executing operation");

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !err.is_rate_limited() {
                    warn!(attempt, status = ?err.status_code(), error = %err, "Error is not retryable, failing immediately");
                    return Err(err.with_attempts(attempt));
                }

                if attempt >= max_attempts {
                    warn!(attempt, "All retry attempts exhausted");
                    return Err(err.with_attempts(attempt));
                }

                let delay = err.retry_after().unwrap_or(backoff);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying"
                );
                sleep(delay).await;

                backoff = backoff.saturating_mul(config.backoff_multiplier);
            }
        }
    }
}
