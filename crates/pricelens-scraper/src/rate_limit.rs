//! Retry with exponential backoff for transient fetch failures.
//!
//! Only conditions that can clear on their own are retried: network errors,
//! HTTP 429 and 5xx responses. Everything else (404, other 4xx, bad URLs,
//! selector errors) is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` may succeed when the same request is repeated.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        _ => false,
    }
}

/// Wait before the retry that follows failed attempt `attempt` (0-based).
///
/// Exponential backoff, raised to the server's `Retry-After` when a 429
/// carried one.
fn retry_delay(err: &ScraperError, attempt: u32, backoff_base_secs: u64) -> Duration {
    let backoff_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    let delay_secs = match err {
        ScraperError::RateLimited {
            retry_after_secs: Some(after),
            ..
        } => backoff_secs.max(*after),
        _ => backoff_secs,
    };
    Duration::from_secs(delay_secs)
}

/// Runs `operation`, retrying transient errors up to `max_retries` times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds, so with a base of 1 the schedule is 1s, 2s, 4s. A 429 with a
/// `Retry-After` header waits at least that many seconds. With
/// `max_retries = 2` the operation runs at most three times; the last error
/// is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay = retry_delay(&err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs = delay.as_secs(),
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
