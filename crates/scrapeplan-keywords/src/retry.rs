//! Retry with exponential back-off and jitter for generative calls.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors. Everything else goes straight back to the cascade so the
//! next tier can run.

use std::future::Future;
use std::time::Duration;

use crate::error::KeywordError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** network timeouts and connect failures, HTTP 5xx, HTTP 429,
/// and the outer call timeout.
///
/// **Not retriable:** other API statuses (auth, bad request), malformed or
/// empty responses, missing input, and client misconfiguration.
pub(crate) fn is_retriable(err: &KeywordError) -> bool {
    match err {
        KeywordError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status()
                    .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
        }
        KeywordError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        KeywordError::Timeout(_) => true,
        KeywordError::Deserialize { .. }
        | KeywordError::EmptyResponse
        | KeywordError::MissingInput(_)
        | KeywordError::InvalidConfig(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors.
///
/// The delay before retry `n` is `backoff_base_ms × 2^(n-1)` with ±25 %
/// jitter, capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, KeywordError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, KeywordError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "generative call failed, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
