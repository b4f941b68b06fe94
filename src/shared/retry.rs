//! Retry with exponential backoff
//!
//! Used at startup where the database may come up after the API process.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: f64,
    /// Cap on the delay between attempts.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Run `operation` until it succeeds, `should_retry` rejects the error, or
/// attempts run out. The last error is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(
    config: &RetryConfig,
    mut operation: F,
    should_retry: impl Fn(&E) -> bool,
    operation_name: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = config.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(operation = operation_name, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if attempt >= config.max_attempts.max(1) || !should_retry(&err) => {
                warn!(operation = operation_name, attempt, error = %err, "Giving up");
                return Err(err);
            }
            Err(err) => {
                warn!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = Duration::from_secs_f64(
                    (delay.as_secs_f64() * config.backoff_multiplier)
                        .min(config.max_delay.as_secs_f64()),
                );
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_millis(4),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry_with_backoff(
            &fast(),
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("attempt {n} failed"))
                } else {
                    Ok(n)
                }
            },
            |_| true,
            "test",
        )
        .await;
        assert_eq!(result, Ok(3));
    }

    #[tokio::test]
    async fn permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry_with_backoff(
            &fast(),
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("bad credentials".to_string())
            },
            |_| false,
            "test",
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
