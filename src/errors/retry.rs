use std::future::Future;
use std::time::Duration;

use super::classification::ErrorClassification;
use super::types::TourError;
use tracing::warn;

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed).
    ///
    /// - RateLimitError: 30s + (attempt * 10s), capped at 120s
    /// - Default: exponential backoff 2^attempt + random jitter (0-1s), capped at 30s
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        match self.error_type {
            "RateLimitError" => {
                let secs = 30 + (attempt as u64 * 10);
                Duration::from_secs(secs.min(120))
            }
            _ => {
                let base: f64 = 2.0_f64.powi(attempt as i32);
                let jitter: f64 = rand::random::<f64>();
                let secs = (base + jitter).min(30.0);
                Duration::from_secs_f64(secs)
            }
        }
    }
}

/// Retry configuration for idempotent platform reads.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self { max_retries: 0 }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, TourError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TourError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0;

    loop {
        let err = match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = err.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(err);
        }
        if attempt + 1 >= max_attempts {
            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                max = max_attempts,
                "Max retries exhausted"
            );
            return Err(err);
        }

        let delay = classification.retry_delay(attempt);
        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            max = max_attempts,
            error_type = classification.error_type,
            delay_secs = delay.as_secs(),
            error = %err,
            "Retrying after error"
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_delay_rate_limit() {
        let class = ErrorClassification {
            error_type: "RateLimitError",
            retryable: true,
            category: ErrorCategory::Remote,
        };
        assert_eq!(class.retry_delay(0), Duration::from_secs(30));
        assert_eq!(class.retry_delay(1), Duration::from_secs(40));
        assert_eq!(class.retry_delay(9), Duration::from_secs(120)); // capped
    }

    #[test]
    fn test_retry_delay_default_exponential() {
        let class = ErrorClassification {
            error_type: "NetworkError",
            retryable: true,
            category: ErrorCategory::Remote,
        };
        let d0 = class.retry_delay(0);
        let d1 = class.retry_delay(1);
        assert!(d0.as_secs_f64() >= 1.0 && d0.as_secs_f64() < 3.0);
        assert!(d1.as_secs_f64() >= 2.0 && d1.as_secs_f64() < 4.0);
        assert!(class.retry_delay(12).as_secs_f64() <= 30.0);
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let config = RetryConfig::default();
        let result = with_retry("test", &config, || async { Ok::<_, TourError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 3 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TourError::Authentication("bad key".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(TourError::Authentication(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_disabled_makes_single_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig::disabled();

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TourError::Network("connection reset".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(TourError::Network(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
