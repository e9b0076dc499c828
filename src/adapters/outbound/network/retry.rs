use crate::shared::error::SbomError;
use crate::shared::Result;
use std::future::Future;
use std::time::Duration;

/// Upper bound for a single backoff delay
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Outcome of a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Worth retrying: transport error, timeout, 429 or 5xx
    Transient(String),
    /// Retrying will not help: any other error status
    Permanent(String),
}

/// Bounded retry with exponential backoff.
///
/// `max_attempts` counts every attempt including the first one. The delay
/// before attempt `n + 1` is `base_delay * 2^(n - 1)`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(MAX_DELAY)
    }

    /// Runs `operation` until it succeeds, fails permanently or the attempts
    /// are used up. Failures are reported as `SbomError::Lookup`.
    pub async fn run<T, F, Fut>(&self, identifier: &str, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptError>>,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Permanent(details)) => {
                    return Err(lookup_error(identifier, attempt, details));
                }
                Err(AttemptError::Transient(details)) => {
                    if attempt >= self.max_attempts {
                        return Err(lookup_error(identifier, attempt, details));
                    }
                    let delay = self.delay_after(attempt);
                    tracing::debug!(
                        identifier,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %details,
                        "lookup attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

fn lookup_error(identifier: &str, attempts: u32, details: String) -> anyhow::Error {
    SbomError::Lookup {
        identifier: identifier.to_string(),
        attempts,
        details,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_grows_exponentially() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_secs(1));
        assert_eq!(policy.delay_after(3), Duration::from_secs(2));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::new(50, Duration::from_secs(1));
        assert_eq!(policy.delay_after(40), MAX_DELAY);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result = policy
            .run("pkg:pypi/foo@1.0", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(AttemptError::Transient("503".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_lookup_error() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run("pkg:pypi/foo@1.0", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AttemptError::Transient("connection refused".to_string())) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result.unwrap_err().downcast_ref::<SbomError>() {
            Some(SbomError::Lookup {
                attempts, details, ..
            }) => {
                assert_eq!(*attempts, 3);
                assert_eq!(details, "connection refused");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run("pkg:pypi/foo@1.0", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AttemptError::Permanent("404 Not Found".to_string())) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
