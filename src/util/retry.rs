//! Exponential backoff for transient service failures.

use std::future::Future;
use std::time::Duration;

use crate::error::AgentsError;

/// How often and how patiently to repeat a failed call.
///
/// Only errors for which [`AgentsError::is_retryable`] holds are repeated.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first call included.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Nominal backoff before retry number `retry` (0-based), without jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let scaled = self.initial_backoff.as_secs_f64() * self.multiplier.powi(retry as i32);
        Duration::from_secs_f64(scaled.min(self.max_backoff.as_secs_f64()))
    }

    /// Delay before retry number `retry` after `error`: jittered backoff, but
    /// never shorter than a `retry-after` hint from the service.
    fn delay(&self, retry: u32, error: &AgentsError) -> Duration {
        let jitter = 0.75 + rand_factor() * 0.5;
        let backoff = Duration::from_secs_f64(self.backoff(retry).as_secs_f64() * jitter);
        match error {
            AgentsError::RateLimited {
                retry_after_ms: Some(ms),
            } => backoff.max(Duration::from_millis(*ms)),
            _ => backoff,
        }
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Returns the last error seen. With `max_attempts == 0` the operation is
    /// never called and `AgentsError::Timeout(0)` is returned.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, AgentsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AgentsError>>,
    {
        if self.max_attempts == 0 {
            return Err(AgentsError::Timeout(0));
        }

        let mut retry = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            if !error.is_retryable() || retry + 1 >= self.max_attempts {
                return Err(error);
            }

            let delay = self.delay(retry, &error);
            tracing::warn!(
                attempt = retry + 1,
                max_attempts = self.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying service call"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}

/// Pseudo-random factor in [0, 1) from the clock and thread id.
fn rand_factor() -> f64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .hash(&mut hasher);
    std::thread::current().id().hash(&mut hasher);
    (hasher.finish() % 10_000) as f64 / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_then_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(250),
            multiplier: 2.0,
        };
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(250));
    }

    #[test]
    fn rate_limit_hint_sets_a_floor() {
        let policy = RetryPolicy::default();
        let hinted = AgentsError::RateLimited {
            retry_after_ms: Some(10_000),
        };
        assert!(policy.delay(0, &hinted) >= Duration::from_secs(10));
        assert!(policy.delay(0, &AgentsError::Timeout(1)) <= Duration::from_millis(625));
    }
}
