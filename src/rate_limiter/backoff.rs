use std::future::Future;
use std::time::Duration;

use log::warn;
use tokio::time::sleep;

use crate::errors::{HeatmapError, HeatmapResult};

/// Exponential backoff for throttled provider calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base_ms: u64,
    pub max_ms: u64,
    pub max_retries: usize,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            max_ms: 16_000,
            max_retries: 3,
        }
    }
}

impl BackoffPolicy {
    pub fn new(base_ms: u64, max_ms: u64, max_retries: usize) -> Self {
        Self {
            base_ms,
            max_ms,
            max_retries,
        }
    }

    /// Delay before retry number `attempt` (0-based); a server hint wins when longer
    pub fn delay_for(&self, attempt: usize, retry_after: Option<Duration>) -> Duration {
        let exponential = self.exponential_ms(attempt);
        let computed = Duration::from_millis(exponential.min(self.max_ms));
        match retry_after {
            Some(hint) if hint > computed => hint,
            _ => computed,
        }
    }

    fn exponential_ms(&self, attempt: usize) -> u64 {
        let factor = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
        self.base_ms.saturating_mul(factor)
    }
}

/// Repeat `operation` while it reports rate limiting, up to `policy.max_retries` times
pub async fn retry_rate_limited<T, F, Fut>(
    policy: &BackoffPolicy,
    label: &str,
    mut operation: F,
) -> HeatmapResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = HeatmapResult<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Err(HeatmapError::RateLimited { retry_after }) if attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt, retry_after);
                warn!(
                    "Rate limited on {}, retry {}/{} in {}ms",
                    label,
                    attempt + 1,
                    policy.max_retries,
                    delay.as_millis()
                );
                sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
