pub mod backoff;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

pub use backoff::{retry_rate_limited, BackoffPolicy};

/// Spaces request starts at least `delay` apart, shared by concurrent tasks
pub struct RateLimiter {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
    request_count: AtomicUsize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            next_slot: Mutex::new(None),
            request_count: AtomicUsize::new(0),
        }
    }

    pub async fn wait(&self) {
        let slot = self.reserve_slot().await;
        if self.should_wait(slot) {
            sleep_until(slot).await;
        }
        self.increment();
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    async fn reserve_slot(&self) -> Instant {
        let mut next = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next {
            Some(reserved) if reserved > now => reserved,
            _ => now,
        };
        *next = Some(slot + self.delay);
        slot
    }

    fn should_wait(&self, slot: Instant) -> bool {
        slot > Instant::now()
    }

    fn increment(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}
