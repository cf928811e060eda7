//! Throttle strategies guarding calls to the extraction service.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Called before every extraction request. Implementations decide how long
/// the caller waits.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn acquire(&self);
}

/// No waiting at all.
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn acquire(&self) {}
}

/// Enforces a minimum spacing between consecutive acquisitions, across
/// all concurrent callers.
pub struct FixedDelay {
    delay: Duration,
    last: Mutex<Option<Instant>>,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn acquire(&self) {
        // held across the sleep so waiters queue up behind each other
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                log::trace!("[BATCH] Waiting {:?} before next extraction", ready_at - Instant::now());
                sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
