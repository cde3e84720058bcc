//! Minimum spacing between unauthenticated calls.

use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;
use tracing::debug;

/// Enforces `delay` between the end of one call and the start of the next.
///
/// The lock is held for the whole call, so concurrent callers on the same
/// client queue up behind each other.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_done: Mutex<Option<Instant>>,
}

/// Held while a paced call runs. Dropping it stamps the completion time,
/// whether the call succeeded or not.
pub struct PaceGuard<'a> {
    last_done: MutexGuard<'a, Option<Instant>>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_done: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the previous call finished at least `delay` ago.
    pub async fn acquire(&self) -> PaceGuard<'_> {
        let last_done = self.last_done.lock().await;

        if let Some(done) = *last_done {
            let elapsed = done.elapsed();
            if elapsed < self.delay {
                let wait = self.delay - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "pacing unauthenticated call");
                tokio::time::sleep(wait).await;
            }
        }

        PaceGuard { last_done }
    }
}

impl Drop for PaceGuard<'_> {
    fn drop(&mut self) {
        *self.last_done = Some(Instant::now());
    }
}
