use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Minimum-interval pacing for remote calls.
///
/// Every call to [`Throttle::wait`] returns no earlier than `interval` after
/// the previous one returned. The first call waits a full `interval` too, so
/// each request is preceded by the pause. A zero interval never waits.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Throttle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }

        let now = Instant::now();
        let deadline = {
            let mut next_slot = self
                .next_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let deadline = next_slot.map_or(now + self.interval, |slot| slot.max(now));
            *next_slot = Some(deadline + self.interval);
            deadline
        };

        sleep_until(deadline).await;
    }
}
