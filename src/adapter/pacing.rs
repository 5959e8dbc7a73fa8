//! Fixed pacing between successive requests to one retailer

use std::time::Duration;

/// Enforces a fixed pause between successive fetches
///
/// The first call to [`Pacer::wait_turn`] returns immediately; every later
/// call sleeps for the configured delay first.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    started: bool,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: false,
        }
    }

    /// Waits until the next fetch may start
    pub async fn wait_turn(&mut self) {
        if self.started && !self.delay.is_zero() {
            tracing::debug!("Waiting {:?} before next request", self.delay);
            tokio::time::sleep(self.delay).await;
        }
        self.started = true;
    }
}
