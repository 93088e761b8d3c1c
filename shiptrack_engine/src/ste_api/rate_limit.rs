use std::time::Duration;

use log::trace;

/// Spaces out carrier calls within a run. The first call goes out immediately; every later call waits the full
/// interval first.
#[derive(Debug)]
pub struct CallPacer {
    interval: Duration,
    calls: u32,
}

impl CallPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, calls: 0 }
    }

    /// Waits until the next carrier call may be made.
    pub async fn ready(&mut self) {
        if self.calls > 0 && !self.interval.is_zero() {
            trace!("🔄️ Waiting {}ms before the next carrier call", self.interval.as_millis());
            tokio::time::sleep(self.interval).await;
        }
        self.calls += 1;
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}
