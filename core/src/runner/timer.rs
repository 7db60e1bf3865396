use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep};

/// Single-shot quiet timer owned by the monitor loop.
///
/// Starts disarmed. `elapsed()` never resolves while disarmed, and an
/// elapse disarms the timer again; only `restart()` arms it.
pub(crate) struct QuietTimer {
    period: Duration,
    sleep: Pin<Box<Sleep>>,
    armed: bool,
}

impl QuietTimer {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            period,
            sleep: Box::pin(tokio::time::sleep(period)),
            armed: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }

    /// Stops a timer that is still counting down and returns true. Returns
    /// false when the timer was idle or its deadline has already passed; an
    /// elapse that passed but was not observed stays pending.
    pub(crate) fn stop(&mut self) -> bool {
        if self.armed && !self.sleep.is_elapsed() {
            self.armed = false;
            return true;
        }
        false
    }

    /// Discards an elapse that fired but was never delivered.
    fn drain(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    /// Stop, drain, then arm for a full period.
    pub(crate) fn restart(&mut self) {
        if !self.stop() && self.drain() {
            tracing::trace!("dropped undelivered quiet-timer elapse");
        }
        self.sleep.as_mut().reset(Instant::now() + self.period);
        self.armed = true;
    }

    pub(crate) async fn elapsed(&mut self) {
        if !self.armed {
            std::future::pending::<()>().await;
        }
        self.sleep.as_mut().await;
        self.armed = false;
    }
}
