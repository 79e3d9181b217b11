use std::time::{Duration, Instant};

/// Fires a `next` request once `interval` has passed since the last
/// transition finished or was started by hand.
#[derive(Debug, Clone)]
pub(crate) struct Autoplay {
    interval: Duration,
    last_started: Instant,
}

impl Autoplay {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_started: now,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_started = now;
    }

    pub fn deadline(&self) -> Instant {
        self.last_started + self.interval
    }

    /// Returns true when the interval has elapsed and restarts the countdown.
    pub fn advance_if_elapsed(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_started) >= self.interval {
            self.last_started = now;
            true
        } else {
            false
        }
    }
}
