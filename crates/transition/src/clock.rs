use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of frame timestamps.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; used by tests and headless hosts.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, delta: Duration) -> Instant {
        let next = self.now.get() + delta;
        self.now.set(next);
        next
    }

    pub fn set(&self, instant: Instant) {
        self.now.set(instant);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_only_on_request() {
        let clock = ManualClock::default();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        let later = clock.advance(Duration::from_millis(16));
        assert_eq!(later - start, Duration::from_millis(16));
        assert_eq!(clock.now(), later);
    }
}
