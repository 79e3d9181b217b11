use std::time::{Duration, Instant};

use tracing::trace;

/// Interpolation curve applied to normalised time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    #[default]
    Linear,
}

impl Curve {
    pub fn sample(self, t: f32) -> f32 {
        let clamped = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => clamped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    Value(f32),
    /// Delivered exactly once, carrying the end bound.
    Complete(f32),
}

/// A single timed interpolation between two progress bounds.
#[derive(Debug, Clone)]
pub struct ProgressRun {
    curve: Curve,
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    last_sample: Option<Instant>,
    active: bool,
}

impl ProgressRun {
    pub fn start(curve: Curve, from: f32, to: f32, duration: Duration, now: Instant) -> Self {
        trace!(from, to, duration_ms = duration.as_millis() as u64, "progress run started");
        Self {
            curve,
            from,
            to,
            start: now,
            duration,
            last_sample: None,
            active: true,
        }
    }

    /// Advances the run. Timestamps that do not move past the previous sample
    /// are ignored so delivered values never go backwards.
    pub fn sample(&mut self, now: Instant) -> Option<ProgressEvent> {
        if !self.active {
            return None;
        }
        if let Some(last) = self.last_sample {
            if now <= last {
                return None;
            }
        }
        self.last_sample = Some(now);

        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            self.active = false;
            return Some(ProgressEvent::Complete(self.to));
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32().max(f32::EPSILON);
        let mix = self.curve.sample(t);
        Some(ProgressEvent::Value(self.from + (self.to - self.from) * mix))
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_curve_clamps() {
        assert_eq!(Curve::Linear.sample(-1.0), 0.0);
        assert_eq!(Curve::Linear.sample(0.25), 0.25);
        assert_eq!(Curve::Linear.sample(3.0), 1.0);
    }

    #[test]
    fn run_reports_values_then_single_completion() {
        let start = Instant::now();
        let mut run = ProgressRun::start(Curve::Linear, 0.0, 1.0, Duration::from_millis(100), start);

        match run.sample(start + Duration::from_millis(50)) {
            Some(ProgressEvent::Value(v)) => assert!((v - 0.5).abs() < 1e-3),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            run.sample(start + Duration::from_millis(150)),
            Some(ProgressEvent::Complete(1.0))
        );
        assert_eq!(run.sample(start + Duration::from_millis(200)), None);
    }

    #[test]
    fn descending_run_is_monotonic() {
        let start = Instant::now();
        let mut run = ProgressRun::start(Curve::Linear, 1.0, 0.0, Duration::from_millis(100), start);
        let mut last = 1.0;
        for step in 1..10 {
            match run.sample(start + Duration::from_millis(step * 10)) {
                Some(ProgressEvent::Value(v)) => {
                    assert!(v <= last);
                    last = v;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(
            run.sample(start + Duration::from_millis(100)),
            Some(ProgressEvent::Complete(0.0))
        );
    }

    #[test]
    fn stale_timestamps_are_ignored() {
        let start = Instant::now();
        let mut run = ProgressRun::start(Curve::Linear, 0.0, 1.0, Duration::from_millis(100), start);
        assert!(run.sample(start + Duration::from_millis(40)).is_some());
        assert_eq!(run.sample(start + Duration::from_millis(40)), None);
        assert_eq!(run.sample(start + Duration::from_millis(20)), None);
        assert!(run.sample(start + Duration::from_millis(60)).is_some());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let start = Instant::now();
        let mut run = ProgressRun::start(Curve::Linear, 1.0, 0.0, Duration::ZERO, start);
        assert_eq!(run.sample(start), Some(ProgressEvent::Complete(0.0)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let start = Instant::now();
        let mut run = ProgressRun::start(Curve::Linear, 0.0, 1.0, Duration::from_millis(10), start);
        run.cancel();
        run.cancel();
        assert_eq!(run.sample(start + Duration::from_millis(20)), None);
    }
}
