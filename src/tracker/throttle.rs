//! Wall-clock gate for expensive detector calls.

use std::time::{Duration, Instant};

/// Returns true iff at least `interval` has elapsed since `last_attempt`.
/// The boundary is inclusive: exactly `interval` elapsed permits a call.
#[inline]
pub fn should_detect_now(now: Instant, last_attempt: Instant, interval: Duration) -> bool {
    now.duration_since(last_attempt) >= interval
}

/// Time-based throttle decoupling detector invocations from the frame rate.
///
/// The caller asks [`should_detect`](DetectionThrottle::should_detect) each
/// tick and must call [`mark`](DetectionThrottle::mark) after every
/// attempt regardless of outcome, so a failing detector is retried at the
/// same fixed cadence instead of storming. Calls are strictly serial, so
/// one throttle instance also guarantees at most one outstanding detection.
#[derive(Debug, Clone)]
pub struct DetectionThrottle {
    interval: Duration,
    last_attempt: Option<Instant>,
}

impl DetectionThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_attempt: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the detector may run this tick. Always true before the
    /// first attempt.
    pub fn should_detect(&self, now: Instant) -> bool {
        match self.last_attempt {
            Some(last) => should_detect_now(now, last, self.interval),
            None => true,
        }
    }

    /// Record a detection attempt, regardless of its outcome.
    pub fn mark(&mut self, now: Instant) {
        self.last_attempt = Some(now);
    }
}
