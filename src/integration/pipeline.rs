//! TrackingSession: the per-tick control loop tying the pieces together.

use std::time::Instant;

use tracing::{info, trace, warn};

use crate::config::SessionConfig;
use crate::tracker::{
    BallTracker, BoundingBox, Detection, DetectionThrottle, TargetSide, TargetZones,
    TrackerEstimate,
};

use super::detector::{DetectionSource, confidence_gate};

/// Everything a caller needs to render and reason about one tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Smoothed position/velocity estimate, if the tracker is initialized.
    pub estimate: Option<TrackerEstimate>,
    /// Raw detection accepted this tick, in detection (camera) space.
    pub detection: Option<Detection>,
    /// The accepted detection's box mapped to display space for drawing.
    pub ball_display_box: Option<BoundingBox>,
    /// Square box around the predicted position, in detection space.
    pub predicted_box: Option<BoundingBox>,
    /// True iff this tick's detection reached the active target.
    pub target_switched: bool,
    /// Side that is active after this tick.
    pub active_target: TargetSide,
}

/// A single-ball tracking session: detector, throttle, estimator and
/// target state behind one `tick` call.
///
/// The session owns all mutable state, so there are no process-wide
/// globals and two sessions never interfere. Ticks are strictly
/// sequential; the throttle guarantees at most one detector call is in
/// flight because the call happens inline.
pub struct TrackingSession<D: DetectionSource> {
    detector: D,
    tracker: BallTracker,
    throttle: DetectionThrottle,
    targets: TargetZones,
    config: SessionConfig,
}

impl<D: DetectionSource> TrackingSession<D> {
    /// Create a session with the given detector and configuration.
    /// The active target starts on the left.
    pub fn new(detector: D, config: SessionConfig) -> Self {
        Self {
            detector,
            tracker: BallTracker::new(),
            throttle: DetectionThrottle::new(config.detection_interval()),
            targets: TargetZones::new(config.target_left, config.target_right),
            config,
        }
    }

    /// Create a session with the default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, SessionConfig::default())
    }

    /// Advance the session by one control tick.
    ///
    /// `frame` is the un-mirrored camera image; `now` is the tick's wall
    /// clock, taken by the caller so the loop stays testable. The detector
    /// runs only when the throttle allows it; a detector error is logged
    /// and the tick proceeds as "no detection", the estimator predicting
    /// through the gap. Target zones are configured in display space and
    /// mirrored into detection space before the contact test.
    pub fn tick(&mut self, frame: &[u8], width: u32, height: u32, now: Instant) -> TickOutcome {
        let mut detection = None;

        if self.throttle.should_detect(now) {
            match self.detector.detect(frame, width, height) {
                Ok(found) => {
                    detection = confidence_gate(found, self.config.confidence_threshold);
                }
                Err(err) => {
                    warn!(error = %err, "detector failed, continuing on prediction");
                }
            }
            // Marked on every attempt, including failures, so a broken
            // detector is retried at the normal cadence.
            self.throttle.mark(now);
        }

        let estimate = self.tracker.update(detection.as_ref().map(|d| &d.bbox));

        let frame_width = width as f32;
        let mut target_switched = false;
        if let Some(det) = &detection {
            // The detection is in camera space, the zones in display space.
            // Mirroring is an involution, so mapping the ball into display
            // space is the same contact test as mapping the zone out of it.
            let ball_display = det.bbox.mirrored(frame_width);
            target_switched = self.targets.observe_contact(&ball_display);
            if target_switched {
                info!(side = ?self.targets.active(), "target reached, switching sides");
            }
        }

        if let Some(est) = &estimate {
            trace!(?est, "tracker estimate");
        }

        TickOutcome {
            estimate,
            detection,
            ball_display_box: detection.map(|d| d.bbox.mirrored(frame_width)),
            predicted_box: self.tracker.predicted_box(self.config.predicted_box_size),
            target_switched,
            active_target: self.targets.active(),
        }
    }

    /// Side of the currently active target.
    pub fn active_target(&self) -> TargetSide {
        self.targets.active()
    }

    /// Active target box in display space, for drawing.
    pub fn active_target_display_box(&self) -> BoundingBox {
        self.targets.active_box()
    }

    pub fn tracker(&self) -> &BallTracker {
        &self.tracker
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDetector {
        detection: Option<Detection>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Option<Detection>, Self::Error> {
            Ok(self.detection)
        }
    }

    #[test]
    fn test_first_tick_initializes_tracker() {
        let detector = MockDetector {
            detection: Some(Detection::new(80.0, 80.0, 120.0, 120.0, 0.9).unwrap()),
        };
        let mut session = TrackingSession::with_default_config(detector);

        let outcome = session.tick(&[], 640, 480, Instant::now());
        let est = outcome.estimate.unwrap();
        assert_eq!((est.x, est.y), (100.0, 100.0));
        assert!(!est.is_prediction);
        assert!(session.tracker().is_initialized());
        assert!(outcome.predicted_box.is_some());
    }

    #[test]
    fn test_empty_frames_produce_no_estimate() {
        let detector = MockDetector { detection: None };
        let mut session = TrackingSession::with_default_config(detector);

        let outcome = session.tick(&[], 640, 480, Instant::now());
        assert!(outcome.estimate.is_none());
        assert!(outcome.predicted_box.is_none());
        assert_eq!(outcome.active_target, TargetSide::Left);
    }
}
