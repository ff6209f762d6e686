use std::collections::VecDeque;
use std::time::{Duration, Instant};

use balltrack_rs::{
    Detection, DetectionSource, SessionConfig, TargetSide, TrackError, TrackingSession,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Detector stub replaying a fixed script of results, one per call.
/// Runs dry as "no ball".
struct ScriptedDetector {
    script: VecDeque<Result<Option<Detection>, TrackError>>,
    calls: usize,
}

impl ScriptedDetector {
    fn new(script: Vec<Result<Option<Detection>, TrackError>>) -> Self {
        Self {
            script: script.into(),
            calls: 0,
        }
    }
}

impl DetectionSource for ScriptedDetector {
    type Error = TrackError;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Option<Detection>, Self::Error> {
        self.calls += 1;
        self.script.pop_front().unwrap_or(Ok(None))
    }
}

/// Camera-space detection inside the detection-space image of the default
/// Left target (display {490,300,590,400} mirrors to {50,300,150,400}).
fn ball_in_left_zone() -> Detection {
    Detection::new(60.0, 310.0, 110.0, 360.0, 0.9).unwrap()
}

/// Camera-space detection inside the detection-space image of the default
/// Right target (display {50,300,150,400} mirrors to {490,300,590,400}).
fn ball_in_right_zone() -> Detection {
    Detection::new(500.0, 310.0, 550.0, 360.0, 0.9).unwrap()
}

#[test]
fn test_end_to_end_target_switching() {
    let detector = ScriptedDetector::new(vec![
        Ok(Some(ball_in_left_zone())),
        Ok(Some(ball_in_left_zone())),
        Ok(Some(ball_in_right_zone())),
    ]);
    let mut session = TrackingSession::with_default_config(detector);
    let t0 = Instant::now();

    assert_eq!(session.active_target(), TargetSide::Left);

    // Tick 1: ball contacts the Left target, switching to Right.
    let outcome = session.tick(&[], WIDTH, HEIGHT, t0);
    assert!(outcome.target_switched);
    assert_eq!(outcome.active_target, TargetSide::Right);
    let est = outcome.estimate.unwrap();
    assert!(!est.is_prediction);
    // The Right zone sits on the left of the mirrored display.
    assert_eq!(session.active_target_display_box().x1(), 50.0);

    // Tick 2: same ball position again. The Left zone is no longer the
    // active target, so nothing flips.
    let outcome = session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(100));
    assert!(!outcome.target_switched);
    assert_eq!(outcome.active_target, TargetSide::Right);

    // Tick 3: ball reaches the Right target, switching back to Left.
    let outcome = session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(200));
    assert!(outcome.target_switched);
    assert_eq!(outcome.active_target, TargetSide::Left);
}

#[test]
fn test_throttle_limits_detector_calls() {
    let detector = ScriptedDetector::new(vec![]);
    let mut session = TrackingSession::with_default_config(detector);
    let t0 = Instant::now();

    // Four ticks inside one 100ms window: only the first and the one at
    // exactly the interval boundary may call the detector.
    session.tick(&[], WIDTH, HEIGHT, t0);
    session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(50));
    session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(99));
    session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(100));

    assert_eq!(session.detector().calls, 2);
}

#[test]
fn test_detector_failure_degrades_to_prediction() {
    let detector = ScriptedDetector::new(vec![
        Ok(Some(Detection::new(80.0, 80.0, 120.0, 120.0, 0.9).unwrap())),
        Err(TrackError::DetectorTransport("connection refused".into())),
        Err(TrackError::DetectorTimeout(Duration::from_millis(500))),
        Ok(Some(Detection::new(90.0, 80.0, 130.0, 120.0, 0.9).unwrap())),
    ]);
    let mut session = TrackingSession::with_default_config(detector);
    let t0 = Instant::now();

    let outcome = session.tick(&[], WIDTH, HEIGHT, t0);
    assert!(!outcome.estimate.unwrap().is_prediction);

    // Both failing ticks keep the loop alive and fall back to prediction.
    for i in 1..=2 {
        let outcome = session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(100 * i));
        assert!(outcome.detection.is_none());
        assert!(outcome.estimate.unwrap().is_prediction);
        assert!(outcome.predicted_box.is_some());
    }

    // Recovery: the next valid detection corrects the estimate again.
    let outcome = session.tick(&[], WIDTH, HEIGHT, t0 + Duration::from_millis(300));
    assert!(!outcome.estimate.unwrap().is_prediction);
}

#[test]
fn test_low_confidence_detections_are_ignored() {
    let detector = ScriptedDetector::new(vec![Ok(Some(
        Detection::new(80.0, 80.0, 120.0, 120.0, 0.4).unwrap(),
    ))]);
    let mut session = TrackingSession::with_default_config(detector);

    let outcome = session.tick(&[], WIDTH, HEIGHT, Instant::now());
    assert!(outcome.detection.is_none());
    // Gated detection never initializes the tracker.
    assert!(outcome.estimate.is_none());
    assert!(outcome.predicted_box.is_none());
}

#[test]
fn test_display_boxes_are_mirrored() {
    let detector = ScriptedDetector::new(vec![Ok(Some(ball_in_left_zone()))]);
    let mut session = TrackingSession::with_default_config(detector);

    let outcome = session.tick(&[], WIDTH, HEIGHT, Instant::now());
    let display = outcome.ball_display_box.unwrap();
    let camera = outcome.detection.unwrap().bbox;

    assert_eq!(display.x1(), WIDTH as f32 - camera.x2());
    assert_eq!(display.x2(), WIDTH as f32 - camera.x1());
    assert_eq!(display.y1(), camera.y1());
    assert_eq!(display.y2(), camera.y2());
}
