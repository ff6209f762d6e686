//! Session configuration values.
//!
//! Only the values live here; how they are loaded (file, CLI, env) is the
//! embedding application's concern. Every field has a default matching the
//! reference setup for a 640x480 camera.

use std::time::Duration;

use serde::Deserialize;

use crate::tracker::BoundingBox;

/// Target shown on the left of the mirrored display (640-wide frame).
const DEFAULT_TARGET_LEFT: BoundingBox = BoundingBox::from_corners_unchecked(490.0, 300.0, 590.0, 400.0);
/// Target shown on the right of the mirrored display.
const DEFAULT_TARGET_RIGHT: BoundingBox = BoundingBox::from_corners_unchecked(50.0, 300.0, 150.0, 400.0);

/// Tunables for a tracking session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum wall-clock spacing between detector calls, in seconds.
    /// Should exceed the worst-case detector latency so calls never queue.
    pub detection_interval_secs: f64,
    /// Detections at or below this confidence are treated as "no ball".
    pub confidence_threshold: f32,
    /// Target zones, defined in display (mirrored) space.
    pub target_left: BoundingBox,
    pub target_right: BoundingBox,
    /// Side length of the square predicted-position overlay box, in pixels.
    pub predicted_box_size: f32,
    /// Frame width frames are resized to before being sent to the detector.
    pub resize_width: u32,
    /// JPEG quality used for transport compression.
    pub jpeg_quality: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            detection_interval_secs: 0.1,
            confidence_threshold: 0.5,
            target_left: DEFAULT_TARGET_LEFT,
            target_right: DEFAULT_TARGET_RIGHT,
            predicted_box_size: 50.0,
            resize_width: 640,
            jpeg_quality: 90,
        }
    }
}

impl SessionConfig {
    pub fn detection_interval(&self) -> Duration {
        Duration::from_secs_f64(self.detection_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.detection_interval(), Duration::from_millis(100));
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.target_left.x1(), 490.0);
        assert_eq!(config.target_right.x1(), 50.0);
        assert_eq!(config.predicted_box_size, 50.0);
    }

    #[test]
    fn test_deserialize_partial_overrides() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"detection_interval_secs": 0.25, "confidence_threshold": 0.6}"#,
        )
        .unwrap();
        assert_eq!(config.detection_interval(), Duration::from_millis(250));
        assert_eq!(config.confidence_threshold, 0.6);
        // Untouched fields fall back to defaults.
        assert_eq!(config.resize_width, 640);
    }

    #[test]
    fn test_deserialize_rejects_degenerate_target() {
        let result: Result<SessionConfig, _> = serde_json::from_str(
            r#"{"target_left": {"x1": 590.0, "y1": 300.0, "x2": 490.0, "y2": 400.0}}"#,
        );
        assert!(result.is_err());
    }
}
