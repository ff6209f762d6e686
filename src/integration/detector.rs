//! Trait for ball-detection backends.

use crate::tracker::Detection;

/// Seam between the tracking core and whatever produces detections, be it
/// an in-process model or a remote inference service.
///
/// Implementations return at most one ball per call and are expected to:
///
/// - report low-confidence hits and non-ball classes as `Ok(None)` (the
///   [`confidence_gate`] helper covers the score part),
/// - enforce a bounded, sub-second timeout on any remote call, mapping it
///   to an error rather than blocking the control loop.
///
/// Errors are the implementation's own type; the session logs them and
/// degrades the tick to prediction-only, so a flaky detector can never
/// crash the loop.
///
/// # Example
///
/// ```ignore
/// use balltrack_rs::{DetectionSource, Detection, TrackError};
///
/// struct MyDetector {
///     // Your model or HTTP client here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = TrackError;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32)
///         -> Result<Option<Detection>, Self::Error>
///     {
///         // Run inference; return the best ball candidate, if any
///         Ok(None)
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// Run inference on raw image data and return the best ball detection,
    /// or `None` when no ball was found.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Option<Detection>, Self::Error>;
}

/// Drop a detection whose confidence does not exceed `threshold`.
///
/// The threshold is exclusive: a score exactly at the threshold counts as
/// "no detection".
pub fn confidence_gate(detection: Option<Detection>, threshold: f32) -> Option<Detection> {
    detection.filter(|d| d.confidence > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(confidence: f32) -> Detection {
        Detection::new(10.0, 10.0, 50.0, 50.0, confidence).unwrap()
    }

    #[test]
    fn test_confidence_gate_passes_high_scores() {
        let kept = confidence_gate(Some(detection(0.9)), 0.5);
        assert!(kept.is_some());
    }

    #[test]
    fn test_confidence_gate_threshold_is_exclusive() {
        assert!(confidence_gate(Some(detection(0.5)), 0.5).is_none());
        assert!(confidence_gate(Some(detection(0.49)), 0.5).is_none());
    }

    #[test]
    fn test_confidence_gate_none_stays_none() {
        assert!(confidence_gate(None, 0.5).is_none());
    }
}
