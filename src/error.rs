//! Error taxonomy for the tracking core and detector boundary.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the tracking core and the detector boundary.
///
/// "Nothing found" is not an error: detector adapters report it as
/// `Ok(None)` and the estimator keeps predicting. Every variant here either
/// rejects bad input at a boundary or describes a detector-side failure
/// that the control loop degrades to a prediction-only tick.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Bounding box with non-positive width or height. Rejected at
    /// construction rather than clamped.
    #[error("invalid bounding box ({x1}, {y1}, {x2}, {y2}): requires x1 < x2 and y1 < y2")]
    InvalidBoundingBox { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// The detector did not answer within its bounded timeout.
    #[error("detector timed out after {0:?}")]
    DetectorTimeout(Duration),

    /// Transport-level failure reaching the detector.
    #[error("detector transport failure: {0}")]
    DetectorTransport(String),

    /// The detector answered with a payload the adapter could not decode.
    #[error("invalid detector response: {0}")]
    DetectorInvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bbox_message() {
        let err = TrackError::InvalidBoundingBox {
            x1: 10.0,
            y1: 5.0,
            x2: 10.0,
            y2: 20.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid bounding box"));
        assert!(msg.contains("x1 < x2"));
    }
}
