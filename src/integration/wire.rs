//! Wire contract of the IoU-based reachability service.
//!
//! Some deployments put the detector behind an HTTP endpoint that answers
//! "does the ball reach this target?" directly instead of running the live
//! arbitration loop. This module holds that contract: the JSON response
//! shape, the request's target-box parsing, the IoU scoring, and the error
//! to status-code mapping. The HTTP server itself is not in scope.
//!
//! Note the semantics: the service declares the target reached at
//! IoU >= 50%, a much stricter condition than the live loop's any-overlap
//! test in [`crate::tracker::TargetZones`]. The two are intentionally kept
//! as separate operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tracker::BoundingBox;

/// Minimum `intersection_percentage` for `reaches_target` to be true.
pub const REACH_THRESHOLD_PERCENT: f32 = 50.0;

/// Service-side failures, each mapped to an HTTP status class.
#[derive(Debug, Error)]
pub enum WireError {
    /// The `target_bbox` form field was not a valid, well-formed box.
    #[error("invalid target_bbox payload: {0}")]
    MalformedTargetBox(String),

    /// The uploaded file is not an image.
    #[error("unsupported content type `{0}`: expected image/*")]
    UnsupportedContentType(String),

    /// The detector itself failed; the client did nothing wrong.
    #[error("detector failure: {0}")]
    Detector(String),
}

impl WireError {
    /// HTTP status code this error maps to: client errors for bad input,
    /// server error for internal detector failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedTargetBox(_) | Self::UnsupportedContentType(_) => 400,
            Self::Detector(_) => 500,
        }
    }
}

/// JSON body of a reachability answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachabilityResponse {
    pub ball_detected: bool,
    pub ball_bbox: Option<BoundingBox>,
    /// IoU of ball and target, scaled to 0-100.
    pub intersection_percentage: f32,
    /// `intersection_percentage >= 50.0`.
    pub reaches_target: bool,
}

impl ReachabilityResponse {
    /// Response for a frame with no ball in it.
    pub fn no_ball() -> Self {
        Self {
            ball_detected: false,
            ball_bbox: None,
            intersection_percentage: 0.0,
            reaches_target: false,
        }
    }
}

/// IoU between two boxes, scaled to a 0-100 percentage.
pub fn intersection_percentage(a: &BoundingBox, b: &BoundingBox) -> f32 {
    a.iou(b) * 100.0
}

/// Score an optional ball detection against the request's target box.
pub fn evaluate_reachability(
    ball: Option<&BoundingBox>,
    target: &BoundingBox,
) -> ReachabilityResponse {
    let Some(ball) = ball else {
        return ReachabilityResponse::no_ball();
    };

    let percentage = intersection_percentage(ball, target);
    ReachabilityResponse {
        ball_detected: true,
        ball_bbox: Some(*ball),
        intersection_percentage: percentage,
        reaches_target: percentage >= REACH_THRESHOLD_PERCENT,
    }
}

/// Parse the request's `target_bbox` JSON payload into a validated box.
pub fn parse_target_bbox(payload: &str) -> Result<BoundingBox, WireError> {
    serde_json::from_str(payload).map_err(|e| WireError::MalformedTargetBox(e.to_string()))
}

/// Reject uploads that are not images.
pub fn ensure_image_content_type(content_type: &str) -> Result<(), WireError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(WireError::UnsupportedContentType(content_type.to_string()))
    }
}
