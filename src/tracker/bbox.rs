//! Bounding box geometry: validation, IoU, overlap and mirror transforms.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Axis-aligned bounding box in image-pixel coordinates (TLBR format).
///
/// Invariant: `x1 < x2` and `y1 < y2`. Construction rejects degenerate
/// boxes instead of clamping them, so upstream bugs surface at the boundary.
/// Serializes as `{x1, y1, x2, y2}`; deserialization goes through the same
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxCorners")]
pub struct BoundingBox {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// Unvalidated corner payload used for deserialization.
#[derive(Debug, Clone, Copy, Deserialize)]
struct BoxCorners {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl TryFrom<BoxCorners> for BoundingBox {
    type Error = TrackError;

    fn try_from(c: BoxCorners) -> Result<Self, Self::Error> {
        BoundingBox::new(c.x1, c.y1, c.x2, c.y2)
    }
}

impl BoundingBox {
    /// Create a bounding box from TLBR corners, rejecting non-positive
    /// width or height.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, TrackError> {
        if !(x1 < x2 && y1 < y2) {
            return Err(TrackError::InvalidBoundingBox { x1, y1, x2, y2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Fixed-size square box centered on `(cx, cy)`, used for the
    /// predicted-position display overlay.
    pub fn centered_square(cx: f32, cy: f32, size: f32) -> Result<Self, TrackError> {
        let half = size / 2.0;
        Self::new(cx - half, cy - half, cx + half, cy + half)
    }

    /// Construct from corners known to satisfy the invariant. Used for
    /// compiled-in constants; callers must uphold `x1 < x2 && y1 < y2`.
    pub(crate) const fn from_corners_unchecked(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn x1(&self) -> f32 {
        self.x1
    }

    #[inline]
    pub fn y1(&self) -> f32 {
        self.y1
    }

    #[inline]
    pub fn x2(&self) -> f32 {
        self.x2
    }

    #[inline]
    pub fn y2(&self) -> f32 {
        self.y2
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }

    /// Any-overlap contact test: true iff the projections overlap on both
    /// axes with strict inequality, so edge-touching boxes do NOT count.
    ///
    /// This is the "first pixel of intersection" semantics used by the live
    /// target arbitration; it is intentionally distinct from the IoU >= 50%
    /// scoring in [`crate::integration::wire`].
    pub fn touches(&self, other: &BoundingBox) -> bool {
        let overlap_x = self.x1 < other.x2 && self.x2 > other.x1;
        let overlap_y = self.y1 < other.y2 && self.y2 > other.y1;
        overlap_x && overlap_y
    }

    /// Reflect the box about the vertical centerline of a frame of width
    /// `frame_width`, mapping between detection space and mirrored display
    /// space. Involution: `b.mirrored(w).mirrored(w) == b`.
    pub fn mirrored(&self, frame_width: f32) -> BoundingBox {
        BoundingBox {
            x1: frame_width - self.x2,
            y1: self.y1,
            x2: frame_width - self.x1,
            y2: self.y2,
        }
    }
}

/// Single-ball detection: a bounding box plus its confidence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Detected bounding box in detection (un-mirrored camera) space.
    pub bbox: BoundingBox,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Detection {
    /// Create a detection from TLBR corners and a confidence score.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Result<Self, TrackError> {
        Ok(Self {
            bbox: BoundingBox::new(x1, y1, x2, y2)?,
            confidence,
        })
    }

    pub fn from_bbox(bbox: BoundingBox, confidence: f32) -> Self {
        Self { bbox, confidence }
    }
}
