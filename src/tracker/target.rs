//! Alternating target zones and the contact transition between them.

use crate::tracker::bbox::BoundingBox;

/// Which of the two fixed target zones is meant.
///
/// Sides are named in display space: `Left` is the zone the user sees on
/// the left of the mirrored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSide {
    Left,
    Right,
}

impl TargetSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// The two fixed target boxes plus the currently active side.
///
/// Exactly one side is active at any time; only the contact transition in
/// [`observe_contact`](TargetZones::observe_contact) mutates it. The active
/// side is an explicit enum, never inferred by comparing box coordinates.
///
/// There is no hysteresis: a ball that stays in contact across consecutive
/// evaluations flips the target every time. Callers wanting debounce must
/// add it themselves.
#[derive(Debug, Clone)]
pub struct TargetZones {
    left: BoundingBox,
    right: BoundingBox,
    active: TargetSide,
}

impl TargetZones {
    /// Create the zone pair; tracking sessions start aiming at `Left`.
    pub fn new(left: BoundingBox, right: BoundingBox) -> Self {
        Self {
            left,
            right,
            active: TargetSide::Left,
        }
    }

    pub fn active(&self) -> TargetSide {
        self.active
    }

    pub fn box_for(&self, side: TargetSide) -> BoundingBox {
        match side {
            TargetSide::Left => self.left,
            TargetSide::Right => self.right,
        }
    }

    pub fn active_box(&self) -> BoundingBox {
        self.box_for(self.active)
    }

    /// Evaluate a ball box against the active target and flip the active
    /// side on contact. Both boxes must be in the same coordinate space.
    /// Returns true iff the target flipped.
    pub fn observe_contact(&mut self, ball: &BoundingBox) -> bool {
        if ball.touches(&self.active_box()) {
            self.active = self.active.opposite();
            true
        } else {
            false
        }
    }
}
