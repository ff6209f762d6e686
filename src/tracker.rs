mod ball_tracker;
mod bbox;
mod kalman_filter;
mod target;
mod throttle;

pub use ball_tracker::{BallTracker, TrackerEstimate};
pub use bbox::{BoundingBox, Detection};
pub use target::{TargetSide, TargetZones};
pub use throttle::{DetectionThrottle, should_detect_now};
