//! Integration module for connecting detection backends with the tracker.
//!
//! This module provides the detector seam, the per-tick session control
//! loop, and the wire types of the IoU reachability service.

mod detector;
mod pipeline;
pub mod wire;

pub use detector::{DetectionSource, confidence_gate};
pub use pipeline::{TickOutcome, TrackingSession};
