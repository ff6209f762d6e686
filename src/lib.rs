//! Single-ball tracking with a constant-velocity Kalman filter, wall-clock
//! detection throttling and alternating target zones.
//!
//! The crate is split in two:
//!
//! - [`tracker`]: the estimation and geometry core. [`BallTracker`] fuses
//!   sparse, noisy detections into a smooth position/velocity estimate,
//!   [`DetectionThrottle`] decouples detector cadence from frame rate, and
//!   [`TargetZones`] flips the active target when the ball makes contact.
//! - [`integration`]: the [`DetectionSource`] seam for plugging in a
//!   detector backend, the [`TrackingSession`] control loop, and the wire
//!   types of the IoU reachability service.
//!
//! Camera capture, display, HTTP transport and the detector model itself
//! stay outside the crate; a session only needs something that implements
//! [`DetectionSource`].
//!
//! ```ignore
//! use std::time::Instant;
//! use balltrack_rs::{SessionConfig, TrackingSession};
//!
//! let mut session = TrackingSession::new(my_detector, SessionConfig::default());
//! loop {
//!     let frame = camera.capture();
//!     let outcome = session.tick(&frame.bytes, frame.width, frame.height, Instant::now());
//!     // draw outcome.ball_display_box, outcome.predicted_box, ...
//! }
//! ```

pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::SessionConfig;
pub use error::TrackError;
pub use integration::{DetectionSource, TickOutcome, TrackingSession, confidence_gate, wire};
pub use tracker::{
    BallTracker, BoundingBox, Detection, DetectionThrottle, TargetSide, TargetZones,
    TrackerEstimate,
};
