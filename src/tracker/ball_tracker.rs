//! Single-ball state estimator built on the constant-velocity Kalman filter.

use ndarray::{Array1, Array2};

use crate::tracker::bbox::BoundingBox;
use crate::tracker::kalman_filter::KalmanFilter;

/// Per-tick estimator output.
///
/// `x`/`y` are the filter's smoothed position. `vx`/`vy` are the raw
/// difference of the last two measured centers, not the filter's velocity
/// state: raw-measurement velocity reacts to the most recent observed
/// motion immediately, while the filtered position stays smooth for
/// display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerEstimate {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// True when this output came from prediction alone (no detection this
    /// tick), false when a measurement corrected it.
    pub is_prediction: bool,
}

/// Ball position/velocity estimator.
///
/// Starts uninitialized and produces no estimate until the first accepted
/// detection. Once tracking, a missing detection never resets the state:
/// the filter keeps predicting indefinitely. Sessions are short-lived, so
/// there is no drift bound or re-acquisition logic.
#[derive(Debug, Clone, Default)]
pub struct BallTracker {
    kalman: KalmanFilter,
    mean: Option<Array1<f64>>,
    covariance: Option<Array2<f64>>,
    /// Last measured center, kept only to derive the reported raw velocity.
    last_center: Option<(f32, f32)>,
}

impl BallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the first detection has been absorbed.
    pub fn is_initialized(&self) -> bool {
        self.mean.is_some()
    }

    /// Advance the estimator by one control tick.
    ///
    /// With a detection: initialize on the first one, otherwise predict and
    /// correct toward the measured box center. Without one: predict only.
    /// Returns `None` until the first detection has been seen.
    pub fn update(&mut self, detection: Option<&BoundingBox>) -> Option<TrackerEstimate> {
        match detection {
            Some(bbox) => Some(self.observe(bbox)),
            None => self.advance(),
        }
    }

    fn observe(&mut self, bbox: &BoundingBox) -> TrackerEstimate {
        let (cx, cy) = bbox.center();

        let Some((mean, cov)) = self.mean.take().zip(self.covariance.take()) else {
            // First detection: position from the measurement, zero velocity.
            let (mean, cov) = self.kalman.initiate([f64::from(cx), f64::from(cy)]);
            self.mean = Some(mean);
            self.covariance = Some(cov);
            self.last_center = Some((cx, cy));
            return TrackerEstimate {
                x: cx,
                y: cy,
                vx: 0.0,
                vy: 0.0,
                is_prediction: false,
            };
        };

        let (mean, cov) = self.kalman.predict(&mean, &cov);
        let (mean, cov) = self.kalman.update(&mean, &cov, [f64::from(cx), f64::from(cy)]);

        let (vx, vy) = match self.last_center {
            Some((px, py)) => (cx - px, cy - py),
            None => (0.0, 0.0),
        };
        self.last_center = Some((cx, cy));

        let estimate = TrackerEstimate {
            x: mean[0] as f32,
            y: mean[1] as f32,
            vx,
            vy,
            is_prediction: false,
        };
        self.mean = Some(mean);
        self.covariance = Some(cov);
        estimate
    }

    fn advance(&mut self) -> Option<TrackerEstimate> {
        let (mean, cov) = self.mean.take().zip(self.covariance.take())?;
        let (mean, cov) = self.kalman.predict(&mean, &cov);

        let estimate = TrackerEstimate {
            x: mean[0] as f32,
            y: mean[1] as f32,
            vx: mean[2] as f32,
            vy: mean[3] as f32,
            is_prediction: true,
        };
        self.mean = Some(mean);
        self.covariance = Some(cov);
        Some(estimate)
    }

    /// Fixed-size square box centered on the current filter position, for
    /// the display overlay. `None` before the first detection.
    pub fn predicted_box(&self, size: f32) -> Option<BoundingBox> {
        let mean = self.mean.as_ref()?;
        BoundingBox::centered_square(mean[0] as f32, mean[1] as f32, size).ok()
    }
}
