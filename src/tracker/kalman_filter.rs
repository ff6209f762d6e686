//! Constant-velocity Kalman filter using ndarray and a nalgebra-based inverse.
//!
//! State is `[x, y, vx, vy]`; only position is measured. One predict step
//! corresponds to one control tick, so velocity is expressed in pixels per
//! tick and the transition is simply `x += vx`, `y += vy`.

use ndarray::{Array1, Array2};

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    process_noise: Array2<f64>,
    measurement_noise: Array2<f64>,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl KalmanFilter {
    pub fn new() -> Self {
        let ndim = 2;
        let mut motion_mat = Array2::eye(2 * ndim);
        for i in 0..ndim {
            motion_mat[[i, ndim + i]] = 1.0;
        }

        let mut update_mat = Array2::zeros((ndim, 2 * ndim));
        for i in 0..ndim {
            update_mat[[i, i]] = 1.0;
        }

        // Measurement noise well above position process noise damps
        // isolated detection jitter; the larger velocity process noise lets
        // the velocity states absorb direction changes faster than position.
        let process_std = [0.1, 0.1, 1.0, 1.0];
        let mut process_noise = Array2::zeros((4, 4));
        for i in 0..4 {
            process_noise[[i, i]] = process_std[i];
        }

        let mut measurement_noise = Array2::zeros((2, 2));
        for i in 0..2 {
            measurement_noise[[i, i]] = 10.0;
        }

        Self {
            motion_mat,
            update_mat,
            process_noise,
            measurement_noise,
        }
    }

    /// Initialize the state from a first position measurement, with zero
    /// velocity.
    pub fn initiate(&self, measurement: [f64; 2]) -> (Array1<f64>, Array2<f64>) {
        let mut mean = Array1::zeros(4);
        mean[0] = measurement[0];
        mean[1] = measurement[1];

        let std = [10.0, 10.0, 25.0, 25.0];
        let mut cov = Array2::zeros((4, 4));
        for i in 0..4 {
            cov[[i, i]] = std[i];
        }

        (mean, cov)
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let new_mean = self.motion_mat.dot(mean);
        let new_covariance =
            self.motion_mat.dot(covariance).dot(&self.motion_mat.t()) + &self.process_noise;

        (new_mean, new_covariance)
    }

    /// Project the state distribution into measurement space.
    pub fn project(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let mean_proj = self.update_mat.dot(mean);
        let covariance_proj =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + &self.measurement_noise;

        (mean_proj, covariance_proj)
    }

    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: [f64; 2],
    ) -> (Array1<f64>, Array2<f64>) {
        let (projected_mean, projected_cov) = self.project(mean, covariance);

        let measurement_arr = Array1::from_vec(measurement.to_vec());
        let innovation = measurement_arr - projected_mean;

        // K = P * H^T * S^-1
        // Since H is [I 0], P * H^T is the first 2 columns of P (4x2).
        // S is projected_cov (2x2).

        // We use nalgebra internally for 2x2 inversion to avoid BLAS/LAPACK.
        let s_inv = self.invert_2x2(&projected_cov);

        let pht = covariance.dot(&self.update_mat.t()); // 4x2
        let kalman_gain = pht.dot(&s_inv); // 4x2

        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        (new_mean, new_covariance)
    }

    /// Helper to invert a 2x2 matrix using nalgebra (pure Rust).
    fn invert_2x2(&self, m: &Array2<f64>) -> Array2<f64> {
        let mut nm = nalgebra::Matrix2::zeros();
        for i in 0..2 {
            for j in 0..2 {
                nm[(i, j)] = m[[i, j]];
            }
        }
        let inv = nm.try_inverse().expect("2x2 matrix inversion failed");
        let mut res = Array2::zeros((2, 2));
        for i in 0..2 {
            for j in 0..2 {
                res[[i, j]] = inv[(i, j)];
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate() {
        let kf = KalmanFilter::new();
        let (mean, _) = kf.initiate([100.0, 200.0]);
        assert_eq!(mean[0], 100.0);
        assert_eq!(mean[1], 200.0);
        assert_eq!(mean[2], 0.0);
        assert_eq!(mean[3], 0.0);
    }

    #[test]
    fn test_predict_advances_by_velocity() {
        let kf = KalmanFilter::new();
        let (mut mean, cov) = kf.initiate([100.0, 200.0]);
        mean[2] = 5.0;
        mean[3] = -3.0;

        let (next, _) = kf.predict(&mean, &cov);
        assert_eq!(next[0], 105.0);
        assert_eq!(next[1], 197.0);
        assert_eq!(next[2], 5.0);
        assert_eq!(next[3], -3.0);
    }

    #[test]
    fn test_update_pulls_toward_measurement() {
        let kf = KalmanFilter::new();
        let (mean, cov) = kf.initiate([100.0, 100.0]);
        let (mean, cov) = kf.predict(&mean, &cov);
        let (corrected, _) = kf.update(&mean, &cov, [110.0, 100.0]);

        // Corrected x lies strictly between prediction and measurement.
        assert!(corrected[0] > 100.0);
        assert!(corrected[0] < 110.0);
        // Velocity picks up the observed rightward motion.
        assert!(corrected[2] > 0.0);
    }
}
