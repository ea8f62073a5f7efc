//! Constant-velocity Kalman filter for a 2-D point using ndarray, with nalgebra for the 2x2 inverse.
//!
//! State layout is `[x, y, vx, vy]`; measurements are `[x, y]`.

use ndarray::{Array1, Array2};
use tracing::warn;

const NDIM: usize = 2;

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    process_cov: Array2<f64>,
    measurement_cov: Array2<f64>,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(1.0, 0.03, 1.0)
    }
}

impl KalmanFilter {
    /// Build a filter advancing `dt` time units per `predict` call.
    pub fn new(dt: f64, process_noise: f64, measurement_noise: f64) -> Self {
        let mut motion_mat = Array2::eye(2 * NDIM);
        for i in 0..NDIM {
            motion_mat[[i, NDIM + i]] = dt;
        }

        let mut update_mat = Array2::zeros((NDIM, 2 * NDIM));
        for i in 0..NDIM {
            update_mat[[i, i]] = 1.0;
        }

        Self {
            motion_mat,
            update_mat,
            process_cov: Array2::eye(2 * NDIM) * process_noise,
            measurement_cov: Array2::eye(NDIM) * measurement_noise,
        }
    }

    /// Start a track at `measurement` with zero velocity and unit covariance.
    pub fn initiate(&self, measurement: [f64; 2]) -> (Array1<f64>, Array2<f64>) {
        let mut mean = Array1::zeros(2 * NDIM);
        mean[0] = measurement[0];
        mean[1] = measurement[1];
        (mean, Array2::eye(2 * NDIM))
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let new_mean = self.motion_mat.dot(mean);
        let new_covariance =
            self.motion_mat.dot(covariance).dot(&self.motion_mat.t()) + &self.process_cov;
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
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + &self.measurement_cov;
        (mean_proj, covariance_proj)
    }

    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: [f64; 2],
    ) -> (Array1<f64>, Array2<f64>) {
        let (projected_mean, projected_cov) = self.project(mean, covariance);

        let Some(s_inv) = invert_2x2(&projected_cov) else {
            warn!("innovation covariance is singular, skipping correction");
            return (mean.clone(), covariance.clone());
        };

        let innovation = Array1::from_vec(measurement.to_vec()) - projected_mean;

        // K = P * H^T * S^-1
        let pht = covariance.dot(&self.update_mat.t());
        let kalman_gain = pht.dot(&s_inv);

        let new_mean = mean + &kalman_gain.dot(&innovation);
        let new_covariance = covariance - &kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        (new_mean, new_covariance)
    }
}

fn invert_2x2(m: &Array2<f64>) -> Option<Array2<f64>> {
    let nm = nalgebra::Matrix2::new(m[[0, 0]], m[[0, 1]], m[[1, 0]], m[[1, 1]]);
    let inv = nm.try_inverse()?;
    let mut res = Array2::zeros((2, 2));
    for i in 0..2 {
        for j in 0..2 {
            res[[i, j]] = inv[(i, j)];
        }
    }
    Some(res)
}
