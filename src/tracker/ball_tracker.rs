//! Single-ball tracker: initialization hysteresis, gating, coasting and loss.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::error::ConfigError;
use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::point::{Candidate, Point, TrackOutput};
use crate::tracker::track_state::TrackState;

/// Configuration for the BallTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detections needed before a track starts.
    pub init_threshold: u32,
    /// Consecutive misses still reported as visible.
    pub max_missed_visible: u32,
    /// Detections farther than this from the prediction are discarded.
    pub gate_radius: f64,
    pub process_noise: f64,
    pub measurement_noise: f64,
    /// Time elapsed between two `update` calls, in frames.
    pub time_step: f64,
    /// Reset the init counter on a frame without a detection.
    pub reset_init_on_miss: bool,
    /// Misses beyond `max_missed_visible` after which the track is dropped
    /// and initialization starts over. `None` keeps the lost track forever.
    pub reacquire_after: Option<u32>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            init_threshold: 3,
            max_missed_visible: 10,
            gate_radius: 140.0,
            process_noise: 0.03,
            measurement_noise: 1.0,
            time_step: 1.0,
            reset_init_on_miss: false,
            reacquire_after: None,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.init_threshold == 0 {
            return Err(ConfigError::Invalid("init_threshold must be at least 1".into()));
        }
        if !(self.gate_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gate_radius must be positive, got {}",
                self.gate_radius
            )));
        }
        if !(self.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if self.process_noise < 0.0 || !(self.measurement_noise > 0.0) {
            return Err(ConfigError::Invalid(
                "process_noise must be non-negative and measurement_noise positive".into(),
            ));
        }
        Ok(())
    }
}

/// Fuses per-frame candidates into a gated, smoothed ball trajectory.
///
/// `update` must be called exactly once per frame in frame order: each call
/// advances the motion model by one `time_step`.
#[derive(Debug, Clone)]
pub struct BallTracker {
    config: TrackerConfig,
    kalman_filter: KalmanFilter,
    state: TrackState,
    mean: Option<Array1<f64>>,
    covariance: Option<Array2<f64>>,
    init_count: u32,
    missed_frames: u32,
    frame_id: u64,
}

impl BallTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let kalman_filter = KalmanFilter::new(
            config.time_step,
            config.process_noise,
            config.measurement_noise,
        );
        Ok(Self {
            config,
            kalman_filter,
            state: TrackState::Uninitialized,
            mean: None,
            covariance: None,
            init_count: 0,
            missed_frames: 0,
            frame_id: 0,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }

    /// Number of `update` calls so far.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Filter position estimate, once initialized.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.mean.as_ref().map(|m| (m[0], m[1]))
    }

    /// Filter velocity estimate, once initialized.
    pub fn velocity(&self) -> Option<(f64, f64)> {
        self.mean.as_ref().map(|m| (m[2], m[3]))
    }

    pub fn update(&mut self, candidate: Candidate) -> TrackOutput {
        self.frame_id += 1;
        match (self.mean.take(), self.covariance.take()) {
            (Some(mean), Some(covariance)) => self.track(candidate, mean, covariance),
            _ => self.initialize(candidate),
        }
    }

    fn initialize(&mut self, candidate: Candidate) -> TrackOutput {
        let Some(point) = candidate else {
            if self.config.reset_init_on_miss {
                self.init_count = 0;
            }
            return TrackOutput::HIDDEN;
        };

        self.init_count += 1;
        if self.init_count < self.config.init_threshold {
            trace!(frame = self.frame_id, count = self.init_count, "init detection");
            return TrackOutput::HIDDEN;
        }

        let (mean, covariance) = self
            .kalman_filter
            .initiate([point.x as f64, point.y as f64]);
        self.mean = Some(mean);
        self.covariance = Some(covariance);
        self.missed_frames = 0;
        self.state = TrackState::Tracked;
        info!(frame = self.frame_id, x = point.x, y = point.y, "track initialized");

        TrackOutput::visible_at(point)
    }

    fn track(
        &mut self,
        candidate: Candidate,
        mean: Array1<f64>,
        covariance: Array2<f64>,
    ) -> TrackOutput {
        let (pred_mean, pred_cov) = self.kalman_filter.predict(&mean, &covariance);
        let (pred_x, pred_y) = (pred_mean[0], pred_mean[1]);

        let gate_sq = self.config.gate_radius * self.config.gate_radius;
        let measurement = candidate.filter(|p| {
            let inside = p.distance_sq_to(pred_x, pred_y) <= gate_sq;
            if !inside {
                trace!(frame = self.frame_id, x = p.x, y = p.y, "candidate gated out");
            }
            inside
        });

        if let Some(point) = measurement {
            let (new_mean, new_cov) =
                self.kalman_filter
                    .update(&pred_mean, &pred_cov, [point.x as f64, point.y as f64]);
            let corrected = Point::from_f64(new_mean[0], new_mean[1]);
            self.mean = Some(new_mean);
            self.covariance = Some(new_cov);

            if self.state == TrackState::Lost {
                info!(frame = self.frame_id, x = corrected.x, y = corrected.y, "track reacquired");
            }
            self.missed_frames = 0;
            self.state = TrackState::Tracked;
            return TrackOutput::visible_at(corrected);
        }

        self.mean = Some(pred_mean);
        self.covariance = Some(pred_cov);
        self.missed_frames += 1;

        if self.missed_frames <= self.config.max_missed_visible {
            self.state = TrackState::Coasting;
            return TrackOutput::visible_at(Point::from_f64(pred_x, pred_y));
        }

        if self.state != TrackState::Lost {
            info!(frame = self.frame_id, missed = self.missed_frames, "track lost");
            self.state = TrackState::Lost;
        }

        if let Some(extra) = self.config.reacquire_after {
            if self.missed_frames > self.config.max_missed_visible.saturating_add(extra) {
                info!(frame = self.frame_id, "track dropped, waiting for reinitialization");
                self.reset();
            }
        }

        TrackOutput::HIDDEN
    }

    /// Drop the track and start initialization from scratch.
    pub fn reset(&mut self) {
        self.mean = None;
        self.covariance = None;
        self.state = TrackState::Uninitialized;
        self.init_count = 0;
        self.missed_frames = 0;
    }
}

impl Default for BallTracker {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            kalman_filter: KalmanFilter::default(),
            state: TrackState::Uninitialized,
            mean: None,
            covariance: None,
            init_count: 0,
            missed_frames: 0,
            frame_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> BallTracker {
        BallTracker::default()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrackerConfig {
            gate_radius: 0.0,
            ..Default::default()
        };
        assert!(BallTracker::new(config).is_err());

        let config = TrackerConfig {
            init_threshold: 0,
            ..Default::default()
        };
        assert!(BallTracker::new(config).is_err());
    }

    #[test]
    fn test_initialization_takes_threshold_detections() {
        let mut t = tracker();
        let p = Some(Point::new(50, 60));
        assert_eq!(t.update(p), TrackOutput::HIDDEN);
        assert_eq!(t.update(p), TrackOutput::HIDDEN);
        assert!(!t.is_initialized());
        assert_eq!(t.update(p), TrackOutput::visible_at(Point::new(50, 60)));
        assert!(t.is_initialized());
        assert_eq!(t.velocity(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_init_count_persists_across_miss_by_default() {
        let mut t = tracker();
        let p = Some(Point::new(10, 10));
        t.update(p);
        t.update(p);
        assert_eq!(t.update(None), TrackOutput::HIDDEN);
        assert_eq!(t.init_count(), 2);
        assert!(t.update(p).visible);
    }

    #[test]
    fn test_init_count_resets_when_configured() {
        let mut t = BallTracker::new(TrackerConfig {
            reset_init_on_miss: true,
            ..Default::default()
        })
        .unwrap();
        let p = Some(Point::new(10, 10));
        t.update(p);
        t.update(p);
        t.update(None);
        assert_eq!(t.init_count(), 0);
        assert!(!t.update(p).visible);
        assert!(!t.update(p).visible);
        assert!(t.update(p).visible);
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let mut t = tracker();
        for _ in 0..3 {
            t.update(Some(Point::new(5, 5)));
        }
        t.reset();
        assert_eq!(t.state(), TrackState::Uninitialized);
        assert_eq!(t.position(), None);
        assert_eq!(t.update(Some(Point::new(5, 5))), TrackOutput::HIDDEN);
    }
}
