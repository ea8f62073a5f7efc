mod ball_tracker;
mod kalman_filter;
mod point;
mod track_state;

pub use ball_tracker::{BallTracker, TrackerConfig};
pub use kalman_filter::KalmanFilter;
pub use point::{Candidate, Point, TrackOutput};
pub use track_state::TrackState;
