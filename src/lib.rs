//! Single-ball detection and tracking for static-camera video.
//!
//! A [`BallDetector`] proposes at most one candidate per frame from motion,
//! color and shape cues; a [`BallTracker`] fuses those candidates into a
//! gated, Kalman-smoothed trajectory that coasts across short gaps.

pub mod config;
pub mod detector;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::PipelineConfig;
pub use detector::{BallDetector, DetectorConfig};
pub use error::{ConfigError, DetectorError, SinkError};
pub use integration::{
    BallPipeline, CsvSink, DetectionSource, FrameResult, ResultSink, Trajectory, draw_overlay,
};
pub use tracker::{BallTracker, Candidate, Point, TrackOutput, TrackState, TrackerConfig};
