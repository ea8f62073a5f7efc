//! Integration module connecting candidate sources, the tracker and result sinks.
//!
//! The pipeline drives one `DetectionSource` and one `BallTracker` per video;
//! sinks and the overlay consume its per-frame results.

mod detector;
mod overlay;
mod pipeline;
mod sink;
mod trajectory;

pub use detector::DetectionSource;
pub use overlay::{OverlayStyle, draw_overlay};
pub use pipeline::{BallPipeline, FrameResult};
pub use sink::{CsvSink, ResultSink, TrackRecord};
pub use trajectory::Trajectory;
