mod background;
mod ball_detector;
mod blob;
mod color;
mod config;

pub use background::{BACKGROUND, BackgroundModel, FOREGROUND};
pub use ball_detector::{BallDetector, ScoredBlob, frame_from_raw};
pub use blob::{BlobStats, Moments};
pub use color::{in_range, rgb_to_hsv};
pub use config::{BackgroundConfig, DetectorConfig, HsvRange};
