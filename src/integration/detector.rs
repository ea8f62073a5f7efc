//! Trait for per-frame ball candidate sources.

use image::RgbImage;

use crate::detector::{BallDetector, frame_from_raw};
use crate::error::DetectorError;
use crate::tracker::Candidate;

/// Trait for per-frame ball candidate sources.
///
/// Implement this trait to feed the tracker from something other than the
/// built-in [`BallDetector`], e.g. a learned model or recorded annotations.
///
/// # Example
///
/// ```ignore
/// use balltrack_rs::{Candidate, DetectionSource, Point};
///
/// struct Replay {
///     points: std::vec::IntoIter<Candidate>,
/// }
///
/// impl DetectionSource for Replay {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Candidate, Self::Error> {
///         Ok(self.points.next().flatten())
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Find at most one candidate in a frame.
    ///
    /// # Arguments
    /// * `input` - Tightly packed 8-bit RGB pixels, row-major
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(&mut self, input: &[u8], width: u32, height: u32)
    -> Result<Candidate, Self::Error>;

    /// Find at most one candidate in a decoded frame.
    fn detect_image(&mut self, frame: &RgbImage) -> Result<Candidate, Self::Error> {
        self.detect(frame.as_raw(), frame.width(), frame.height())
    }
}

impl DetectionSource for BallDetector {
    type Error = DetectorError;

    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Candidate, Self::Error> {
        let frame = frame_from_raw(input, width, height)?;
        BallDetector::detect_image(self, &frame)
    }

    fn detect_image(&mut self, frame: &RgbImage) -> Result<Candidate, Self::Error> {
        BallDetector::detect_image(self, frame)
    }
}
