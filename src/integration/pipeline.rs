//! BallPipeline for combining detection with tracking.

use image::RgbImage;

use crate::tracker::{BallTracker, Candidate, TrackOutput, TrackerConfig};
use crate::error::ConfigError;

use super::DetectionSource;

/// Outcome of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Zero-based index, taken from call order.
    pub frame: u64,
    /// Raw detector output before gating.
    pub candidate: Candidate,
    pub output: TrackOutput,
}

/// Runs a `DetectionSource` and a `BallTracker` strictly in frame order.
///
/// Build one pipeline per video; the detector's background model and the
/// tracker's state both accumulate over the stream.
pub struct BallPipeline<D: DetectionSource> {
    detector: D,
    tracker: BallTracker,
    frame: u64,
}

impl<D: DetectionSource> BallPipeline<D> {
    /// Create a new pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector,
            tracker: BallTracker::new(config)?,
            frame: 0,
        })
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: BallTracker::default(),
            frame: 0,
        }
    }

    /// Process the next frame given as raw RGB bytes.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameResult, D::Error> {
        let candidate = self.detector.detect(input, width, height)?;
        Ok(self.advance(candidate))
    }

    /// Process the next decoded frame.
    pub fn process_image(&mut self, frame: &RgbImage) -> Result<FrameResult, D::Error> {
        let candidate = self.detector.detect_image(frame)?;
        Ok(self.advance(candidate))
    }

    fn advance(&mut self, candidate: Candidate) -> FrameResult {
        let output = self.tracker.update(candidate);
        let result = FrameResult {
            frame: self.frame,
            candidate,
            output,
        };
        self.frame += 1;
        result
    }

    /// Frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn tracker(&self) -> &BallTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Point;

    struct MockDetector {
        candidates: std::vec::IntoIter<Candidate>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Candidate, Self::Error> {
            Ok(self.candidates.next().flatten())
        }
    }

    #[test]
    fn test_pipeline_numbers_frames() {
        let detector = MockDetector {
            candidates: vec![None, Some(Point::new(3, 4))].into_iter(),
        };
        let mut pipeline = BallPipeline::with_default_config(detector);

        let first = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(first.frame, 0);
        assert_eq!(first.output, TrackOutput::HIDDEN);

        let second = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(second.frame, 1);
        assert_eq!(second.candidate, Some(Point::new(3, 4)));
        // One detection is not enough to initialize.
        assert!(!second.output.visible);
        assert_eq!(pipeline.frames_processed(), 2);
    }
}
