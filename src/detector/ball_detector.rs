//! Motion + color + shape ball detector.

use image::{GrayImage, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, open};
use tracing::debug;

use crate::detector::background::BackgroundModel;
use crate::detector::blob::{self, BlobStats};
use crate::detector::color;
use crate::detector::config::DetectorConfig;
use crate::error::{ConfigError, DetectorError};
use crate::tracker::{Candidate, Point};

/// Best blob found in a frame, with the score it won on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredBlob {
    pub centroid: Point,
    pub area: f64,
    pub circularity: f64,
    pub score: f64,
}

/// Detects a single small, bright, round, moving blob per frame.
///
/// The detector owns a background model that accumulates over the whole
/// stream; use one instance per video.
#[derive(Debug, Clone)]
pub struct BallDetector {
    config: DetectorConfig,
    background: BackgroundModel,
}

impl BallDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let background = BackgroundModel::new(config.background.clone());
        Ok(Self { config, background })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    /// Centroid of the best ball-like blob in `frame`, if any.
    pub fn detect_image(&mut self, frame: &RgbImage) -> Result<Candidate, DetectorError> {
        Ok(self.detect_scored(frame)?.map(|b| b.centroid))
    }

    /// Like [`detect_image`](Self::detect_image), keeping the winning blob's statistics.
    pub fn detect_scored(&mut self, frame: &RgbImage) -> Result<Option<ScoredBlob>, DetectorError> {
        let mask = self.ball_mask(frame)?;
        Ok(self.best_blob(&mask))
    }

    /// Pixels that are both moving and ball-colored.
    pub fn ball_mask(&mut self, frame: &RgbImage) -> Result<GrayImage, DetectorError> {
        let motion = self.background.apply(frame)?;
        let motion = open(&motion, Norm::L1, 1);
        let motion = dilate(&motion, Norm::L1, 1);

        let mut fused = color::in_range(frame, &self.config.color);
        for (out, m) in fused.pixels_mut().zip(motion.pixels()) {
            out.0[0] &= m.0[0];
        }
        Ok(fused)
    }

    fn best_blob(&self, mask: &GrayImage) -> Option<ScoredBlob> {
        let contours = find_contours::<i32>(mask);
        let mut best: Option<ScoredBlob> = None;
        let mut best_score = 0.0;
        let mut considered = 0usize;

        for contour in contours
            .iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        {
            considered += 1;
            let stats = BlobStats::from_contour(&contour.points);
            if stats.area < self.config.min_area || stats.area > self.config.max_area {
                continue;
            }
            let Some(circularity) = stats.circularity() else {
                continue;
            };
            if circularity < self.config.min_circularity {
                continue;
            }
            let Some(centroid) = stats.centroid() else {
                continue;
            };

            let score = blob::score(circularity, stats.area, self.config.area_penalty);
            if score > best_score {
                best_score = score;
                best = Some(ScoredBlob {
                    centroid,
                    area: stats.area,
                    circularity,
                    score,
                });
            }
        }

        debug!(
            frame = self.background.frames_seen(),
            contours = considered,
            best = ?best.map(|b| (b.centroid.x, b.centroid.y, b.score)),
            "detection"
        );
        best
    }
}

impl Default for BallDetector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        let background = BackgroundModel::new(config.background.clone());
        Self { config, background }
    }
}

/// Wrap a tightly packed RGB buffer as an image, checking its size.
pub fn frame_from_raw(input: &[u8], width: u32, height: u32) -> Result<RgbImage, DetectorError> {
    if width == 0 || height == 0 {
        return Err(DetectorError::EmptyFrame { width, height });
    }
    let expected = width as usize * height as usize * 3;
    if input.len() != expected {
        return Err(DetectorError::BufferSizeMismatch {
            expected,
            got: input.len(),
        });
    }
    RgbImage::from_raw(width, height, input.to_vec()).ok_or(DetectorError::BufferSizeMismatch {
        expected,
        got: input.len(),
    })
}
