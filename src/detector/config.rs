use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive 8-bit HSV bounds, OpenCV convention (hue in `[0, 180]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Low saturation, high value: a white ball.
    pub const WHITE: HsvRange = HsvRange {
        lower: [0, 0, 170],
        upper: [180, 60, 255],
    };

    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parameters of the adaptive Gaussian-mixture background model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Frames over which the learning rate settles.
    pub history: u32,
    /// Squared Mahalanobis distance below which a pixel is background.
    pub var_threshold: f32,
    /// Gaussian components per pixel.
    pub max_modes: usize,
    /// Cumulative weight of the modes considered background.
    pub background_ratio: f32,
    /// Squared Mahalanobis distance for a sample to update an existing mode.
    pub var_threshold_gen: f32,
    pub var_init: f32,
    pub var_min: f32,
    pub var_max: f32,
    /// Weight prior that prunes modes nothing supports.
    pub complexity_reduction: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            history: 500,
            var_threshold: 50.0,
            max_modes: 5,
            background_ratio: 0.9,
            var_threshold_gen: 9.0,
            var_init: 15.0,
            var_min: 4.0,
            var_max: 75.0,
            complexity_reduction: 0.05,
        }
    }
}

/// Configuration for the BallDetector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub min_area: f64,
    pub max_area: f64,
    pub min_circularity: f64,
    /// Weight of the area penalty in the selection score.
    pub area_penalty: f64,
    pub background: BackgroundConfig,
    pub color: HsvRange,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_area: 30.0,
            max_area: 180.0,
            min_circularity: 0.65,
            area_penalty: 0.002,
            background: BackgroundConfig::default(),
            color: HsvRange::WHITE,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_area < 0.0 || self.min_area > self.max_area {
            return Err(ConfigError::Invalid(format!(
                "area window [{}, {}] is empty",
                self.min_area, self.max_area
            )));
        }
        if !(0.0..=1.0).contains(&self.min_circularity) {
            return Err(ConfigError::Invalid(format!(
                "min_circularity must lie in [0, 1], got {}",
                self.min_circularity
            )));
        }
        let bg = &self.background;
        if bg.history == 0 || bg.max_modes == 0 || bg.max_modes > u8::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "background history ({}) and max_modes ({}) are out of range",
                bg.history, bg.max_modes
            )));
        }
        if !(bg.var_min > 0.0) || bg.var_min > bg.var_max {
            return Err(ConfigError::Invalid(format!(
                "background variance bounds [{}, {}] are invalid",
                bg.var_min, bg.var_max
            )));
        }
        if (0..3).any(|i| self.color.lower[i] > self.color.upper[i]) {
            return Err(ConfigError::Invalid(format!(
                "color range {:?} has a lower bound above its upper bound",
                self.color
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_area_window_rejected() {
        let config = DetectorConfig {
            min_area: 200.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_white_range() {
        assert!(HsvRange::WHITE.contains([90, 10, 240]));
        assert!(!HsvRange::WHITE.contains([90, 61, 240]));
        assert!(!HsvRange::WHITE.contains([90, 10, 169]));
    }
}
