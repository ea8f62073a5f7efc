//! Per-pixel adaptive Gaussian-mixture background model.
//!
//! Each pixel keeps up to `max_modes` isotropic RGB Gaussians sorted by
//! weight. A sample is background when it falls within `var_threshold`
//! squared Mahalanobis distance of one of the heaviest modes whose cumulative
//! weight stays under `background_ratio`. Modes are updated with a learning
//! rate of `1 / min(2 * n, history)` and pruned by a Dirichlet prior so the
//! number of modes adapts per pixel. Shadow detection is not performed.

use image::{GrayImage, Luma, RgbImage};

use crate::detector::config::BackgroundConfig;
use crate::error::DetectorError;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

#[derive(Debug, Clone, Copy, Default)]
struct Gaussian {
    weight: f32,
    mean: [f32; 3],
    variance: f32,
}

#[derive(Debug, Clone)]
pub struct BackgroundModel {
    config: BackgroundConfig,
    width: u32,
    height: u32,
    modes: Vec<Gaussian>,
    modes_used: Vec<u8>,
    frames_seen: u64,
}

impl BackgroundModel {
    pub fn new(config: BackgroundConfig) -> Self {
        Self {
            config,
            width: 0,
            height: 0,
            modes: Vec::new(),
            modes_used: Vec::new(),
            frames_seen: 0,
        }
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    /// Frames absorbed into the model so far.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Frame size the model was built on, once the first frame arrived.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        (self.frames_seen > 0).then_some((self.width, self.height))
    }

    /// Learning rate applied to the next frame.
    pub fn learning_rate(&self) -> f32 {
        let n = (2 * (self.frames_seen + 1)).min(self.config.history as u64);
        1.0 / n as f32
    }

    /// Update the model with `frame` and return its foreground mask.
    pub fn apply(&mut self, frame: &RgbImage) -> Result<GrayImage, DetectorError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectorError::EmptyFrame { width, height });
        }
        match self.dimensions() {
            None => self.allocate(width, height),
            Some(expected) if expected != (width, height) => {
                return Err(DetectorError::FrameSizeChanged {
                    expected,
                    got: (width, height),
                });
            }
            Some(_) => {}
        }

        let alpha = self.learning_rate();
        let max_modes = self.config.max_modes;
        let mut mask = GrayImage::new(width, height);

        for (idx, (x, y, pixel)) in frame.enumerate_pixels().enumerate() {
            let [r, g, b] = pixel.0;
            let sample = [r as f32, g as f32, b as f32];
            let slot = &mut self.modes[idx * max_modes..(idx + 1) * max_modes];
            let used = &mut self.modes_used[idx];
            let is_background = update_pixel(&self.config, alpha, slot, used, sample);
            mask.put_pixel(
                x,
                y,
                Luma([if is_background { BACKGROUND } else { FOREGROUND }]),
            );
        }

        self.frames_seen += 1;
        Ok(mask)
    }

    fn allocate(&mut self, width: u32, height: u32) {
        let pixels = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.modes = vec![Gaussian::default(); pixels * self.config.max_modes];
        self.modes_used = vec![0; pixels];
    }
}

/// Update one pixel's mixture with `sample`; returns whether it is background.
fn update_pixel(
    config: &BackgroundConfig,
    alpha: f32,
    modes: &mut [Gaussian],
    used: &mut u8,
    sample: [f32; 3],
) -> bool {
    let prune = -alpha * config.complexity_reduction;
    let mut n = *used as usize;
    let mut background = false;
    let mut fits = false;
    let mut cumulative = 0.0f32;

    let mut mode = 0;
    while mode < n {
        let mut weight = (1.0 - alpha) * modes[mode].weight + prune;
        let mut slot = mode;

        if !fits {
            let g = modes[mode];
            let diff = [
                g.mean[0] - sample[0],
                g.mean[1] - sample[1],
                g.mean[2] - sample[2],
            ];
            let dist2 = diff[0] * diff[0] + diff[1] * diff[1] + diff[2] * diff[2];

            if cumulative < config.background_ratio && dist2 < config.var_threshold * g.variance {
                background = true;
            }

            if dist2 < config.var_threshold_gen * g.variance {
                fits = true;
                weight += alpha;
                let k = alpha / weight;
                let g = &mut modes[mode];
                for c in 0..3 {
                    g.mean[c] -= k * diff[c];
                }
                g.variance = (g.variance + k * (dist2 - g.variance))
                    .clamp(config.var_min, config.var_max);

                // Keep modes ordered by weight.
                while slot > 0 && weight >= modes[slot - 1].weight {
                    modes.swap(slot, slot - 1);
                    slot -= 1;
                }
            }
        }

        if weight < -prune {
            // Unsupported mode: drop it and shift the tail down.
            modes[slot..n].rotate_left(1);
            n -= 1;
            continue;
        }

        modes[slot].weight = weight;
        cumulative += weight;
        mode += 1;
    }

    if cumulative > 0.0 {
        for g in modes[..n].iter_mut() {
            g.weight /= cumulative;
        }
    }

    if !fits {
        let slot = if n == modes.len() { n - 1 } else { n };
        if slot == n {
            n += 1;
        }
        if n == 1 {
            modes[slot].weight = 1.0;
        } else {
            modes[slot].weight = alpha;
            for g in modes[..slot].iter_mut() {
                g.weight *= 1.0 - alpha;
            }
        }
        modes[slot].mean = sample;
        modes[slot].variance = config.var_init;

        let mut slot = slot;
        while slot > 0 && alpha > modes[slot - 1].weight {
            modes.swap(slot, slot - 1);
            slot -= 1;
        }
    }

    *used = n as u8;
    background
}
