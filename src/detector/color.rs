//! 8-bit HSV conversion and color thresholding.

use image::{GrayImage, Luma, RgbImage};

use crate::detector::config::HsvRange;

/// Convert an RGB pixel to 8-bit HSV: hue in `[0, 180)`, saturation and value in `[0, 255]`.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == 0 {
        return [0, 0, 0];
    }

    let delta = (max - min) as f32;
    let s = (delta * 255.0 / max as f32).round() as u8;
    if delta == 0.0 {
        return [0, s, v];
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let mut h = if max == r {
        60.0 * (gf - bf) / delta
    } else if max == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h = (h / 2.0).round() as u8;
    [if h >= 180 { h - 180 } else { h }, s, v]
}

/// Binary mask of pixels whose HSV value lies in `range` (255 inside, 0 outside).
pub fn in_range(frame: &RgbImage, range: &HsvRange) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let hsv = rgb_to_hsv(frame.get_pixel(x, y).0);
        Luma([if range.contains(hsv) { 255 } else { 0 }])
    })
}
