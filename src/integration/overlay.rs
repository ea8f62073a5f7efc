//! Trajectory overlay drawing.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::integration::Trajectory;
use crate::tracker::TrackOutput;

#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub point_color: Rgb<u8>,
    pub point_radius: i32,
    pub line_color: Rgb<u8>,
    pub line_thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            point_color: Rgb([0, 255, 0]),
            point_radius: 4,
            line_color: Rgb([0, 0, 255]),
            line_thickness: 2,
        }
    }
}

/// Draw the current position and the visible trajectory onto `frame`.
pub fn draw_overlay(
    frame: &mut RgbImage,
    output: &TrackOutput,
    trajectory: &Trajectory,
    style: &OverlayStyle,
) {
    if let Some(p) = output.point() {
        draw_filled_circle_mut(frame, (p.x, p.y), style.point_radius, style.point_color);
    }

    let thickness = style.line_thickness.max(1) as i32;
    for (a, b) in trajectory.segments() {
        let (ax, ay, bx, by) = (a.x as f32, a.y as f32, b.x as f32, b.y as f32);
        // Thick lines as parallel offsets along the minor axis.
        let horizontal = (bx - ax).abs() >= (by - ay).abs();
        for i in 0..thickness {
            let offset = (i - thickness / 2) as f32;
            let (dx, dy) = if horizontal { (0.0, offset) } else { (offset, 0.0) };
            draw_line_segment_mut(
                frame,
                (ax + dx, ay + dy),
                (bx + dx, by + dy),
                style.line_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Point;

    #[test]
    fn test_draws_point_and_line() {
        let mut frame = RgbImage::new(40, 40);
        let mut trajectory = Trajectory::new();
        let outputs = [
            TrackOutput::visible_at(Point::new(5, 20)),
            TrackOutput::visible_at(Point::new(30, 20)),
        ];
        for o in &outputs {
            trajectory.push(o);
        }
        let style = OverlayStyle::default();
        draw_overlay(&mut frame, &outputs[1], &trajectory, &style);

        assert_eq!(*frame.get_pixel(15, 20), style.line_color);
        // The point is drawn first, so the line covers its center.
        assert_eq!(*frame.get_pixel(30, 23), style.point_color);
    }

    #[test]
    fn test_hidden_output_draws_nothing() {
        let mut frame = RgbImage::new(10, 10);
        draw_overlay(
            &mut frame,
            &TrackOutput::HIDDEN,
            &Trajectory::new(),
            &OverlayStyle::default(),
        );
        assert!(frame.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
