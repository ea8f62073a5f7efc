//! Shape statistics of a closed contour.

use std::f64::consts::PI;

use imageproc::geometry::arc_length;
use imageproc::point::Point as ContourPoint;

use crate::tracker::Point;

/// Spatial moments of the polygon traced by a contour (Green's theorem).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn from_contour(points: &[ContourPoint<i32>]) -> Self {
        let mut m = Moments::default();
        if points.len() < 3 {
            return m;
        }
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            let (x0, y0, x1, y1) = (p.x as f64, p.y as f64, q.x as f64, q.y as f64);
            let cross = x0 * y1 - x1 * y0;
            m.m00 += cross;
            m.m10 += (x0 + x1) * cross;
            m.m01 += (y0 + y1) * cross;
        }
        m.m00 /= 2.0;
        m.m10 /= 6.0;
        m.m01 /= 6.0;
        m
    }

    /// Centroid `(m10 / m00, m01 / m00)`, or `None` for a zero-mass polygon.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Area, perimeter and circularity of one blob outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobStats {
    pub area: f64,
    pub perimeter: f64,
    pub moments: Moments,
}

impl BlobStats {
    pub fn from_contour(points: &[ContourPoint<i32>]) -> Self {
        let moments = Moments::from_contour(points);
        let perimeter = if points.len() < 2 {
            0.0
        } else {
            arc_length(points, true)
        };
        Self {
            area: moments.m00.abs(),
            perimeter,
            moments,
        }
    }

    /// `4π·area / perimeter²`, 1 for a perfect circle. `None` for a zero perimeter.
    pub fn circularity(&self) -> Option<f64> {
        (self.perimeter > 0.0).then(|| 4.0 * PI * self.area / (self.perimeter * self.perimeter))
    }

    pub fn centroid(&self) -> Option<Point> {
        self.moments
            .centroid()
            .map(|(x, y)| Point::from_f64(x, y))
    }
}

/// Selection score favoring small, highly circular blobs.
#[inline]
pub fn score(circularity: f64, area: f64, area_penalty: f64) -> f64 {
    circularity - area_penalty * area
}
