/// Integer pixel position of a ball candidate or a reported track position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a sub-pixel position to the nearest pixel.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    /// Squared Euclidean distance to a sub-pixel position.
    #[inline]
    pub fn distance_sq_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x as f64 - x;
        let dy = self.y as f64 - y;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Detector output for one frame: the best ball-like blob, or nothing.
pub type Candidate = Option<Point>;

/// Per-frame tracker report.
///
/// `(-1, -1, false)` is the sentinel for "no position reported".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOutput {
    pub x: i32,
    pub y: i32,
    pub visible: bool,
}

impl TrackOutput {
    pub const HIDDEN: TrackOutput = TrackOutput {
        x: -1,
        y: -1,
        visible: false,
    };

    #[inline]
    pub fn visible_at(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            visible: true,
        }
    }

    /// The reported position, if visible.
    #[inline]
    pub fn point(&self) -> Option<Point> {
        self.visible.then(|| Point::new(self.x, self.y))
    }
}

impl Default for TrackOutput {
    fn default() -> Self {
        Self::HIDDEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(Point::from_f64(10.4, 20.6), Point::new(10, 21));
        assert_eq!(Point::from_f64(-0.4, 0.5), Point::new(0, 1));
    }

    #[test]
    fn test_distance_sq() {
        let p = Point::new(3, 4);
        assert_eq!(p.distance_sq_to(0.0, 0.0), 25.0);
    }

    #[test]
    fn test_hidden_has_no_point() {
        assert_eq!(TrackOutput::HIDDEN.point(), None);
        assert_eq!(
            TrackOutput::visible_at(Point::new(1, 2)).point(),
            Some(Point::new(1, 2))
        );
    }
}
