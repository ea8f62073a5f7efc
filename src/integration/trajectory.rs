use crate::tracker::{Point, TrackOutput};

/// Visibility-contiguous run of reported positions.
///
/// Positions are appended while the tracker reports the ball as visible; the
/// run is cleared on the first invisible frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, output: &TrackOutput) {
        match output.point() {
            Some(p) => self.points.push(p),
            None => self.points.clear(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_on_invisible() {
        let mut t = Trajectory::new();
        t.push(&TrackOutput::visible_at(Point::new(1, 1)));
        t.push(&TrackOutput::visible_at(Point::new(2, 1)));
        t.push(&TrackOutput::visible_at(Point::new(3, 1)));
        assert_eq!(t.len(), 3);
        assert_eq!(t.segments().count(), 2);

        t.push(&TrackOutput::HIDDEN);
        assert!(t.is_empty());

        t.push(&TrackOutput::visible_at(Point::new(9, 9)));
        assert_eq!(t.points(), &[Point::new(9, 9)]);
        assert_eq!(t.segments().count(), 0);
    }
}
