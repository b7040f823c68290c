// src/utils/geometry.rs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(&self, factor: f64) -> Point2D {
        Point2D::new(self.x * factor, self.y * factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub start: Point2D,
    pub end: Point2D,
}

impl Line2D {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn scaled(&self, factor: f64) -> Line2D {
        Line2D::new(self.start.scaled(factor), self.end.scaled(factor))
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_line_bounds() {
        let line = Line2D::new(Point2D::new(10.0, 5.0), Point2D::new(0.0, 5.0));
        assert_eq!(line.bounds(), (0.0, 5.0, 10.0, 5.0));
        assert_eq!(line.scaled(2.0).bounds(), (0.0, 10.0, 20.0, 10.0));
    }
}
