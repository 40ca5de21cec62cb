use serde::{Deserialize, Serialize};

/// Point in container-local pixels, y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of edge `edge` centered on `c`.
    pub fn centered(c: Point, edge: f64) -> Self {
        Rect {
            x: c.x - edge / 2.0,
            y: c.y - edge / 2.0,
            width: edge,
            height: edge,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Point at fractional offsets `(fx, fy)` of the rectangle, `(0, 0)` being top-left.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> Point {
        Point {
            x: self.x + self.width * fx,
            y: self.y + self.height * fy,
        }
    }

    /// True when the rectangle lies within `[0, size] x [0, size]`.
    pub fn within_square(&self, size: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= size && self.bottom() <= size
    }

    /// True when the two rectangles are closer than `margin` on both axes.
    ///
    /// A gap of exactly `margin` is allowed, which is the same as saying the
    /// rectangles do not intersect once each is grown by `margin / 2` per side.
    pub fn overlaps(&self, other: &Rect, margin: f64) -> bool {
        self.x < other.right() + margin
            && other.x < self.right() + margin
            && self.y < other.bottom() + margin
            && other.y < self.bottom() + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_round_trips_center() {
        let r = Rect::centered(Point::new(100.0, 50.0), 40.0);
        assert_eq!(r, Rect::new(80.0, 30.0, 40.0, 40.0));
        assert_eq!(r.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_overlap_respects_margin() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(18.0, 0.0, 10.0, 10.0);
        // gap of 8 is exactly the margin
        assert!(!a.overlaps(&touching, 8.0));
        assert!(a.overlaps(&touching, 8.5));
        // far apart vertically even though x ranges overlap
        let below = Rect::new(5.0, 30.0, 10.0, 10.0);
        assert!(!a.overlaps(&below, 8.0));
        assert!(a.overlaps(&a, 0.0));
    }

    #[test]
    fn test_within_square() {
        assert!(Rect::new(0.0, 0.0, 600.0, 600.0).within_square(600.0));
        assert!(!Rect::new(-0.5, 10.0, 20.0, 20.0).within_square(600.0));
        assert!(!Rect::new(590.0, 10.0, 20.0, 20.0).within_square(600.0));
    }

    #[test]
    fn test_at_fraction() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.at_fraction(0.2, 0.8), Point::new(30.0, 60.0));
    }
}
