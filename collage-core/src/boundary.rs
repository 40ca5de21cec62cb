//! Heart silhouette at a given container scale.
//!
//! The shape is the implicit curve `(x² + y² - 1)³ - x²y³ = 0` in a normalized
//! frame centered on the heart. A point is inside when the left-hand side is at
//! most `tolerance`: zero traces the true outline, larger values fatten the
//! lobes and the cusp so more of the container becomes usable, and negative
//! values (down to -1, the level at the center) shrink it.

use crate::constants::{CENTER_Y_DIVISOR, MIN_TOLERANCE, SHAPE_DIVISOR};
use crate::error::LayoutError;
use crate::geometry::{Point, Rect};

/// Default corner inset used by [`HeartBoundary::rect_fully_inside`].
pub const DEFAULT_CORNER_INSET: f64 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct HeartBoundary {
    container_size: f64,
    tolerance: f64,
    corner_inset: f64,
    center: Point,
    unit: f64,
}

impl HeartBoundary {
    pub fn new(container_size: f64, tolerance: f64) -> Result<Self, LayoutError> {
        if !container_size.is_finite() || container_size <= 0.0 {
            return Err(LayoutError::InvalidScale(format!(
                "container size must be positive, got {container_size}"
            )));
        }
        if !tolerance.is_finite() || tolerance < MIN_TOLERANCE {
            return Err(LayoutError::Configuration(format!(
                "boundary tolerance must be at least {MIN_TOLERANCE}, got {tolerance}"
            )));
        }
        Ok(HeartBoundary {
            container_size,
            tolerance,
            corner_inset: DEFAULT_CORNER_INSET,
            center: Point {
                x: container_size / 2.0,
                y: container_size / CENTER_Y_DIVISOR,
            },
            unit: container_size / SHAPE_DIVISOR,
        })
    }

    /// Sample rectangles at `inset` / `1 - inset` of each axis instead of the
    /// literal corners.
    pub fn with_corner_inset(mut self, inset: f64) -> Result<Self, LayoutError> {
        if !(0.0..0.5).contains(&inset) {
            return Err(LayoutError::Configuration(format!(
                "corner inset must lie in [0, 0.5), got {inset}"
            )));
        }
        self.corner_inset = inset;
        Ok(self)
    }

    pub fn container_size(&self) -> f64 {
        self.container_size
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn corner_inset(&self) -> f64 {
        self.corner_inset
    }

    /// Center of the heart in container pixels.
    pub fn center(&self) -> Point {
        self.center
    }

    fn normalize(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.center.x) / self.unit,
            (self.center.y - p.y) / self.unit,
        )
    }

    fn from_normalized(&self, nx: f64, ny: f64) -> Point {
        Point {
            x: self.center.x + nx * self.unit,
            y: self.center.y - ny * self.unit,
        }
    }

    fn field(nx: f64, ny: f64) -> f64 {
        let r2 = nx * nx + ny * ny - 1.0;
        r2 * r2 * r2 - nx * nx * ny * ny * ny
    }

    /// Value of the heart inequality at `p`; negative deep inside.
    pub fn level(&self, p: Point) -> f64 {
        let (nx, ny) = self.normalize(p);
        Self::field(nx, ny)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.level(p) <= self.tolerance
    }

    /// Corner-sampled containment: the four inset corners must all be inside.
    /// Lets a rectangle whose literal corner pokes past a concave part of the
    /// outline through as long as its visual mass is inside.
    pub fn rect_fully_inside(&self, rect: &Rect) -> bool {
        let lo = self.corner_inset;
        let hi = 1.0 - self.corner_inset;
        [(lo, lo), (hi, lo), (hi, hi), (lo, hi)]
            .into_iter()
            .all(|(fx, fy)| self.contains(rect.at_fraction(fx, fy)))
    }

    /// Trace the outline at the current tolerance as a closed polygon with
    /// `samples` vertices, walking rays out of the heart center.
    pub fn outline(&self, samples: usize) -> Vec<Point> {
        const STEP: f64 = 0.005;
        const MAX_RADIUS: f64 = 4.0;
        let samples = samples.max(3);
        let mut out = Vec::with_capacity(samples);
        for i in 0..samples {
            let ang = (i as f64) * 2.0 * std::f64::consts::PI / (samples as f64);
            let (s, c) = ang.sin_cos();
            let outside = |r: f64| Self::field(r * c, r * s) > self.tolerance;
            // march to the first crossing, then bisect it down
            let mut hi = STEP;
            while hi < MAX_RADIUS && !outside(hi) {
                hi += STEP;
            }
            let mut lo = (hi - STEP).max(0.0);
            for _ in 0..40 {
                let mid = (lo + hi) / 2.0;
                if outside(mid) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            out.push(self.from_normalized(lo * c, lo * s));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart(size: f64) -> HeartBoundary {
        HeartBoundary::new(size, 1.0).unwrap()
    }

    #[test]
    fn test_center_is_inside_at_every_tier() {
        for size in [320.0, 400.0, 600.0, 1.0, 12345.0] {
            let b = heart(size);
            assert!(b.contains(b.center()), "center outside at {size}");
        }
    }

    #[test]
    fn test_container_corners_and_below_cusp_are_outside() {
        let b = heart(600.0);
        assert!(!b.contains(Point::new(0.0, 0.0)));
        assert!(!b.contains(Point::new(599.0, 599.0)));
        assert!(!b.contains(Point::new(300.0, 590.0)));
    }

    #[test]
    fn test_tolerance_widens_the_shape() {
        let p = Point::new(300.0, 560.0);
        assert!(!heart(600.0).contains(p));
        assert!(HeartBoundary::new(600.0, 5.0).unwrap().contains(p));
    }

    #[test]
    fn test_negative_tolerance_shrinks_the_shape() {
        let tight = HeartBoundary::new(600.0, -0.5).unwrap();
        assert!(tight.contains(tight.center()));
        // inside the true outline but above the tighter level
        let p = Point::new(300.0, 440.0);
        assert!(heart(600.0).contains(p));
        assert!(!tight.contains(p));
        let floor = HeartBoundary::new(600.0, -1.0).unwrap();
        assert!(floor.contains(floor.center()));
    }

    #[test]
    fn test_rect_accepted_by_inset_corners() {
        let b = heart(600.0);
        // the lower literal corners of a 400px square on the center fall outside,
        // the 20%/80% samples do not
        let r = Rect::centered(b.center(), 400.0);
        assert!(!b.contains(Point::new(r.x, r.bottom())));
        assert!(b.rect_fully_inside(&r));
        let strict = b.clone().with_corner_inset(0.0).unwrap();
        assert!(!strict.rect_fully_inside(&r));
    }

    #[test]
    fn test_invalid_scale_fails_fast() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                HeartBoundary::new(bad, 1.0),
                Err(LayoutError::InvalidScale(_))
            ));
        }
        assert!(matches!(
            HeartBoundary::new(600.0, -1.5),
            Err(LayoutError::Configuration(_))
        ));
        assert!(HeartBoundary::new(600.0, f64::NAN).is_err());
        assert!(heart(600.0).with_corner_inset(0.5).is_err());
    }

    #[test]
    fn test_outline_sits_on_the_tolerance_level() {
        let b = heart(600.0);
        let pts = b.outline(64);
        assert_eq!(pts.len(), 64);
        for p in pts {
            assert!((b.level(p) - b.tolerance()).abs() < 1e-3, "{p:?}");
        }
    }
}
