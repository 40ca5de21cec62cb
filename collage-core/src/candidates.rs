//! Anchor points for photo slots.
//!
//! Two sources: a grid scan filtered through the heart boundary (variable
//! count, used by the packer), and a fixed template of hand-placed anchors
//! that already carry a size and bypass packing.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::boundary::HeartBoundary;
use crate::constants::{BASE_STACK_ORDER, CENTER_STACK_ORDER};
use crate::geometry::{Point, Rect};
use crate::layout::PlacedRect;
use crate::size_class::SizeClass;

/// Overlay a `resolution x resolution` grid on the container, keep the cell
/// centers inside the heart and shuffle them so scan order carries no bias.
pub fn grid_candidates<R: Rng + ?Sized>(
    boundary: &HeartBoundary,
    resolution: usize,
    rng: &mut R,
) -> Vec<Point> {
    let size = boundary.container_size();
    let cell = size / resolution.max(1) as f64;
    let mut pts = Vec::new();
    for row in 0..resolution {
        for col in 0..resolution {
            let p = Point {
                x: (col as f64 + 0.5) * cell,
                y: (row as f64 + 0.5) * cell,
            };
            if boundary.contains(p) {
                pts.push(p);
            }
        }
    }
    pts.shuffle(rng);
    debug!(candidates = pts.len(), resolution, size, "grid scan candidates");
    pts
}

/// Normalized anchor: center at `(rx, ry)` and edge `rw`, all fractions of the
/// container edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub rx: f64,
    pub ry: f64,
    pub rw: f64,
}

const fn anchor(rx: f64, ry: f64, rw: f64) -> Anchor {
    Anchor { rx, ry, rw }
}

/// Hand-placed slots tracing the heart, mirrored about the vertical axis.
/// Index 0 is the centerpiece. Every tier keeps at least 9px between slots
/// and every slot passes the inset-corner test at tolerance 1.
pub const HEART_TEMPLATE: [Anchor; 20] = [
    anchor(0.50, 0.45, 0.22), // center
    anchor(0.28, 0.45, 0.16), // inner left
    anchor(0.72, 0.45, 0.16), // inner right
    anchor(0.40, 0.23, 0.16), // upper left
    anchor(0.60, 0.23, 0.16), // upper right
    anchor(0.41, 0.66, 0.14),
    anchor(0.59, 0.66, 0.14),
    anchor(0.24, 0.63, 0.14),
    anchor(0.76, 0.63, 0.14),
    anchor(0.23, 0.28, 0.12),
    anchor(0.77, 0.28, 0.12),
    anchor(0.105, 0.45, 0.12), // left edge
    anchor(0.895, 0.45, 0.12), // right edge
    anchor(0.43, 0.07, 0.10), // dip
    anchor(0.57, 0.07, 0.10),
    anchor(0.24, 0.14, 0.10), // left lobe
    anchor(0.76, 0.14, 0.10), // right lobe
    anchor(0.09, 0.31, 0.10),
    anchor(0.91, 0.31, 0.10),
    anchor(0.50, 0.83, 0.12), // tip
];

/// Map the first `requested` template anchors to pixels. Pure scalar
/// multiplication, so equal inputs always give bit-identical output.
pub fn template_layout(container_size: f64, requested: usize) -> Vec<PlacedRect> {
    HEART_TEMPLATE
        .iter()
        .take(requested)
        .enumerate()
        .map(|(i, a)| {
            let edge = container_size * a.rw;
            let rect = Rect::centered(
                Point {
                    x: a.rx * container_size,
                    y: a.ry * container_size,
                },
                edge,
            );
            PlacedRect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                size_class: SizeClass::nearest(a.rw),
                item_index: i,
                stack_order: if i == 0 {
                    CENTER_STACK_ORDER
                } else {
                    BASE_STACK_ORDER
                },
            }
        })
        .collect()
}
