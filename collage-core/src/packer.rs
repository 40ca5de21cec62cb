//! Greedy, backtracking-free packing of size-classed slots onto candidates.

use tracing::debug;

use crate::boundary::HeartBoundary;
use crate::constants::{BASE_STACK_ORDER, CENTER_STACK_ORDER};
use crate::geometry::{Point, Rect};
use crate::layout::PlacedRect;
use crate::size_class::SizeClass;

/// Place each item on the first candidate that keeps it inside the container,
/// inside the heart and at least `margin` away from everything placed so far.
///
/// Items go largest first since they have the fewest feasible anchors. An
/// item with no surviving candidate is dropped, so the output can be shorter
/// than `items`. `item_index` is the placement order. The slot nearest the
/// heart center is pinned above the others.
pub fn pack(
    boundary: &HeartBoundary,
    items: &[SizeClass],
    candidates: &[Point],
    margin: f64,
) -> Vec<PlacedRect> {
    let size = boundary.container_size();
    let mut order: Vec<SizeClass> = items.to_vec();
    // stable, so equal classes keep draw order
    order.sort_by(|a, b| b.base_fraction().total_cmp(&a.base_fraction()));

    let mut placed: Vec<PlacedRect> = Vec::with_capacity(order.len());
    for (draw, class) in order.into_iter().enumerate() {
        let edge = class.edge(size);
        let hit = candidates.iter().find_map(|c| {
            let rect = Rect::centered(*c, edge);
            if !rect.within_square(size) || !boundary.rect_fully_inside(&rect) {
                return None;
            }
            if placed.iter().any(|p| p.rect().overlaps(&rect, margin)) {
                return None;
            }
            Some(rect)
        });
        match hit {
            Some(rect) => placed.push(PlacedRect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                size_class: class,
                item_index: placed.len(),
                stack_order: BASE_STACK_ORDER,
            }),
            None => debug!(draw, class = class.name(), edge, "no feasible candidate, dropping"),
        }
    }

    let center = boundary.center();
    if let Some(pinned) = placed.iter_mut().min_by(|a, b| {
        a.center()
            .distance_sq(center)
            .total_cmp(&b.center().distance_sq(center))
    }) {
        pinned.stack_order = CENTER_STACK_ORDER;
    }
    placed
}

/// Whether `rects` would have come out of [`pack`]: each inside the container
/// and the heart, and no two closer than `margin`.
pub fn layout_fits(boundary: &HeartBoundary, rects: &[PlacedRect], margin: f64) -> bool {
    let size = boundary.container_size();
    rects.iter().enumerate().all(|(i, a)| {
        let r = a.rect();
        r.within_square(size)
            && boundary.rect_fully_inside(&r)
            && rects[i + 1..]
                .iter()
                .all(|b| !r.overlaps(&b.rect(), margin))
    })
}
