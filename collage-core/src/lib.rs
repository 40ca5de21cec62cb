//! Heart-shaped photo collage layout engine.
//!
//! Given a viewport width and a number of photo slots, the engine picks a
//! discrete container size, builds the heart silhouette at that scale and
//! returns one rectangle per slot it managed to place. Two strategies exist:
//! a randomized grid scan with greedy packing, and a fixed hand-tuned template.

pub mod boundary;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod packer;
pub mod scaler;
pub mod session;
pub mod size_class;

pub use boundary::HeartBoundary;
pub use candidates::{Anchor, HEART_TEMPLATE, grid_candidates, template_layout};
pub use config::{ContainerTier, LayoutConfig, Strategy};
pub use error::LayoutError;
pub use geometry::{Point, Rect};
pub use layout::{LayoutResult, PlacedRect};
pub use packer::{layout_fits, pack};
pub use scaler::{LayoutScaler, css_variables};
pub use session::LayoutSession;
pub use size_class::{SizeClass, SizeClassifier, SizeWeights};

pub fn slot_color(i: usize) -> String {
    // Warm palette that reads well on a light background.
    // Colors are stable and cycle by index%12.
    const PALETTE: [&str; 12] = [
        "crimson",         // 0
        "hotpink",         // 1
        "lightcoral",      // 2
        "palevioletred",   // 3
        "salmon",          // 4
        "orchid",          // 5
        "deeppink",        // 6
        "indianred",       // 7
        "mediumvioletred", // 8
        "lightpink",       // 9
        "tomato",          // 10
        "plum",            // 11
    ];
    PALETTE[i % PALETTE.len()].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_colors_cycle() {
        assert_eq!(slot_color(0), "crimson");
        assert_eq!(slot_color(12), slot_color(0));
        assert_ne!(slot_color(1), slot_color(2));
    }
}
