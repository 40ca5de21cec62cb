use serde::{Deserialize, Serialize};

use crate::config::Strategy;
use crate::geometry::{Point, Rect};
use crate::size_class::SizeClass;

/// A photo slot as handed to the presentation layer.
///
/// `item_index` is the identity the presentation layer binds a photo to;
/// `stack_order` is the paint order (higher draws on top).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub size_class: SizeClass,
    pub item_index: usize,
    pub stack_order: i32,
}

impl PlacedRect {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// Outcome of one layout pass. Always replaced wholesale, never patched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub container_size: f64,
    pub requested: usize,
    pub strategy: Strategy,
    pub rects: Vec<PlacedRect>,
}

impl LayoutResult {
    pub fn empty(container_size: f64, requested: usize, strategy: Strategy) -> Self {
        LayoutResult {
            container_size,
            requested,
            strategy,
            rects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Slot bound to `item_index`, if that item was placed.
    pub fn get(&self, item_index: usize) -> Option<&PlacedRect> {
        self.rects.iter().find(|r| r.item_index == item_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedRect> {
        self.rects.iter()
    }

    /// How many requested items did not get a slot.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.rects.len())
    }

    /// The slot list alone, as JSON.
    pub fn rects_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.rects)
    }
}

impl<'a> IntoIterator for &'a LayoutResult {
    type Item = &'a PlacedRect;
    type IntoIter = std::slice::Iter<'a, PlacedRect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(item_index: usize) -> PlacedRect {
        PlacedRect {
            x: 10.0,
            y: 20.0,
            width: 80.0,
            height: 80.0,
            size_class: SizeClass::Small,
            item_index,
            stack_order: 1,
        }
    }

    #[test]
    fn test_lookup_by_item_index() {
        let result = LayoutResult {
            container_size: 600.0,
            requested: 4,
            strategy: Strategy::GridScan,
            rects: vec![slot(0), slot(2)],
        };
        assert_eq!(result.len(), 2);
        assert_eq!(result.shortfall(), 2);
        assert_eq!(result.get(2).map(|r| r.item_index), Some(2));
        assert!(result.get(1).is_none());
        assert_eq!((&result).into_iter().count(), 2);
    }

    #[test]
    fn test_json_uses_presentation_field_names() {
        let json = serde_json::to_value(slot(3)).unwrap();
        assert_eq!(json["itemIndex"], 3);
        assert_eq!(json["stackOrder"], 1);
        assert_eq!(json["sizeClass"], "small");
        assert_eq!(json["width"], 80.0);
    }
}
