use collage_core::constants::{BASE_STACK_ORDER, OUTLINE_SAMPLES};
use collage_core::{LayoutConfig, LayoutError, LayoutResult, Point, slot_color};
use png::{BitDepth, ColorType, Encoder};
use serde::{Deserialize, Serialize};

/// Input document for the blueprint tool: which viewport to simulate, how
/// many slots to ask for and the engine configuration to use.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageSpec {
    pub viewport_width: Option<f64>,
    pub count: Option<usize>,
    pub layout: LayoutConfig,
    pub style: BlueprintStyle,
}

impl CollageSpec {
    pub fn from_json_str(txt: &str) -> Result<Self, LayoutError> {
        let spec: CollageSpec = serde_json::from_str(txt)?;
        spec.layout.validate()?;
        Ok(spec)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintStyle {
    /// Output pixels per layout pixel.
    pub scale: f64,
    /// Blank border around the container, in output pixels.
    pub padding: f64,
    pub outline_samples: usize,
    pub background: String,
    pub show_outline: bool,
}

impl Default for BlueprintStyle {
    fn default() -> Self {
        BlueprintStyle {
            scale: 1.0,
            padding: 16.0,
            outline_samples: OUTLINE_SAMPLES,
            background: "#ffffff".to_string(),
            show_outline: true,
        }
    }
}

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Draw `layout` over the heart `outline` (both in layout pixels).
///
/// Returns the SVG document and its pixel size. Slots are painted in
/// ascending stack order so the pinned slot ends up on top, with a darker
/// stroke.
pub fn build_layout_svg(
    layout: &LayoutResult,
    outline: &[Point],
    style: &BlueprintStyle,
) -> (String, u32, u32) {
    let scale = if style.scale.is_finite() && style.scale > 0.0 {
        style.scale
    } else {
        1.0
    };
    let pad = style.padding.max(0.0);
    let side = (layout.container_size * scale + pad * 2.0).ceil() as u32;
    let to_px = |p: Point| (pad + p.x * scale, pad + p.y * scale);

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{side}\" height=\"{side}\" viewBox=\"0 0 {side} {side}\" stroke-linejoin=\"round\">\n"
    ));
    s.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        svg_escape(&style.background)
    ));
    s.push_str(&format!(
        "<rect class=\"container\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#ddd\" stroke-width=\"1\"/>\n",
        pad,
        pad,
        layout.container_size * scale,
        layout.container_size * scale
    ));
    if style.show_outline {
        s.push_str(&path_from_points(
            outline,
            &to_px,
            "class=\"outline\" fill=\"#fdecef\" stroke=\"#c0394b\" stroke-width=\"2\"",
        ));
    }

    let mut slots: Vec<_> = layout.iter().collect();
    slots.sort_by_key(|r| r.stack_order);
    let top = slots.last().map(|r| r.stack_order);
    for r in slots {
        let (x, y) = to_px(Point { x: r.x, y: r.y });
        let (stroke, width) = if Some(r.stack_order) == top && r.stack_order > BASE_STACK_ORDER {
            ("#333", 3.0)
        } else {
            ("#fff", 1.5)
        };
        s.push_str(&format!(
            "<rect class=\"slot {}\" data-index=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{}\" fill-opacity=\"0.85\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            r.size_class.name(),
            r.item_index,
            x,
            y,
            r.width * scale,
            r.height * scale,
            4.0 * scale,
            slot_color(r.item_index),
            stroke,
            width
        ));
    }
    s.push_str("</svg>\n");
    (s, side, side)
}

fn path_from_points<F>(pts: &[Point], to_px: &F, attrs: &str) -> String
where
    F: Fn(Point) -> (f64, f64),
{
    let Some((first, rest)) = pts.split_first() else {
        return String::new();
    };
    let (x0, y0) = to_px(*first);
    let mut out = format!("<path {attrs} d=\"M {x0:.2} {y0:.2}");
    for p in rest {
        let (x, y) = to_px(*p);
        out.push_str(&format!(" L {x:.2} {y:.2}"));
    }
    out.push_str(" Z\"/>\n");
    out
}
