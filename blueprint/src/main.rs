use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use blueprint_core::{CollageSpec, build_layout_svg, encode_rgba_to_png_bytes};
use collage_core::{HeartBoundary, LayoutResult, LayoutScaler};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: blueprint <collage.json|-> <output.(png|svg|json)> [viewport_width] [count]";
const DEFAULT_VIEWPORT: f64 = 1024.0;
const DEFAULT_COUNT: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    let input = &args[1];
    let output = &args[2];

    let txt = read_input(input)?;
    let spec = CollageSpec::from_json_str(&txt).with_context(|| format!("invalid collage spec {input}"))?;
    let viewport = match args.get(3) {
        Some(s) => s
            .parse()
            .with_context(|| format!("viewport_width must be a number, got {s}"))?,
        None => spec.viewport_width.unwrap_or(DEFAULT_VIEWPORT),
    };
    let count = match args.get(4) {
        Some(s) => s
            .parse()
            .with_context(|| format!("count must be a non-negative integer, got {s}"))?,
        None => spec.count.unwrap_or(DEFAULT_COUNT),
    };

    let layout = compute_layout(&spec, viewport, count)?;
    if layout.shortfall() > 0 {
        warn!(
            placed = layout.len(),
            requested = count,
            "heart could not hold every slot"
        );
    }

    let ext = Path::new(output)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => {
            let json = serde_json::to_string_pretty(&layout)?;
            fs::write(output, json).with_context(|| format!("writing {output}"))?;
        }
        Some("svg") => {
            let (svg, _, _) = render_svg(&spec, &layout)?;
            fs::write(output, svg).with_context(|| format!("writing {output}"))?;
        }
        Some("png") => {
            let (svg, w, h) = render_svg(&spec, &layout)?;
            let bytes = rasterize(&svg, w, h)?;
            fs::write(output, bytes).with_context(|| format!("writing {output}"))?;
        }
        _ => bail!("unsupported output {output}; expected .png, .svg or .json"),
    }
    info!(output = %output, slots = layout.len(), "blueprint written");
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut txt = String::new();
        std::io::stdin()
            .read_to_string(&mut txt)
            .context("reading collage spec from stdin")?;
        Ok(txt)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

fn compute_layout(spec: &CollageSpec, viewport: f64, count: usize) -> Result<LayoutResult> {
    let scaler = LayoutScaler::new(spec.layout.clone())?;
    let layout = match spec.layout.seed {
        Some(seed) => scaler.recompute(viewport, count, &mut StdRng::seed_from_u64(seed))?,
        None => scaler.recompute(viewport, count, &mut rand::rng())?,
    };
    Ok(layout)
}

fn render_svg(spec: &CollageSpec, layout: &LayoutResult) -> Result<(String, u32, u32)> {
    let boundary = HeartBoundary::new(layout.container_size, spec.layout.tolerance)?;
    let outline = boundary.outline(spec.style.outline_samples);
    Ok(build_layout_svg(layout, &outline, &spec.style))
}

// No text is drawn, so the default (empty) font database is enough.
fn rasterize(svg: &str, w: u32, h: u32) -> Result<Vec<u8>> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow!("SVG parse error: {e:?}"))?;
    let mut pixmap = tiny_skia::Pixmap::new(w, h).ok_or_else(|| anyhow!("pixmap alloc failed"))?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    Ok(encode_rgba_to_png_bytes(w, h, pixmap.data())?)
}
