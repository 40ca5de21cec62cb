//! Viewport-driven entry point of the engine.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::boundary::HeartBoundary;
use crate::candidates::{HEART_TEMPLATE, grid_candidates, template_layout};
use crate::config::{LayoutConfig, Strategy};
use crate::error::LayoutError;
use crate::layout::LayoutResult;
use crate::packer::{layout_fits, pack};
use crate::size_class::{SizeClass, SizeClassifier};

/// Maps a viewport to a container tier and runs the configured strategy.
///
/// Holds only validated configuration; every call to [`LayoutScaler::recompute`]
/// builds its own boundary, candidates and result from scratch.
#[derive(Clone, Debug)]
pub struct LayoutScaler {
    config: LayoutConfig,
    classifier: SizeClassifier,
}

impl LayoutScaler {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let classifier = SizeClassifier::new(config.weights)?;
        Ok(LayoutScaler { config, classifier })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Step function from viewport width to container edge.
    pub fn container_size(&self, viewport_width: f64) -> Result<f64, LayoutError> {
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(LayoutError::InvalidScale(format!(
                "viewport width must be positive, got {viewport_width}"
            )));
        }
        Ok(self
            .config
            .tiers
            .iter()
            .find(|t| viewport_width <= t.max_viewport)
            .map(|t| t.container_size)
            .unwrap_or(self.config.max_container_size))
    }

    /// Lay out `requested` slots for a viewport `viewport_width` px wide.
    pub fn recompute<R: Rng + ?Sized>(
        &self,
        viewport_width: f64,
        requested: usize,
        rng: &mut R,
    ) -> Result<LayoutResult, LayoutError> {
        let size = self.container_size(viewport_width)?;
        let strategy = self.config.strategy;
        if requested == 0 {
            return Ok(LayoutResult::empty(size, requested, strategy));
        }

        let result = match strategy {
            Strategy::Template => {
                let template = self.template(size, requested);
                let boundary = HeartBoundary::new(size, self.config.tolerance)?
                    .with_corner_inset(self.config.corner_inset)?;
                if !layout_fits(&boundary, &template.rects, self.config.margin) {
                    warn!(
                        margin = self.config.margin,
                        tolerance = self.config.tolerance,
                        "template slots overlap or leave the heart at this configuration"
                    );
                }
                template
            }
            Strategy::GridScan => {
                let boundary = HeartBoundary::new(size, self.config.tolerance)?
                    .with_corner_inset(self.config.corner_inset)?;
                let candidates = grid_candidates(&boundary, self.config.grid_resolution, rng);
                let items = self.classifier.classify(requested, rng);
                let rects = pack(&boundary, &items, &candidates, self.config.margin);
                let packed = LayoutResult {
                    container_size: size,
                    requested,
                    strategy,
                    rects,
                };
                if packed.shortfall() > 0
                    && self.config.fallback_to_template
                    && requested <= HEART_TEMPLATE.len()
                {
                    let template = self.template(size, requested);
                    if layout_fits(&boundary, &template.rects, self.config.margin) {
                        debug!(
                            placed = packed.len(),
                            requested,
                            "grid scan fell short, serving template"
                        );
                        template
                    } else {
                        debug!(
                            placed = packed.len(),
                            requested,
                            "template does not fit this boundary, keeping grid scan"
                        );
                        packed
                    }
                } else {
                    packed
                }
            }
        };
        info!(
            placed = result.len(),
            requested,
            container = size,
            strategy = ?result.strategy,
            "generated photo positions"
        );
        Ok(result)
    }

    /// [`LayoutScaler::recompute`] with a fresh generator seeded from `seed`.
    pub fn recompute_seeded(
        &self,
        viewport_width: f64,
        requested: usize,
        seed: u64,
    ) -> Result<LayoutResult, LayoutError> {
        self.recompute(viewport_width, requested, &mut StdRng::seed_from_u64(seed))
    }

    fn template(&self, size: f64, requested: usize) -> LayoutResult {
        LayoutResult {
            container_size: size,
            requested,
            strategy: Strategy::Template,
            rects: template_layout(size, requested),
        }
    }
}

/// CSS custom properties describing a container tier, for stylesheets that
/// size placeholders without reading the layout.
pub fn css_variables(container_size: f64) -> Vec<(&'static str, String)> {
    let px = |v: f64| format!("{}px", (v * 100.0).round() / 100.0);
    vec![
        ("--heart-size", px(container_size)),
        ("--photo-small", px(SizeClass::Small.edge(container_size))),
        ("--photo-medium", px(SizeClass::Medium.edge(container_size))),
        ("--photo-large", px(SizeClass::Large.edge(container_size))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CENTER_STACK_ORDER;

    fn scaler(strategy: Strategy) -> LayoutScaler {
        LayoutScaler::new(LayoutConfig {
            strategy,
            ..LayoutConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_tiers() {
        let s = scaler(Strategy::GridScan);
        assert_eq!(s.container_size(320.0).unwrap(), 320.0);
        assert_eq!(s.container_size(480.0).unwrap(), 320.0);
        assert_eq!(s.container_size(481.0).unwrap(), 400.0);
        assert_eq!(s.container_size(768.0).unwrap(), 400.0);
        assert_eq!(s.container_size(1024.0).unwrap(), 600.0);
        assert!(matches!(
            s.container_size(0.0),
            Err(LayoutError::InvalidScale(_))
        ));
        assert!(s.container_size(-3.0).is_err());
    }

    #[test]
    fn test_full_template_scenario() {
        let s = scaler(Strategy::Template);
        let r = s.recompute_seeded(1024.0, 20, 0).unwrap();
        assert_eq!(r.container_size, 600.0);
        assert_eq!(r.len(), 20);
        let first = r.get(0).unwrap();
        let c = first.center();
        assert!((c.x - 0.50 * 600.0).abs() < 1e-9);
        assert!((c.y - 0.45 * 600.0).abs() < 1e-9);
        assert_eq!(first.stack_order, CENTER_STACK_ORDER);
        assert!(r.iter().skip(1).all(|p| p.stack_order == 1));
    }

    #[test]
    fn test_template_is_bit_identical_across_calls_and_seeds() {
        let s = scaler(Strategy::Template);
        let a = s.recompute_seeded(900.0, 13, 1).unwrap();
        let b = s.recompute_seeded(900.0, 13, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_requested_is_empty_for_every_strategy() {
        for strategy in [Strategy::GridScan, Strategy::Template] {
            let r = scaler(strategy).recompute_seeded(1024.0, 0, 5).unwrap();
            assert!(r.is_empty());
            assert_eq!(r.shortfall(), 0);
        }
    }

    #[test]
    fn test_invalid_viewport_fails_fast() {
        let s = scaler(Strategy::GridScan);
        assert!(matches!(
            s.recompute_seeded(0.0, 5, 1),
            Err(LayoutError::InvalidScale(_))
        ));
        assert!(s.recompute_seeded(f64::NAN, 5, 1).is_err());
    }

    #[test]
    fn test_construction_rejects_bad_weights() {
        let cfg = LayoutConfig {
            weights: crate::SizeWeights {
                small: 0.0,
                medium: 0.0,
                large: 0.0,
            },
            ..LayoutConfig::default()
        };
        assert!(matches!(
            LayoutScaler::new(cfg),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_grid_scan_is_bounded_and_seeded() {
        let s = scaler(Strategy::GridScan);
        let a = s.recompute_seeded(1024.0, 20, 7).unwrap();
        let b = s.recompute_seeded(1024.0, 20, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.len() <= 20);
        assert_eq!(a.strategy, Strategy::GridScan);
    }

    fn fallback_scaler(tolerance: f64, margin: f64) -> LayoutScaler {
        LayoutScaler::new(LayoutConfig {
            fallback_to_template: true,
            tolerance,
            margin,
            ..LayoutConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fallback_serves_template_on_shortfall() {
        let s = fallback_scaler(1.0, 8.0);
        // the grid scan cannot hold 20 slots with an 8px gap
        let r = s.recompute_seeded(1024.0, 20, 3).unwrap();
        assert_eq!(r.strategy, Strategy::Template);
        assert_eq!(r.len(), 20);
        let b = HeartBoundary::new(r.container_size, 1.0).unwrap();
        assert!(layout_fits(&b, &r.rects, 8.0));
        // beyond template capacity the short grid result is kept
        let r = s.recompute_seeded(1024.0, 40, 3).unwrap();
        assert_eq!(r.strategy, Strategy::GridScan);
        assert!(r.len() < 40);
    }

    #[test]
    fn test_fallback_refuses_a_template_that_breaks_the_layout() {
        // exact outline: outer template slots leave the heart
        let r = fallback_scaler(0.0, 8.0)
            .recompute_seeded(1024.0, 20, 3)
            .unwrap();
        assert_eq!(r.strategy, Strategy::GridScan);
        assert!(r.len() < 20);
        // margin wider than the template gaps
        let r = fallback_scaler(1.0, 40.0)
            .recompute_seeded(1024.0, 20, 3)
            .unwrap();
        assert_eq!(r.strategy, Strategy::GridScan);
        let b = HeartBoundary::new(r.container_size, 1.0).unwrap();
        assert!(layout_fits(&b, &r.rects, 40.0));
    }

    #[test]
    fn test_css_variables_scale_with_tier() {
        let vars = css_variables(300.0);
        assert_eq!(vars[0], ("--heart-size", "300px".to_string()));
        assert_eq!(vars[1], ("--photo-small", "40px".to_string()));
        assert_eq!(vars[2], ("--photo-medium", "60px".to_string()));
        assert_eq!(vars[3], ("--photo-large", "75px".to_string()));
        assert_eq!(css_variables(320.0)[1].1, "42.67px");
    }
}
