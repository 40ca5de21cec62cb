use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::DEFAULT_CORNER_INSET;
use crate::constants::{MAX_GRID_RESOLUTION, MIN_TOLERANCE};
use crate::error::LayoutError;
use crate::size_class::SizeWeights;

/// How slot positions are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Randomized grid scan + greedy packing.
    #[default]
    GridScan,
    /// Fixed hand-tuned anchors, reproducible, at most 20 slots.
    Template,
}

/// One step of the viewport -> container mapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerTier {
    /// Largest viewport width (inclusive) served by this tier.
    pub max_viewport: f64,
    pub container_size: f64,
}

/// Engine configuration. Every field has a default, so `{}` is a valid
/// config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub strategy: Strategy,
    /// Minimum gap between two slots (px).
    pub margin: f64,
    /// Boundary slack; 0 is the true outline.
    pub tolerance: f64,
    /// Grid scan resolution per axis.
    pub grid_resolution: usize,
    /// Corner sampling inset for the in-boundary test.
    pub corner_inset: f64,
    pub weights: SizeWeights,
    /// Ascending by `max_viewport`.
    pub tiers: Vec<ContainerTier>,
    /// Container size for viewports wider than every tier.
    pub max_container_size: f64,
    /// Serve the template when the grid scan falls short and the template can
    /// hold every requested slot.
    pub fallback_to_template: bool,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            strategy: Strategy::GridScan,
            margin: 8.0,
            tolerance: 1.0,
            grid_resolution: 20,
            corner_inset: DEFAULT_CORNER_INSET,
            weights: SizeWeights::default(),
            tiers: vec![
                ContainerTier {
                    max_viewport: 480.0,
                    container_size: 320.0,
                },
                ContainerTier {
                    max_viewport: 768.0,
                    container_size: 400.0,
                },
            ],
            max_container_size: 600.0,
            fallback_to_template: false,
            seed: None,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(txt: &str) -> Result<Self, LayoutError> {
        let cfg: LayoutConfig = serde_json::from_str(txt)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let txt = std::fs::read_to_string(path)?;
        Self::from_json_str(&txt)
    }

    /// Checks everything that does not depend on the viewport. Weights are
    /// checked by [`crate::SizeClassifier::new`].
    pub fn validate(&self) -> Result<(), LayoutError> {
        let bad = |msg: String| Err(LayoutError::Configuration(msg));
        if !self.margin.is_finite() || self.margin < 0.0 {
            return bad(format!("margin must be >= 0, got {}", self.margin));
        }
        if !self.tolerance.is_finite() || self.tolerance < MIN_TOLERANCE {
            return bad(format!(
                "tolerance must be >= {MIN_TOLERANCE}, got {}",
                self.tolerance
            ));
        }
        if !(1..=MAX_GRID_RESOLUTION).contains(&self.grid_resolution) {
            return bad(format!(
                "grid_resolution must lie in 1..={MAX_GRID_RESOLUTION}, got {}",
                self.grid_resolution
            ));
        }
        if !(0.0..0.5).contains(&self.corner_inset) {
            return bad(format!(
                "corner_inset must lie in [0, 0.5), got {}",
                self.corner_inset
            ));
        }
        if !self.max_container_size.is_finite() || self.max_container_size <= 0.0 {
            return bad(format!(
                "max_container_size must be positive, got {}",
                self.max_container_size
            ));
        }
        if self.tiers.is_empty() {
            return bad("at least one container tier is required".to_string());
        }
        let mut prev = 0.0;
        for tier in &self.tiers {
            if !tier.container_size.is_finite() || tier.container_size <= 0.0 {
                return bad(format!(
                    "tier container_size must be positive, got {}",
                    tier.container_size
                ));
            }
            if !tier.max_viewport.is_finite() || tier.max_viewport <= prev {
                return bad("tiers must be sorted by strictly increasing max_viewport".to_string());
            }
            prev = tier.max_viewport;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let cfg = LayoutConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, LayoutConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = LayoutConfig::from_json_str(
            r#"{"strategy":"template","margin":4,"seed":11,"weights":{"small":1,"medium":1,"large":2}}"#,
        )
        .unwrap();
        assert_eq!(cfg.strategy, Strategy::Template);
        assert_eq!(cfg.margin, 4.0);
        assert_eq!(cfg.seed, Some(11));
        assert_eq!(cfg.weights.large, 2.0);
        assert_eq!(cfg.grid_resolution, 20);
    }

    #[test]
    fn test_accepts_boundary_values() {
        for txt in [
            r#"{"corner_inset":0}"#,
            r#"{"tolerance":-0.5}"#,
            r#"{"tolerance":-1}"#,
            r#"{"grid_resolution":200}"#,
        ] {
            assert!(LayoutConfig::from_json_str(txt).is_ok(), "{txt}");
        }
    }

    #[test]
    fn test_rejects_invalid_values() {
        for txt in [
            r#"{"margin":-1}"#,
            r#"{"grid_resolution":0}"#,
            r#"{"grid_resolution":1000000}"#,
            r#"{"corner_inset":0.6}"#,
            r#"{"corner_inset":0.5}"#,
            r#"{"corner_inset":-0.1}"#,
            r#"{"tolerance":-1.5}"#,
            r#"{"tiers":[]}"#,
            r#"{"tiers":[{"max_viewport":768,"container_size":400},{"max_viewport":480,"container_size":320}]}"#,
            r#"{"tiers":[{"max_viewport":480,"container_size":0}]}"#,
        ] {
            assert!(
                matches!(
                    LayoutConfig::from_json_str(txt),
                    Err(LayoutError::Configuration(_))
                ),
                "{txt}"
            );
        }
        assert!(matches!(
            LayoutConfig::from_json_str("{not json"),
            Err(LayoutError::Parse(_))
        ));
    }
}
