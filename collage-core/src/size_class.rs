use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::REFERENCE_CONTAINER;
use crate::error::LayoutError;

/// Photo slot size. Every class is a square whose edge is a fixed fraction of
/// the container edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Edge length in a reference-sized container.
    fn reference_edge(self) -> f64 {
        match self {
            SizeClass::Small => 80.0,
            SizeClass::Medium => 120.0,
            SizeClass::Large => 150.0,
        }
    }

    /// Edge length as a fraction of the container edge.
    pub fn base_fraction(self) -> f64 {
        self.reference_edge() / REFERENCE_CONTAINER
    }

    pub fn edge(self, container_size: f64) -> f64 {
        self.reference_edge() * container_size / REFERENCE_CONTAINER
    }

    pub fn name(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }

    /// Class whose base fraction is closest to `fraction`; ties go to the smaller class.
    pub fn nearest(fraction: f64) -> SizeClass {
        let mut best = SizeClass::Small;
        for class in SizeClass::ALL {
            if (class.base_fraction() - fraction).abs() < (best.base_fraction() - fraction).abs()
            {
                best = class;
            }
        }
        best
    }
}

/// Relative selection weights for the three classes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeWeights {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl Default for SizeWeights {
    fn default() -> Self {
        SizeWeights {
            small: 0.4,
            medium: 0.35,
            large: 0.25,
        }
    }
}

impl SizeWeights {
    pub fn weight(&self, class: SizeClass) -> f64 {
        match class {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }
}

/// Weighted sampler over [`SizeClass`], validated once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeClassifier {
    // cumulative upper bounds, normalized to a total of 1.0
    brackets: [(SizeClass, f64); 3],
}

impl SizeClassifier {
    pub fn new(weights: SizeWeights) -> Result<Self, LayoutError> {
        let mut total = 0.0;
        for class in SizeClass::ALL {
            let w = weights.weight(class);
            if !w.is_finite() || w < 0.0 {
                return Err(LayoutError::Configuration(format!(
                    "{} weight must be a non-negative number, got {w}",
                    class.name()
                )));
            }
            total += w;
        }
        if total <= 0.0 {
            return Err(LayoutError::Configuration(
                "size class weights must have a positive total".to_string(),
            ));
        }
        Ok(Self::normalized(weights, total))
    }

    fn normalized(weights: SizeWeights, total: f64) -> Self {
        let mut acc = 0.0;
        let brackets = SizeClass::ALL.map(|class| {
            acc += weights.weight(class) / total;
            (class, acc)
        });
        SizeClassifier { brackets }
    }

    /// Class for a uniform draw in `[0, 1)`. First bracket containing the draw
    /// wins; the last class absorbs rounding at the top of the range.
    pub fn select(&self, draw: f64) -> SizeClass {
        self.brackets
            .iter()
            .find(|(_, upper)| draw < *upper)
            .map(|(class, _)| *class)
            .unwrap_or(SizeClass::Large)
    }

    /// One class per item, in draw order.
    pub fn classify<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<SizeClass> {
        (0..count)
            .map(|_| self.select(rng.random::<f64>()))
            .collect()
    }
}

impl Default for SizeClassifier {
    fn default() -> Self {
        // default weights already sum to 1.0
        Self::normalized(SizeWeights::default(), 1.0)
    }
}
