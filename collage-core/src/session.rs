//! Latest layout for one presentation surface.

use crate::error::LayoutError;
use crate::layout::LayoutResult;
use crate::scaler::LayoutScaler;

/// Holds the current [`LayoutResult`] and replaces it wholesale on resize.
///
/// Every recompute reuses the session seed, so resizing within one container
/// tier hands back the same slots and photos stay where they are.
#[derive(Clone, Debug)]
pub struct LayoutSession {
    scaler: LayoutScaler,
    seed: u64,
    current: LayoutResult,
}

impl LayoutSession {
    pub fn new(scaler: LayoutScaler, seed: u64) -> Self {
        let current = LayoutResult::empty(
            scaler.config().max_container_size,
            0,
            scaler.config().strategy,
        );
        LayoutSession {
            scaler,
            seed,
            current,
        }
    }

    /// Uses the configured seed if there is one, `fallback_seed` otherwise.
    pub fn with_config_seed(scaler: LayoutScaler, fallback_seed: u64) -> Self {
        let seed = scaler.config().seed.unwrap_or(fallback_seed);
        Self::new(scaler, seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scaler(&self) -> &LayoutScaler {
        &self.scaler
    }

    pub fn current(&self) -> &LayoutResult {
        &self.current
    }

    /// Lay out for a new viewport. Returns whether the snapshot changed; on
    /// error the previous snapshot is kept.
    pub fn resize(&mut self, viewport_width: f64, requested: usize) -> Result<bool, LayoutError> {
        let next = self
            .scaler
            .recompute_seeded(viewport_width, requested, self.seed)?;
        let changed = next != self.current;
        self.current = next;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    fn session(seed: Option<u64>) -> LayoutSession {
        let scaler = LayoutScaler::new(LayoutConfig {
            seed,
            ..LayoutConfig::default()
        })
        .unwrap();
        LayoutSession::with_config_seed(scaler, 7)
    }

    #[test]
    fn test_resize_within_tier_keeps_slots() {
        let mut s = session(Some(42));
        assert_eq!(s.seed(), 42);
        assert!(s.resize(700.0, 12).unwrap());
        let first = s.current().clone();
        assert!(!first.is_empty());
        assert!(!s.resize(701.0, 12).unwrap());
        assert!(!s.resize(768.0, 12).unwrap());
        assert_eq!(s.current(), &first);
    }

    #[test]
    fn test_returning_to_a_tier_restores_its_layout() {
        let mut s = session(None);
        assert_eq!(s.seed(), 7);
        s.resize(700.0, 12).unwrap();
        let tablet = s.current().clone();
        assert!(s.resize(1280.0, 12).unwrap());
        assert_eq!(s.current().container_size, 600.0);
        assert!(s.resize(500.0, 12).unwrap());
        assert_eq!(s.current(), &tablet);
    }

    #[test]
    fn test_failed_resize_keeps_snapshot() {
        let mut s = session(Some(1));
        s.resize(320.0, 6).unwrap();
        let before = s.current().clone();
        assert!(matches!(
            s.resize(0.0, 6),
            Err(LayoutError::InvalidScale(_))
        ));
        assert_eq!(s.current(), &before);
    }
}
