//! Two-phase unit conversion guard.
//!
//! Pixel-unit sizes are only meaningful once the world-to-pixel scale
//! exists, which in turn requires resolved axis bounds. The normalizer
//! makes that ordering explicit: it starts in [`Phase::Estimating`] and
//! transitions to [`Phase::Resolved`] exactly once, right after the axis
//! resolver finishes and `pixel_to_world` is computed.

use plotforge_protocol::Size;

use crate::error::CompileError;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Phase {
    Estimating,
    Resolved { pixel_to_world: f32 },
}

/// Converts wire [`Size`] values to world units.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitNormalizer {
    phase: Phase,
}

impl UnitNormalizer {
    #[inline]
    pub fn new() -> Self {
        Self { phase: Phase::Estimating }
    }

    /// Marks axis resolution as complete.
    ///
    /// Must be called exactly once per compile; a second call indicates a
    /// phase-ordering bug in the orchestrator.
    pub fn resolve(&mut self, pixel_to_world: f32) {
        debug_assert!(
            matches!(self.phase, Phase::Estimating),
            "unit normalizer resolved twice"
        );
        self.phase = Phase::Resolved { pixel_to_world };
    }

    /// World-unit value of `size`.
    ///
    /// World sizes convert identically in either phase. Pixel sizes before
    /// [`resolve`](Self::resolve) are an ordering violation and abort the
    /// compile.
    pub fn to_world(&self, size: Size) -> Result<f32, CompileError> {
        match (size, self.phase) {
            (Size::World(v), _) => Ok(v),
            (Size::Pixels(px), Phase::Resolved { pixel_to_world }) => Ok(px * pixel_to_world),
            (Size::Pixels(px), Phase::Estimating) => Err(CompileError::OrderingViolation {
                what: format!("size {px}px"),
            }),
        }
    }

    /// World-unit span of one pixel, once resolved.
    #[inline]
    pub fn pixel_to_world(&self) -> Option<f32> {
        match self.phase {
            Phase::Resolved { pixel_to_world } => Some(pixel_to_world),
            Phase::Estimating => None,
        }
    }
}

impl Default for UnitNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_sizes_convert_in_both_phases() {
        let mut units = UnitNormalizer::new();
        assert_eq!(units.to_world(Size::World(2.5)).unwrap(), 2.5);
        units.resolve(0.1);
        assert_eq!(units.to_world(Size::World(2.5)).unwrap(), 2.5);
    }

    #[test]
    fn pixel_size_before_resolve_is_fatal() {
        let units = UnitNormalizer::new();
        let err = units.to_world(Size::Pixels(4.0)).unwrap_err();
        assert!(matches!(err, CompileError::OrderingViolation { .. }));
    }

    #[test]
    fn pixel_size_after_resolve_scales() {
        let mut units = UnitNormalizer::new();
        units.resolve(0.05);
        assert_eq!(units.to_world(Size::Pixels(4.0)).unwrap(), 0.2);
        assert_eq!(units.pixel_to_world(), Some(0.05));
    }
}
