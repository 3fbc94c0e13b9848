//! Adaptation parameters

use crate::{DvsError, DvsResult};

/// Session-wide scalars consumed by the pixel kernel
///
/// Only `base_threshold` is checked; the remaining factors are applied as
/// given, sensible ranges are the caller's business.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptConfig {
    /// Initial per-pixel threshold, also the session floor
    pub base_threshold: f32,
    /// Decay multiplier applied to the reference every step
    pub relax_rate: f32,
    /// Threshold multiplier after a firing
    pub adapt_up: f32,
    /// Threshold multiplier after a quiet step
    pub adapt_down: f32,
}

impl Default for AdaptConfig {
    fn default() -> Self {
        AdaptConfig {
            base_threshold: 12.75,
            relax_rate: 1.0,
            adapt_up: 1.0,
            adapt_down: 1.0,
        }
    }
}

impl AdaptConfig {
    pub fn new(base_threshold: f32, relax_rate: f32, adapt_up: f32, adapt_down: f32) -> Self {
        AdaptConfig {
            base_threshold,
            relax_rate,
            adapt_up,
            adapt_down,
        }
    }

    /// Fixed threshold, no decay: every pixel compares against the last event
    pub fn fixed(base_threshold: f32) -> Self {
        AdaptConfig {
            base_threshold,
            ..Default::default()
        }
    }

    /// Check that the base threshold can seed a strictly positive buffer
    pub fn validate(&self) -> DvsResult<()> {
        if !self.base_threshold.is_finite() || self.base_threshold <= 0.0 {
            return Err(DvsError::InvalidThreshold(self.base_threshold));
        }
        Ok(())
    }
}
