//! Candidate-rate grid for the IRR search

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default upper bound of the scanned range (exclusive)
pub const DEFAULT_UPPER_BOUND: f64 = 1.0;

/// Default spacing between candidate rates
pub const DEFAULT_STEP: f64 = 0.001;

/// Largest grid a config may describe (a step of 1e-6 over [0, 1))
pub const MAX_GRID_LEN: usize = 1_000_000;

/// Range and resolution of the rate grid.
///
/// The grid always starts at 0.0. Rates are `i * step` for every integer `i`
/// with `i * step < upper_bound`, so the default grid is 0.000, 0.001, ..., 0.999.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Exclusive upper bound of the scanned range, in (0, 1]
    pub upper_bound: f64,
    /// Distance between adjacent candidates
    pub step: f64,
}

impl SearchConfig {
    pub fn new(upper_bound: f64, step: f64) -> Self {
        Self { upper_bound, step }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if !self.upper_bound.is_finite() || self.upper_bound <= 0.0 || self.upper_bound > 1.0 {
            return Err(ConfigError::InvalidUpperBound(self.upper_bound));
        }
        if self.step >= self.upper_bound {
            return Err(ConfigError::StepExceedsBound {
                step: self.step,
                upper_bound: self.upper_bound,
            });
        }
        if self.raw_count() > MAX_GRID_LEN as f64 {
            return Err(ConfigError::TooManyCandidates {
                step: self.step,
                max: MAX_GRID_LEN,
            });
        }
        Ok(())
    }

    /// Unbounded candidate count as a float; NaN for nonsensical configs
    fn raw_count(&self) -> f64 {
        // Guard against 1.0 / 0.001 landing a hair above 1000
        (self.upper_bound / self.step - 1e-9).ceil()
    }

    /// Number of candidate rates on the grid, never more than [`MAX_GRID_LEN`]
    pub fn len(&self) -> usize {
        let count = self.raw_count();
        if count.is_nan() || count <= 0.0 {
            0
        } else if count >= MAX_GRID_LEN as f64 {
            MAX_GRID_LEN
        } else {
            count as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rate of the `index`-th candidate
    pub fn rate_at(&self, index: usize) -> f64 {
        index as f64 * self.step
    }

    /// Candidate rates in ascending order
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.rate_at(i))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPPER_BOUND, DEFAULT_STEP)
    }
}
