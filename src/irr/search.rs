//! Grid-search Internal Rate of Return
//!
//! Scans the rate grid in ascending order, evaluating NPV at each candidate,
//! and keeps the candidate with the smallest absolute NPV. Once the absolute
//! NPV has started improving, the first candidate that fails to improve ends
//! the scan: for a conventional investment-then-returns schedule the curve
//! crosses zero once, so nothing further along the grid can beat the best.

use super::grid::SearchConfig;
use crate::error::ConfigError;
use crate::schedule::CashFlowSchedule;
use crate::valuation::net_present_value;
use log::{debug, warn};
use serde::Serialize;

/// A sampled point on the NPV curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub rate: f64,
    pub npv: f64,
}

/// Result of one search invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Candidate with the smallest absolute NPV among those evaluated
    pub best: Candidate,
    /// Number of grid points evaluated before the scan ended
    pub evaluated: usize,
    /// True when the scan stopped before the end of the grid
    pub stopped_early: bool,
}

/// Sequential IRR search over a fixed rate grid
#[derive(Debug, Clone, Default)]
pub struct IrrSearch {
    config: SearchConfig,
}

impl IrrSearch {
    /// Search over the default grid (0.000 to 0.999, step 0.001)
    pub fn new() -> Self {
        Self::default()
    }

    /// Search over a custom grid
    pub fn with_config(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search against `schedule`.
    ///
    /// Always returns an answer. Schedules without a sign change, or whose
    /// true IRR lies outside the grid, yield the best grid point rather than
    /// a root.
    pub fn run(&self, schedule: &CashFlowSchedule) -> SearchOutcome {
        let grid_len = self.config.len();
        let mut best: Option<Candidate> = None;
        let mut improving = false;
        let mut evaluated = 0;

        for rate in self.config.rates() {
            let npv = net_present_value(schedule, rate);
            evaluated += 1;

            let current = match best {
                None => {
                    best = Some(Candidate { rate, npv });
                    continue;
                }
                Some(current) => current,
            };

            if npv.abs() < current.npv.abs() {
                improving = true;
                best = Some(Candidate { rate, npv });
            } else if improving {
                break;
            }
        }

        // A validated config always has at least one grid point
        let best = best.unwrap_or_else(|| Candidate {
            rate: 0.0,
            npv: net_present_value(schedule, 0.0),
        });
        let stopped_early = evaluated < grid_len;

        if stopped_early {
            debug!(
                "IRR search stopped after {}/{} candidates at rate {:.3} (npv {:.6})",
                evaluated, grid_len, best.rate, best.npv
            );
        } else if !improving {
            warn!(
                "IRR search never improved on rate {:.3}; schedule may have no root in [0, {})",
                best.rate, self.config.upper_bound
            );
        } else {
            debug!(
                "IRR search scanned full grid, best rate {:.3} (npv {:.6})",
                best.rate, best.npv
            );
        }

        SearchOutcome {
            best,
            evaluated,
            stopped_early,
        }
    }
}

/// Internal rate of return of `schedule` over the default grid.
///
/// The result has three decimal digits of precision by construction.
pub fn internal_rate_of_return(schedule: &CashFlowSchedule) -> f64 {
    IrrSearch::new().run(schedule).best.rate
}

/// NPV at every grid point, without early termination
pub fn npv_profile(schedule: &CashFlowSchedule, config: &SearchConfig) -> Vec<Candidate> {
    config
        .rates()
        .map(|rate| Candidate {
            rate,
            npv: net_present_value(schedule, rate),
        })
        .collect()
}
