//! Period-indexed cash flow schedule

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Signed cash flows keyed by period index.
///
/// A period may hold several entries (e.g., a coupon and a redemption in the
/// same year); each entry is kept and discounted on its own.
/// Negative = outflow (investment), positive = inflow (return).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    flows: BTreeMap<u32, Vec<f64>>,
}

impl CashFlowSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one cash flow to `period`
    pub fn push(&mut self, period: u32, amount: f64) {
        self.flows.entry(period).or_default().push(amount);
    }

    /// Builder-style variant of [`push`](Self::push)
    pub fn with_flow(mut self, period: u32, amount: f64) -> Self {
        self.push(period, amount);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Total number of entries across all periods
    pub fn entry_count(&self) -> usize {
        self.flows.values().map(Vec::len).sum()
    }

    /// Entries of a single period, empty if the period has none
    pub fn amounts(&self, period: u32) -> &[f64] {
        self.flows.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flat iterator over `(period, amount)` in ascending period order
    pub fn entries(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.flows
            .iter()
            .flat_map(|(&period, amounts)| amounts.iter().map(move |&a| (period, a)))
    }

    /// Sum of entries per period
    pub fn net_by_period(&self) -> BTreeMap<u32, f64> {
        self.flows
            .iter()
            .map(|(&period, amounts)| (period, amounts.iter().sum::<f64>()))
            .collect()
    }

    /// True when at least one period nets negative and another nets positive.
    ///
    /// IRR is only meaningful for schedules that pass this check; the search
    /// itself does not require it.
    pub fn has_sign_change(&self) -> bool {
        let nets = self.net_by_period();
        let has_positive = nets.values().any(|&cf| cf > 0.0);
        let has_negative = nets.values().any(|&cf| cf < 0.0);
        has_positive && has_negative
    }

    /// Highest period index with at least one entry
    pub fn last_period(&self) -> Option<u32> {
        self.flows
            .iter()
            .rev()
            .find(|(_, amounts)| !amounts.is_empty())
            .map(|(&period, _)| period)
    }
}

impl From<BTreeMap<u32, Vec<f64>>> for CashFlowSchedule {
    fn from(flows: BTreeMap<u32, Vec<f64>>) -> Self {
        Self { flows }
    }
}

impl From<HashMap<u32, Vec<f64>>> for CashFlowSchedule {
    fn from(flows: HashMap<u32, Vec<f64>>) -> Self {
        Self {
            flows: flows.into_iter().collect(),
        }
    }
}

impl FromIterator<(u32, f64)> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        let mut schedule = Self::new();
        for (period, amount) in iter {
            schedule.push(period, amount);
        }
        schedule
    }
}
