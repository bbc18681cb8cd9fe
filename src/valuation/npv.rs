//! Net present value of a cash flow schedule

use super::present_value;
use crate::schedule::CashFlowSchedule;

/// Sum of the present values of every entry in `schedule`, each discounted
/// by its own period index at `rate`.
///
/// An empty schedule has an NPV of exactly zero.
pub fn net_present_value(schedule: &CashFlowSchedule, rate: f64) -> f64 {
    schedule
        .entries()
        .map(|(period, amount)| present_value(amount, rate, period))
        .sum()
}
