//! Closed-form valuation: single-amount discounting and schedule NPV

mod discount;
mod npv;

pub use discount::{compound_interest, discount_factor, present_value};
pub use npv::net_present_value;
