//! Time Value - time-value-of-money primitives
//!
//! This library provides:
//! - Present value of a single future amount and compound interest accrual
//! - Net present value of period-indexed cash flow schedules
//! - Internal rate of return by grid search over [0, 1)
//! - Parallel IRR over blocks of schedules
//! - CSV/JSON schedule loading

pub mod error;
pub mod irr;
pub mod schedule;
pub mod valuation;

// Re-export commonly used types
pub use error::{ConfigError, ScheduleError};
pub use irr::{internal_rate_of_return, npv_profile, BatchRunner, IrrSearch, SearchConfig};
pub use schedule::CashFlowSchedule;
pub use valuation::{compound_interest, net_present_value, present_value};
