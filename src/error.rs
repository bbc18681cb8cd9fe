//! Error types for schedule loading and search configuration
//!
//! The valuation functions and the IRR search are total over their inputs and
//! never return these; only the surrounding I/O and configuration layer does.

use thiserror::Error;

/// Failure while reading a cash flow schedule
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV schedule: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON schedule: {0}")]
    Json(#[from] serde_json::Error),

    #[error("non-finite amount {amount} in period {period}")]
    NonFiniteAmount { period: u32, amount: f64 },

    #[error("invalid cash flow '{0}': expected PERIOD:AMOUNT")]
    InvalidFlow(String),
}

/// Invalid IRR grid configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid grid step {0}: must be finite and greater than zero")]
    InvalidStep(f64),

    #[error("invalid upper bound {0}: must be in (0, 1]")]
    InvalidUpperBound(f64),

    #[error("grid step {step} must be smaller than upper bound {upper_bound}")]
    StepExceedsBound { step: f64, upper_bound: f64 },

    #[error("grid step {step} yields more than {max} candidate rates")]
    TooManyCandidates { step: f64, max: usize },
}
