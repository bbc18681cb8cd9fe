//! Internal Rate of Return by grid search

mod batch;
mod grid;
mod search;

pub use batch::{write_results, BatchResult, BatchRunner};
pub use grid::{SearchConfig, DEFAULT_STEP, DEFAULT_UPPER_BOUND, MAX_GRID_LEN};
pub use search::{internal_rate_of_return, npv_profile, Candidate, IrrSearch, SearchOutcome};
