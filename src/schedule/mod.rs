//! Cash flow schedule and its loaders

mod data;
pub mod loader;

pub use data::CashFlowSchedule;
pub use loader::{load_block, load_schedule, load_schedule_auto, load_schedule_json, parse_flow};
