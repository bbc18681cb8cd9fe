//! Batch IRR over many schedules
//!
//! Each schedule is searched sequentially with early stop; the schedules
//! themselves are spread across the rayon pool.

use super::grid::SearchConfig;
use super::search::IrrSearch;
use crate::error::ConfigError;
use crate::schedule::CashFlowSchedule;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;

/// IRR result for one schedule of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub id: String,
    pub irr: f64,
    pub npv_at_irr: f64,
    pub evaluated: usize,
    pub stopped_early: bool,
    pub has_sign_change: bool,
}

/// Output row of a block run; the rate keeps the grid's three decimals
#[derive(Debug, Serialize)]
struct BatchCsvRow<'a> {
    schedule_id: &'a str,
    irr: String,
    npv_at_irr: f64,
    evaluated: usize,
    stopped_early: bool,
    has_sign_change: bool,
}

impl<'a> From<&'a BatchResult> for BatchCsvRow<'a> {
    fn from(r: &'a BatchResult) -> Self {
        Self {
            schedule_id: &r.id,
            irr: format!("{:.3}", r.irr),
            npv_at_irr: r.npv_at_irr,
            evaluated: r.evaluated,
            stopped_early: r.stopped_early,
            has_sign_change: r.has_sign_change,
        }
    }
}

/// Write batch results as CSV with a header row.
///
/// Ids are quoted as needed, so any id the block loader accepts reads back intact.
pub fn write_results<W: Write>(writer: W, results: &[BatchResult]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(BatchCsvRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Runs the IRR search for a block of schedules sharing one grid
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new();
/// let block = load_block("schedules.csv")?;
/// for result in runner.run_batch(&block) {
///     println!("{}: {:.3}", result.id, result.irr);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    search: IrrSearch,
}

impl BatchRunner {
    /// Runner over the default grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner over a custom grid
    pub fn with_config(config: SearchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            search: IrrSearch::with_config(config)?,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        self.search.config()
    }

    /// Search a single schedule
    pub fn run(&self, id: &str, schedule: &CashFlowSchedule) -> BatchResult {
        let has_sign_change = schedule.has_sign_change();
        if !has_sign_change {
            warn!("Schedule {} has no sign change; IRR is a best-effort grid point", id);
        }

        let outcome = self.search.run(schedule);
        BatchResult {
            id: id.to_string(),
            irr: outcome.best.rate,
            npv_at_irr: outcome.best.npv,
            evaluated: outcome.evaluated,
            stopped_early: outcome.stopped_early,
            has_sign_change,
        }
    }

    /// Search every schedule in parallel.
    ///
    /// Returns exactly one result per input, in input order.
    pub fn run_batch(&self, block: &[(String, CashFlowSchedule)]) -> Vec<BatchResult> {
        let start = Instant::now();

        let results: Vec<BatchResult> = block
            .par_iter()
            .map(|(id, schedule)| self.run(id, schedule))
            .collect();

        info!(
            "Computed IRR for {} schedules in {:?}",
            results.len(),
            start.elapsed()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::loader::load_block_from_reader;

    fn block() -> Vec<(String, CashFlowSchedule)> {
        vec![
            (
                "bond".to_string(),
                vec![(0, -2000.0), (1, 100.0), (2, 100.0), (3, 100.0), (3, 2500.0)]
                    .into_iter()
                    .collect(),
            ),
            (
                "project".to_string(),
                vec![(0, -2390.0), (1, 1000.0), (2, 2910.0), (3, 9.0)]
                    .into_iter()
                    .collect(),
            ),
            (
                "inflows_only".to_string(),
                vec![(0, 100.0), (1, 50.0)].into_iter().collect(),
            ),
        ]
    }

    #[test]
    fn test_batch_preserves_order_and_count() {
        let runner = BatchRunner::new();
        let results = runner.run_batch(&block());

        assert_eq!(results.len(), 3);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["bond", "project", "inflows_only"]);

        assert!((results[0].irr - 0.124).abs() < 1e-6);
        assert!((results[1].irr - 0.334).abs() < 1e-6);
        assert!(results[0].stopped_early);
        assert!(!results[2].has_sign_change);
        assert!(!results[2].stopped_early);
    }

    #[test]
    fn test_batch_matches_single_search() {
        let runner = BatchRunner::new();
        let search = IrrSearch::new();
        let block = block();
        for (result, (_, schedule)) in runner.run_batch(&block).iter().zip(&block) {
            assert_eq!(result.irr, search.run(schedule).best.rate);
        }
    }

    #[test]
    fn test_written_ids_survive_quoting() {
        let input = "schedule_id,period,amount\n\
                     \"fund,A\",0,-500\n\
                     \"fund,A\",1,570\n";
        let block = load_block_from_reader(input.as_bytes()).unwrap();
        assert_eq!(block[0].0, "fund,A");

        let results = BatchRunner::new().run_batch(&block);
        let mut buf = Vec::new();
        write_results(&mut buf, &results).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["schedule_id", "irr", "npv_at_irr", "evaluated", "stopped_early", "has_sign_change"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(&rows[0][0], "fund,A");
        assert_eq!(&rows[0][1], "0.140");
        assert_eq!(&rows[0][4], "true");
    }

    #[test]
    fn test_empty_batch() {
        assert!(BatchRunner::new().run_batch(&[]).is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(BatchRunner::with_config(SearchConfig::new(1.0, -0.1)).is_err());
    }
}
