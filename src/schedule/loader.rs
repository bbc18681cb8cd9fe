//! Load cash flow schedules from CSV or JSON

use super::CashFlowSchedule;
use crate::error::ScheduleError;
use csv::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// One entry of a single-schedule CSV (`period,amount`)
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    period: u32,
    amount: f64,
}

/// One entry of a block CSV (`schedule_id,period,amount`)
#[derive(Debug, serde::Deserialize)]
struct BlockCsvRow {
    schedule_id: String,
    period: u32,
    amount: f64,
}

fn check_finite(period: u32, amount: f64) -> Result<(), ScheduleError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ScheduleError::NonFiniteAmount { period, amount })
    }
}

/// Load a single schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<CashFlowSchedule, ScheduleError> {
    let file = File::open(path)?;
    load_schedule_from_reader(file)
}

/// Load a single schedule from any reader (e.g., string buffer, stdin)
pub fn load_schedule_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<CashFlowSchedule, ScheduleError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut schedule = CashFlowSchedule::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        check_finite(row.period, row.amount)?;
        schedule.push(row.period, row.amount);
    }

    Ok(schedule)
}

/// Load a schedule stored as a JSON map of period to amounts
pub fn load_schedule_json<R: std::io::Read>(reader: R) -> Result<CashFlowSchedule, ScheduleError> {
    let schedule: CashFlowSchedule = serde_json::from_reader(reader)?;
    for (period, amount) in schedule.entries() {
        check_finite(period, amount)?;
    }
    Ok(schedule)
}

/// Load a file, picking JSON for `.json` extensions and CSV otherwise
pub fn load_schedule_auto<P: AsRef<Path>>(path: P) -> Result<CashFlowSchedule, ScheduleError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        load_schedule_json(File::open(path)?)
    } else {
        load_schedule(path)
    }
}

/// Load many schedules from a block CSV file
pub fn load_block<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(String, CashFlowSchedule)>, ScheduleError> {
    let file = File::open(path)?;
    load_block_from_reader(file)
}

/// Load many schedules from a block CSV reader.
///
/// Rows may be interleaved; schedules are returned in first-seen id order.
pub fn load_block_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<(String, CashFlowSchedule)>, ScheduleError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut block: Vec<(String, CashFlowSchedule)> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for result in csv_reader.deserialize() {
        let row: BlockCsvRow = result?;
        check_finite(row.period, row.amount)?;

        let idx = match index_by_id.get(&row.schedule_id).copied() {
            Some(idx) => idx,
            None => {
                block.push((row.schedule_id.clone(), CashFlowSchedule::new()));
                index_by_id.insert(row.schedule_id, block.len() - 1);
                block.len() - 1
            }
        };
        block[idx].1.push(row.period, row.amount);
    }

    Ok(block)
}

/// Parse a `PERIOD:AMOUNT` pair as given on the command line
pub fn parse_flow(text: &str) -> Result<(u32, f64), ScheduleError> {
    let invalid = || ScheduleError::InvalidFlow(text.to_string());

    let (period, amount) = text.split_once(':').ok_or_else(invalid)?;
    let period: u32 = period.trim().parse().map_err(|_| invalid())?;
    let amount: f64 = amount.trim().parse().map_err(|_| invalid())?;
    check_finite(period, amount)?;

    Ok((period, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_schedule_from_reader() {
        let data = "period,amount\n0,-2000\n1,100\n2,100\n3,100\n3,2500\n";
        let schedule = load_schedule_from_reader(data.as_bytes()).unwrap();

        assert_eq!(schedule.entry_count(), 5);
        assert_eq!(schedule.amounts(3), &[100.0, 2500.0]);
    }

    #[test]
    fn test_load_rejects_malformed_rows() {
        let data = "period,amount\n0,-2000\nx,100\n";
        let err = load_schedule_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::Csv(_)));

        let data = "period,amount\n0,NaN\n";
        let err = load_schedule_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::NonFiniteAmount { period: 0, .. }));
    }

    #[test]
    fn test_load_schedule_json() {
        let data = r#"{"0": [-2390], "1": [1000], "2": [2910], "3": [9]}"#;
        let schedule = load_schedule_json(data.as_bytes()).unwrap();
        assert_eq!(schedule.entry_count(), 4);
        assert_eq!(schedule.amounts(2), &[2910.0]);
    }

    #[test]
    fn test_load_block_groups_by_id() {
        let data = "schedule_id,period,amount\n\
                    b,0,-500\n\
                    a,0,-2000\n\
                    b,1,570\n\
                    a,1,2400\n";
        let block = load_block_from_reader(data.as_bytes()).unwrap();

        assert_eq!(block.len(), 2);
        assert_eq!(block[0].0, "b");
        assert_eq!(block[0].1.amounts(1), &[570.0]);
        assert_eq!(block[1].0, "a");
        assert_eq!(block[1].1.entry_count(), 2);
    }

    #[test]
    fn test_parse_flow() {
        assert_eq!(parse_flow("3:2500").unwrap(), (3, 2500.0));
        assert_eq!(parse_flow(" 0 : -2000.5 ").unwrap(), (0, -2000.5));
        assert!(matches!(parse_flow("3"), Err(ScheduleError::InvalidFlow(_))));
        assert!(matches!(parse_flow("-1:5"), Err(ScheduleError::InvalidFlow(_))));
        assert!(parse_flow("1:inf").is_err());
    }
}
