//! Compute IRR for every schedule in a block CSV
//!
//! Usage: irr_block <input.csv> [output.csv]
//!
//! Input columns: schedule_id,period,amount
//! Accepts grid overrides via environment variables:
//!   IRR_GRID_STEP, IRR_GRID_UPPER_BOUND

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::time::Instant;
use time_value::irr::{write_results, BatchRunner, SearchConfig, DEFAULT_STEP, DEFAULT_UPPER_BOUND};
use time_value::schedule::load_block;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input_path = args
        .next()
        .context("usage: irr_block <input.csv> [output.csv]")?;
    let output_path = args.next().unwrap_or_else(|| "irr_block_output.csv".to_string());

    let step: f64 = env::var("IRR_GRID_STEP")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_STEP);

    let upper_bound: f64 = env::var("IRR_GRID_UPPER_BOUND")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_UPPER_BOUND);

    let runner = BatchRunner::with_config(SearchConfig::new(upper_bound, step))?;

    let start = Instant::now();
    println!("Loading schedules from {}...", input_path);
    let block = load_block(&input_path)
        .with_context(|| format!("Failed to load block '{}'", input_path))?;
    println!("Loaded {} schedules in {:?}", block.len(), start.elapsed());

    let results = runner.run_batch(&block);

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create output file '{}'", output_path))?;
    write_results(file, &results)
        .with_context(|| format!("Failed to write results to '{}'", output_path))?;

    let without_root = results.iter().filter(|r| !r.has_sign_change).count();
    println!("Output written to {}", output_path);
    println!("\nBlock Summary:");
    println!("  Schedules: {}", results.len());
    println!("  Without sign change: {}", without_root);
    println!(
        "  Candidates evaluated: {}",
        results.iter().map(|r| r.evaluated).sum::<usize>()
    );
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
