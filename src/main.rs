//! Time Value CLI
//!
//! Command-line interface for present value, compound interest, NPV and IRR

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use serde_json::json;
use std::path::PathBuf;
use std::process;
use time_value::irr::{npv_profile, IrrSearch, SearchConfig, DEFAULT_STEP, DEFAULT_UPPER_BOUND};
use time_value::schedule::{load_schedule_auto, parse_flow};
use time_value::valuation::discount_factor;
use time_value::{compound_interest, net_present_value, present_value, CashFlowSchedule};

/// Time-value-of-money calculations
#[derive(Parser)]
#[command(name = "tvm", version, about = "Present value, compound interest, NPV and IRR")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Present value of a single future amount
    Pv {
        #[arg(long, allow_hyphen_values = true)]
        future_value: f64,
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
        #[arg(long)]
        periods: u32,
    },
    /// Accumulated value with periodic compounding
    Compound {
        #[arg(long, allow_hyphen_values = true)]
        principal: f64,
        /// Nominal rate per period
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
        #[arg(long)]
        periods: u32,
        /// Compoundings per period
        #[arg(long, default_value_t = 1)]
        compoundings: u32,
    },
    /// Net present value of a schedule at a fixed rate
    Npv {
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Internal rate of return of a schedule
    Irr {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// Grid spacing
        #[arg(long, default_value_t = DEFAULT_STEP)]
        step: f64,
        /// Exclusive upper bound of the scanned range
        #[arg(long, default_value_t = DEFAULT_UPPER_BOUND)]
        upper_bound: f64,
    },
    /// NPV at every grid point
    Profile {
        #[command(flatten)]
        schedule: ScheduleArgs,
        #[arg(long, default_value_t = 0.01)]
        step: f64,
        #[arg(long, default_value_t = DEFAULT_UPPER_BOUND)]
        upper_bound: f64,
    },
}

#[derive(Args)]
struct ScheduleArgs {
    /// CSV (period,amount) or JSON ({"0": [-2000.0]}) schedule file
    #[arg(long, conflicts_with = "flow")]
    schedule: Option<PathBuf>,

    /// Inline cash flow as PERIOD:AMOUNT, repeatable
    #[arg(long = "flow", value_name = "PERIOD:AMOUNT", allow_hyphen_values = true)]
    flow: Vec<String>,
}

impl ScheduleArgs {
    fn load(&self) -> Result<CashFlowSchedule> {
        if let Some(path) = &self.schedule {
            return load_schedule_auto(path)
                .with_context(|| format!("Failed to load schedule '{}'", path.display()));
        }
        if self.flow.is_empty() {
            bail!("a schedule is required: pass --schedule FILE or one or more --flow PERIOD:AMOUNT");
        }

        let mut schedule = CashFlowSchedule::new();
        for text in &self.flow {
            let (period, amount) = parse_flow(text)?;
            schedule.push(period, amount);
        }
        Ok(schedule)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn run(cli: Cli) -> Result<()> {
    let json_output = matches!(cli.output, OutputFormat::Json);

    match cli.command {
        Commands::Pv { future_value, rate, periods } => {
            let pv = present_value(future_value, rate, periods);
            let factor = discount_factor(rate, periods);
            if json_output {
                println!("{}", json!({ "present_value": pv, "discount_factor": factor }));
            } else {
                println!("Present value: {:.2}", pv);
                println!("  Discount factor: {:.8}", factor);
            }
        }
        Commands::Compound { principal, rate, periods, compoundings } => {
            let value = compound_interest(principal, rate, periods, compoundings);
            if json_output {
                println!("{}", json!({ "compounded_value": value }));
            } else {
                println!("Compounded value: {:.2}", value);
            }
        }
        Commands::Npv { rate, schedule } => {
            let schedule = schedule.load()?;
            let npv = net_present_value(&schedule, rate);
            if json_output {
                println!("{}", json!({ "rate": rate, "npv": npv }));
            } else {
                println!("NPV at {:.3}: {:.2}", rate, npv);
            }
        }
        Commands::Irr { schedule, step, upper_bound } => {
            let schedule = schedule.load()?;
            let search = IrrSearch::with_config(SearchConfig::new(upper_bound, step))?;
            if !schedule.has_sign_change() {
                warn!("Schedule has no sign change; IRR is a best-effort grid point");
            }
            let outcome = search.run(&schedule);
            let horizon = schedule.last_period();
            if json_output {
                let report = json!({
                    "irr": outcome.best.rate,
                    "npv_at_irr": outcome.best.npv,
                    "evaluated": outcome.evaluated,
                    "stopped_early": outcome.stopped_early,
                    "last_period": horizon,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("IRR: {:.3}", outcome.best.rate);
                if let Some(period) = horizon {
                    println!("  Horizon: {} periods", period);
                }
                println!("  NPV at IRR: {:.2}", outcome.best.npv);
                println!("  Candidates evaluated: {}", outcome.evaluated);
            }
        }
        Commands::Profile { schedule, step, upper_bound } => {
            let schedule = schedule.load()?;
            let config = SearchConfig::new(upper_bound, step);
            config.validate()?;
            let profile = npv_profile(&schedule, &config);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{:>8} {:>16}", "Rate", "NPV");
                println!("{}", "-".repeat(25));
                for candidate in &profile {
                    println!("{:>8.3} {:>16.2}", candidate.rate, candidate.npv);
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
