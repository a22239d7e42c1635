//! Waiting list simulator CLI.
//!
//! ```bash
//! # One run with the default parameters
//! waitlist-sim run
//!
//! # Tweak a few parameters and keep the per-day trajectory
//! waitlist-sim run --capacity-per-day 18 --seed 7 --days-csv days.csv
//!
//! # Compare scenarios from a file and export the table
//! waitlist-sim compare --config scenarios.toml --out comparison.csv
//! ```
//!
//! Logs go to stderr (`RUST_LOG=debug` for more); the report goes to stdout.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use waitlist_sim::io::histogram::{WaitHistogram, DEFAULT_BIN_WIDTH, DEFAULT_MAX_BINS};
use waitlist_sim::io::{reporting, summary};
use waitlist_sim::scenario::comparison::compare;
use waitlist_sim::scenario::config::ScenarioFile;
use waitlist_sim::{Result, SimulationParameters, WaitlistError, WaitlistSimulation};

/// Discrete-time simulation of a service waiting list.
#[derive(Parser)]
#[command(name = "waitlist-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation and print its metrics.
    Run {
        /// Scenario file to take parameters from.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario name within the file (defaults to the first one).
        #[arg(short, long, requires = "config")]
        scenario: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Write the per-day trajectory to this CSV file.
        #[arg(long)]
        days_csv: Option<PathBuf>,

        /// Histogram bin width in days.
        #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
        bin_width: usize,

        /// Number of histogram bins; longer waits land in the last one.
        #[arg(long, default_value_t = DEFAULT_MAX_BINS)]
        max_bins: usize,
    },

    /// Run every scenario in a file and compare them against the first.
    Compare {
        /// Scenario file.
        #[arg(short, long)]
        config: PathBuf,

        /// Write the comparison table to this CSV file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Parameter overrides. Anything not given keeps the file or default value.
#[derive(Args, Debug)]
struct ParamArgs {
    /// Mean referrals per day.
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Appointment slots per day.
    #[arg(long, allow_negative_numbers = true)]
    capacity_per_day: Option<f64>,

    /// Percent of appointments not attended (0-100).
    #[arg(long)]
    dna_rate: Option<f64>,

    /// Percent of non-attenders who are rebooked (0-100).
    #[arg(long)]
    rebook_rate: Option<f64>,

    /// Days before a rebooked person rejoins the list.
    #[arg(long)]
    rebook_delay: Option<f64>,

    /// Simulation horizon in days.
    #[arg(long)]
    days: Option<usize>,

    /// Days excluded from wait statistics.
    #[arg(long)]
    warmup: Option<usize>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u32>,
}

impl ParamArgs {
    fn apply(&self, mut params: SimulationParameters) -> SimulationParameters {
        if let Some(v) = self.arrival_rate {
            params.arrival_rate = v;
        }
        if let Some(v) = self.capacity_per_day {
            params.capacity_per_day = v;
        }
        if let Some(v) = self.dna_rate {
            params.dna_rate = v;
        }
        if let Some(v) = self.rebook_rate {
            params.rebook_rate = v;
        }
        if let Some(v) = self.rebook_delay {
            params.rebook_delay = v;
        }
        if let Some(v) = self.days {
            params.days = v;
        }
        if let Some(v) = self.warmup {
            params.warmup = v;
        }
        if let Some(v) = self.seed {
            params.seed = v;
        }
        params
    }
}

fn base_params(config: Option<&PathBuf>, scenario: Option<&str>) -> Result<SimulationParameters> {
    let Some(path) = config else {
        return Ok(SimulationParameters::default());
    };
    let file = ScenarioFile::load(path)?;
    let found = match scenario {
        Some(name) => file.scenarios.iter().find(|s| s.name == name),
        None => file.baseline(),
    };
    found
        .map(|s| s.params.clone())
        .ok_or_else(|| WaitlistError::InvalidParameter {
            name: "scenario",
            reason: format!("no scenario named {:?} in {}", scenario, path.display()),
        })
}

fn run_single(
    config: Option<PathBuf>,
    scenario: Option<String>,
    overrides: &ParamArgs,
    days_csv: Option<PathBuf>,
    bin_width: usize,
    max_bins: usize,
) -> Result<()> {
    let params = overrides.apply(base_params(config.as_ref(), scenario.as_deref())?);
    params.validate()?;

    let mut sim = WaitlistSimulation::new(params);
    sim.run();

    if let Some(path) = days_csv {
        reporting::write_day_log(path, &sim.history)?;
    }

    let result = sim.into_result();
    let final_queue = result.queue_sizes.last().copied().unwrap_or(0);
    let peak_queue = result.queue_sizes.iter().copied().max().unwrap_or(0);

    println!("=== Waiting list simulation ===");
    print!("{}", summary::format_summary(&result.metrics));
    println!(
        "{:<22} {} of {}",
        "Slots used", result.used_slots, result.total_slots
    );
    println!("{:<22} {}", "Final queue", final_queue);
    println!("{:<22} {}", "Peak queue", peak_queue);

    println!("\n=== Wait distribution ===");
    print!(
        "{}",
        WaitHistogram::from_waits(&result.waits, bin_width, max_bins).render()
    );
    Ok(())
}

fn run_compare(config: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let file = ScenarioFile::load(&config)?;
    let rows = compare(&file.scenarios, &file.cost)?;

    println!("=== Scenario comparison ===");
    print!("{}", summary::format_comparison(&rows));

    if let Some(path) = out {
        reporting::write_comparison(path, &rows)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            config,
            scenario,
            params,
            days_csv,
            bin_width,
            max_bins,
        } => run_single(config, scenario, &params, days_csv, bin_width, max_bins),
        Commands::Compare { config, out } => run_compare(config, out),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
