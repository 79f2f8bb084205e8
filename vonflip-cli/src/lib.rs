#![warn(missing_docs)]
//! Vonflip CLI Library
//!
//! This module provides the command-line driver for the simulator.
//! Use `vonflip::run()` (or `vonflip_cli::run()`) in a main function to get
//! the full CLI: configuration discovery, experiment execution, progress
//! display and report output.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     vonflip_cli::run()
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    ExecutionConfig, ExecutionResult, Executor, build_report, build_report_meta,
    format_human_output, format_sequence_output,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vonflip_core::{BiasedSource, ExperimentConfig};
use vonflip_report::{OutputFormat, generate_json_report};

/// Vonflip CLI arguments
#[derive(Parser, Debug)]
#[command(name = "vonflip")]
#[command(author, version, about = "Vonflip - Von Neumann de-biasing simulator")]
pub struct Cli {
    /// Optional subcommand (Run, Sequence, Config); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Probability that a biased flip lands on tails (0 < p < 1)
    #[arg(long, short = 'p', global = true)]
    pub bias: Option<f64>,

    /// Number of trials
    #[arg(long, short = 'n', global = true)]
    pub trials: Option<u32>,

    /// Unbiased bits per trial
    #[arg(long, short = 'l', global = true)]
    pub length: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Give up on a bit after this many agreeing pairs
    #[arg(long, global = true)]
    pub max_pairs: Option<u64>,

    /// Output format: human, json
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run a repeated-trial experiment (default)
    Run,
    /// Generate and time a single sequence
    Sequence,
    /// Print the default vonflip.toml
    Config,
}

/// Run the Vonflip CLI with the process arguments.
/// This is the main entry point for the `vonflip` binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Vonflip CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run);
    if command == Commands::Config {
        return write_output(&cli, &VonflipConfig::default_toml());
    }

    // Explicit --config must load; discovery falls back to defaults
    let config = match &cli.config {
        Some(path) => VonflipConfig::load(path)?,
        None => VonflipConfig::discover().unwrap_or_default(),
    };

    let format = resolve_format(&cli, &config)?;
    let mut exec_config = build_execution_config(&cli, &config)?;
    if format == OutputFormat::Json && cli.output.is_none() {
        // Keep the terminal quiet while JSON streams to stdout
        exec_config.show_progress = false;
    }
    let executor = Executor::new(exec_config);

    match command {
        Commands::Sequence => run_sequence(&cli, &executor, format),
        _ => run_experiment(&cli, &executor, format),
    }
}

/// Initialize logging to stderr; `RUST_LOG` overrides the default filter
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "vonflip=debug" } else { "vonflip=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded (tests, host binaries)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_format(cli: &Cli, config: &VonflipConfig) -> anyhow::Result<OutputFormat> {
    let raw = cli.format.as_deref().unwrap_or(&config.output.format);
    raw.parse::<OutputFormat>().map_err(anyhow::Error::msg)
}

/// Build an ExecutionConfig by layering: defaults → vonflip.toml → CLI overrides.
pub fn build_execution_config(cli: &Cli, config: &VonflipConfig) -> anyhow::Result<ExecutionConfig> {
    let source = match cli.bias {
        Some(p) => BiasedSource::new(p)?,
        None => config.experiment.bias,
    };

    let experiment = ExperimentConfig::new(
        cli.trials.unwrap_or(config.experiment.trials),
        cli.length.unwrap_or(config.experiment.sequence_length),
    )?;

    Ok(ExecutionConfig {
        source,
        experiment,
        seed: cli.seed.or(config.experiment.seed),
        max_pairs: cli.max_pairs.or(config.experiment.max_pairs),
        show_progress: config.output.progress && !cli.no_progress,
    })
}

fn run_experiment(cli: &Cli, executor: &Executor, format: OutputFormat) -> anyhow::Result<()> {
    let result = executor.execute()?;
    let report = build_report(&result, executor.config());

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };
    write_output(cli, &output)
}

fn run_sequence(cli: &Cli, executor: &Executor, format: OutputFormat) -> anyhow::Result<()> {
    let trial = executor.execute_sequence()?;
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&trial)?,
        OutputFormat::Human => format_sequence_output(&trial),
    };
    write_output(cli, &output)
}

fn write_output(cli: &Cli, output: &str) -> anyhow::Result<()> {
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        eprintln!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}
