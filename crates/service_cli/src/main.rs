//! Lattice CLI - Command Line Operations for Binomial Option Pricing
//!
//! This is the operational entry point for the lattice pricing workspace.
//!
//! # Commands
//!
//! - `lattice price` - Price an option with a continuous dividend yield
//! - `lattice dividend` - Price on the full lattice with discrete cash dividends
//! - `lattice batch --input <file>` - Price a CSV of trades in parallel
//! - `lattice check` - Compare lattice prices against Black-Scholes
//!
//! # Example
//!
//! ```text
//! lattice price -n 1000 -s 81.08 -k 72.5 -r 0.048 --sigma 0.3453 --maturity-days 99 -q 0.02 -o p
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, ConfigArgs, LogLevel, OutputFormat};

/// Binomial lattice option pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./lattice.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format: table, json or csv
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Decimals in table and CSV output
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_args(&self) -> ConfigArgs {
        let log_level = if self.verbose {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        };
        let steps = match &self.command {
            Commands::Price(args) => args.steps,
            Commands::Dividend(args) => args.steps,
            Commands::Batch(args) => args.steps,
            Commands::Check(args) => args.steps,
        };
        ConfigArgs {
            config_file: self.config.clone(),
            log_level,
            steps,
            format: self.format,
            precision: self.precision,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option on the no-dividend lattice with a continuous yield
    Price(commands::price::PriceArgs),

    /// Price on the full lattice with discrete cash dividends
    Dividend(commands::dividend::DividendCommandArgs),

    /// Price a CSV file of trades in parallel
    Batch(commands::batch::BatchArgs),

    /// Compare lattice prices with Black-Scholes
    Check(commands::check::CheckArgs),
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args()).context("failed to load configuration")?;

    init_tracing(config.log_level.as_filter_str());
    info!("Lattice CLI v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        steps = config.pricing.steps,
        exercise = %config.pricing.exercise,
        degeneracy = %config.pricing.degeneracy,
        day_count = %config.pricing.day_count,
        format = %config.output.format,
        precision = config.output.precision,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config, &mut out),
        Commands::Dividend(args) => commands::dividend::run(args, &config, &mut out),
        Commands::Batch(args) => commands::batch::run(args, &config, &mut out),
        Commands::Check(args) => commands::check::run(args, &config, &mut out),
    }
    .context("command failed")?;

    Ok(())
}
