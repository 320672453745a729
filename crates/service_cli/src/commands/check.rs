//! Check command implementation
//!
//! Prices a few contracts whose lattice value is known in closed form and
//! fails if the lattice strays from the Black-Scholes value.

use std::io::Write;

use clap::Args;
use pricer_lattice::{BinomialPricer, LatticeConfig};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
use serde::Serialize;
use tracing::{info, warn};

use super::output::{fixed, render, Tabular};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments for `lattice check`
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Largest acceptable relative error
    #[arg(long, default_value_t = 1e-2)]
    pub tolerance: f64,

    /// Lattice steps (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,
}

/// One lattice/closed-form comparison.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRow {
    pub case: &'static str,
    pub lattice: f64,
    pub analytic: f64,
    pub relative_error: f64,
    pub passed: bool,
}

impl Tabular for CheckRow {
    const HEADERS: &'static [&'static str] =
        &["Case", "Lattice", "Black-Scholes", "Rel. error", "Status"];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            self.case.to_string(),
            fixed(self.lattice, precision),
            fixed(self.analytic, precision),
            format!("{:.2e}", self.relative_error),
            if self.passed { "ok" } else { "FAILED" }.to_string(),
        ]
    }
}

struct Case {
    name: &'static str,
    option_type: OptionType,
    exercise: ExerciseStyle,
    dividend_yield: f64,
}

// Early exercise never pays for these, so the closed form applies.
const CASES: [Case; 3] = [
    Case {
        name: "european call",
        option_type: OptionType::Call,
        exercise: ExerciseStyle::European,
        dividend_yield: 0.0,
    },
    Case {
        name: "american call, no yield",
        option_type: OptionType::Call,
        exercise: ExerciseStyle::American,
        dividend_yield: 0.0,
    },
    Case {
        name: "european put, 3% yield",
        option_type: OptionType::Put,
        exercise: ExerciseStyle::European,
        dividend_yield: 0.03,
    },
];

/// Runs every comparison and returns the rows.
pub fn compare(config: &LatticeConfig, tolerance: f64) -> Result<Vec<CheckRow>> {
    let (spot, strike, rate, volatility, maturity) = (100.0, 100.0, 0.05, 0.2, 1.0);

    CASES
        .iter()
        .map(|case| {
            let params =
                OptionParams::new(spot, strike, rate, volatility, maturity, case.option_type)?
                    .with_dividend_yield(case.dividend_yield)?;
            let lattice = BinomialPricer::new(config.with_exercise(case.exercise))
                .price(&params)?
                .price;
            let analytic = BlackScholes::new(spot, rate, volatility)?
                .with_dividend_yield(case.dividend_yield)?
                .price(case.option_type, strike, maturity);
            let relative_error = ((lattice - analytic) / analytic).abs();
            Ok(CheckRow {
                case: case.name,
                lattice,
                analytic,
                relative_error,
                passed: relative_error <= tolerance,
            })
        })
        .collect()
}

/// Run the check command
pub fn run(args: &CheckArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let lattice = config.lattice_config(args.steps)?;
    info!(steps = lattice.steps(), tolerance = args.tolerance, "Running lattice self-check");

    let rows = compare(&lattice, args.tolerance)?;
    render(&rows, config.output.format, config.output.precision, out)?;

    let failed: Vec<&str> = rows.iter().filter(|r| !r.passed).map(|r| r.case).collect();
    if failed.is_empty() {
        info!("All checks passed");
        Ok(())
    } else {
        warn!(failed = failed.len(), "Lattice self-check failed");
        Err(CliError::CheckFailed(failed.join(", ")))
    }
}
