//! Dividend command implementation
//!
//! Prices on the full lattice with discrete cash dividends and can print the
//! option-value and early-exercise lattices.

use std::io::Write;

use clap::{Args, ValueEnum};
use pricer_lattice::{DividendLattice, DividendMode, DividendPricer};
use pricer_models::instruments::OptionType;
use serde::Serialize;
use tracing::info;

use super::inputs::{DividendArgs, MaturityArgs};
use super::output::{fixed, render, Tabular};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Dividend treatment selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeArg {
    /// Scalar escrow shortcut, put-style exercise test
    #[default]
    Reference,
    /// Per-node escrowed dividends for the chosen option type
    Escrowed,
}

/// Arguments for `lattice dividend`
#[derive(Args, Debug, Clone)]
pub struct DividendCommandArgs {
    /// Spot price of the underlying
    #[arg(short = 's', long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Continuously compounded risk-free rate
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long, visible_alias = "sigma")]
    pub volatility: f64,

    #[command(flatten)]
    pub maturity: MaturityArgs,

    #[command(flatten)]
    pub dividends: DividendArgs,

    /// Lattice steps (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Dividend treatment
    #[arg(short = 'm', long, value_enum, default_value_t = ModeArg::Reference)]
    pub mode: ModeArg,

    /// Option type for escrowed mode: c, p, call or put
    #[arg(short = 'o', long, default_value = "p")]
    pub option_type: OptionType,

    /// Print the option-value and early-exercise lattices
    #[arg(long)]
    pub show_lattice: bool,
}

impl DividendCommandArgs {
    fn dividend_mode(&self) -> DividendMode {
        match self.mode {
            ModeArg::Reference => DividendMode::Reference,
            ModeArg::Escrowed => DividendMode::Escrowed(self.option_type),
        }
    }
}

/// Summary of one full-lattice valuation.
#[derive(Debug, Clone, Serialize)]
pub struct DividendRow {
    pub mode: DividendMode,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub steps: usize,
    pub dividend_pv: f64,
    pub price: f64,
    pub probability: f64,
    pub degenerate: bool,
    pub exercise_nodes: usize,
}

impl DividendRow {
    fn new(spot: f64, strike: f64, maturity: f64, lattice: &DividendLattice) -> Self {
        Self {
            mode: lattice.mode,
            spot,
            strike,
            maturity,
            steps: lattice.steps(),
            dividend_pv: lattice.dividend_present_value,
            price: lattice.price(),
            probability: lattice.parameters.probability,
            degenerate: lattice.is_degenerate(),
            exercise_nodes: lattice.exercise_count(),
        }
    }
}

impl Tabular for DividendRow {
    const HEADERS: &'static [&'static str] = &[
        "Mode", "Spot", "Strike", "T", "Steps", "Div PV", "Price", "p", "Degenerate", "Exercise nodes",
    ];

    fn cells(&self, precision: usize) -> Vec<String> {
        let mode = match self.mode {
            DividendMode::Reference => "reference".to_string(),
            DividendMode::Escrowed(option_type) => format!("escrowed {}", option_type),
        };
        vec![
            mode,
            fixed(self.spot, precision),
            fixed(self.strike, precision),
            fixed(self.maturity, precision),
            self.steps.to_string(),
            fixed(self.dividend_pv, precision),
            fixed(self.price, precision),
            fixed(self.probability, precision),
            self.degenerate.to_string(),
            self.exercise_nodes.to_string(),
        ]
    }
}

#[derive(Serialize)]
struct LatticeDump<'a> {
    summary: &'a DividendRow,
    option_values: Vec<Vec<f64>>,
    early_exercise: Vec<Vec<u8>>,
}

/// Run the dividend command
pub fn run(args: &DividendCommandArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let day_count = config.pricing.day_count;
    let maturity = args.maturity.resolve(day_count)?;
    let schedule = args
        .dividends
        .schedule(args.maturity.valuation_date, day_count)?;

    let lattice_config = config.lattice_config(args.steps)?;
    let pricer = DividendPricer::new(lattice_config, args.dividend_mode())?;

    info!(
        mode = ?pricer.mode(),
        steps = lattice_config.steps(),
        dividends = schedule.len(),
        "Building dividend lattice"
    );

    let lattice = pricer.price(
        args.spot,
        args.strike,
        args.rate,
        maturity,
        args.volatility,
        &schedule,
    )?;
    let row = DividendRow::new(args.spot, args.strike, maturity, &lattice);

    info!(price = row.price, exercise_nodes = row.exercise_nodes, "Pricing complete");

    if !args.show_lattice {
        return render(&[row], config.output.format, config.output.precision, out);
    }

    let flags: Vec<Vec<u8>> = lattice
        .early_exercise
        .rows()
        .map(|r| r.iter().map(|&f| u8::from(f)).collect())
        .collect();

    match config.output.format {
        OutputFormat::Json => {
            let dump = LatticeDump {
                summary: &row,
                option_values: lattice.option_values.to_nested(),
                early_exercise: flags,
            };
            serde_json::to_writer_pretty(&mut *out, &dump)?;
            writeln!(out)?;
        }
        OutputFormat::Table | OutputFormat::Csv => {
            render(&[row], config.output.format, config.output.precision, out)?;
            writeln!(out, "\nOption values:")?;
            for values in lattice.option_values.rows() {
                let cells: Vec<String> = values
                    .iter()
                    .map(|v| fixed(*v, config.output.precision))
                    .collect();
                writeln!(out, "[{}]", cells.join(", "))?;
            }
            writeln!(out, "\nEarly exercise:")?;
            for row in &flags {
                let cells: Vec<String> = row.iter().map(u8::to_string).collect();
                writeln!(out, "[{}]", cells.join(", "))?;
            }
        }
    }
    Ok(())
}
