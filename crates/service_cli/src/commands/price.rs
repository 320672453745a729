//! Price command implementation
//!
//! Prices a single option on the no-dividend lattice with a continuous yield.

use std::io::Write;

use clap::Args;
use pricer_lattice::{BinomialPricer, LatticeConfig, LatticeGreeks, LatticeValuation};
use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
use serde::Serialize;
use tracing::info;

use super::inputs::MaturityArgs;
use super::output::{fixed, fixed_or_dash, render, Tabular};
use crate::config::CliConfig;
use crate::Result;

/// Arguments for `lattice price`
#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
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

    /// Continuous dividend yield
    #[arg(short = 'q', long, default_value_t = 0.0)]
    pub dividend_yield: f64,

    /// Option type: c, p, call or put
    #[arg(short = 'o', long, default_value = "p")]
    pub option_type: OptionType,

    #[command(flatten)]
    pub maturity: MaturityArgs,

    /// Lattice steps (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Exercise style: american or european
    #[arg(short = 'e', long)]
    pub exercise: Option<ExerciseStyle>,

    /// Also report lattice delta, gamma and theta
    #[arg(long)]
    pub greeks: bool,
}

/// One priced option.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationRow {
    pub option_type: OptionType,
    pub exercise: ExerciseStyle,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub steps: usize,
    pub price: f64,
    pub probability: f64,
    pub degenerate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeks: Option<LatticeGreeks>,
}

impl ValuationRow {
    fn new(
        params: &OptionParams,
        config: &LatticeConfig,
        valuation: &LatticeValuation,
        greeks: Option<LatticeGreeks>,
    ) -> Self {
        Self {
            option_type: params.option_type(),
            exercise: config.exercise(),
            spot: params.spot(),
            strike: params.strike(),
            maturity: params.maturity(),
            steps: config.steps(),
            price: valuation.price,
            probability: valuation.parameters.probability,
            degenerate: valuation.is_degenerate(),
            greeks,
        }
    }
}

impl Tabular for ValuationRow {
    const HEADERS: &'static [&'static str] = &[
        "Type", "Exercise", "Spot", "Strike", "T", "Steps", "Price", "p", "Degenerate", "Delta",
        "Gamma", "Theta",
    ];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            self.option_type.to_string(),
            self.exercise.to_string(),
            fixed(self.spot, precision),
            fixed(self.strike, precision),
            fixed(self.maturity, precision),
            self.steps.to_string(),
            fixed(self.price, precision),
            fixed(self.probability, precision),
            self.degenerate.to_string(),
            fixed_or_dash(self.greeks.map(|g| g.delta), precision),
            fixed_or_dash(self.greeks.map(|g| g.gamma), precision),
            fixed_or_dash(self.greeks.map(|g| g.theta), precision),
        ]
    }
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let maturity = args.maturity.resolve(config.pricing.day_count)?;
    let params = OptionParams::new(
        args.spot,
        args.strike,
        args.rate,
        args.volatility,
        maturity,
        args.option_type,
    )?
    .with_dividend_yield(args.dividend_yield)?;

    let mut lattice = config.lattice_config(args.steps)?;
    if let Some(exercise) = args.exercise {
        lattice = lattice.with_exercise(exercise);
    }

    info!(
        option_type = %params.option_type(),
        exercise = %lattice.exercise(),
        steps = lattice.steps(),
        maturity,
        "Pricing option"
    );

    let pricer = BinomialPricer::new(lattice);
    let (valuation, greeks) = if args.greeks {
        let (valuation, greeks) = pricer.price_with_greeks(&params)?;
        (valuation, Some(greeks))
    } else {
        (pricer.price(&params)?, None)
    };

    info!(price = valuation.price, "Pricing complete");

    let row = ValuationRow::new(&params, &lattice, &valuation, greeks);
    render(&[row], config.output.format, config.output.precision, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn literal_args() -> PriceArgs {
        PriceArgs {
            spot: 81.08,
            strike: 72.5,
            rate: 0.048,
            volatility: 0.3453,
            dividend_yield: 0.02,
            option_type: OptionType::Put,
            maturity: MaturityArgs {
                maturity_days: Some(99.0),
                ..Default::default()
            },
            steps: Some(1000),
            exercise: None,
            greeks: false,
        }
    }

    fn run_to_string(args: &PriceArgs, config: &CliConfig) -> String {
        let mut buffer = Vec::new();
        run(args, config, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_literal_scenario_table() {
        let text = run_to_string(&literal_args(), &CliConfig::default());
        assert!(text.contains("2.082993"));
        assert!(text.contains("Put"));
        assert!(text.contains("american"));
    }

    #[test]
    fn test_json_with_greeks() {
        let mut config = CliConfig::default();
        config.output.format = OutputFormat::Json;
        let args = PriceArgs {
            greeks: true,
            steps: Some(200),
            ..literal_args()
        };
        let text = run_to_string(&args, &config);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let delta = value[0]["greeks"]["delta"].as_f64().unwrap();
        assert!(delta < 0.0 && delta > -1.0);
        assert_eq!(value[0]["degenerate"], false);
    }

    #[test]
    fn test_european_override() {
        let mut config = CliConfig::default();
        config.output.format = OutputFormat::Csv;
        let args = PriceArgs {
            exercise: Some(ExerciseStyle::European),
            steps: Some(100),
            ..literal_args()
        };
        let text = run_to_string(&args, &config);
        assert!(text.lines().nth(1).unwrap().contains("european"));
    }

    #[test]
    fn test_invalid_inputs_fail() {
        let args = PriceArgs {
            spot: -1.0,
            ..literal_args()
        };
        let mut buffer = Vec::new();
        assert!(run(&args, &CliConfig::default(), &mut buffer).is_err());

        let args = PriceArgs {
            steps: Some(0),
            ..literal_args()
        };
        assert!(run(&args, &CliConfig::default(), &mut buffer).is_err());
        assert!(buffer.is_empty());
    }
}
