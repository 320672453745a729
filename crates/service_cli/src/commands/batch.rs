//! Batch command implementation
//!
//! Reads trades from CSV and prices them in parallel on the no-dividend
//! lattice. A bad row is reported in its own output line and does not stop
//! the rest of the batch.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use pricer_lattice::price_batch;
use pricer_models::instruments::{OptionParams, OptionType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::output::{fixed, fixed_or_dash, render, Tabular};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments for `lattice batch`
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// CSV file with columns id, spot, strike, rate, volatility, maturity,
    /// dividend_yield (optional) and option_type
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Write results here instead of stdout
    #[arg(short = 'w', long)]
    pub output: Option<PathBuf>,

    /// Lattice steps (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,
}

/// One input trade.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    pub option_type: String,
}

impl TradeRecord {
    fn params(&self) -> Result<OptionParams> {
        let option_type: OptionType = self.option_type.parse()?;
        Ok(OptionParams::new(
            self.spot,
            self.strike,
            self.rate,
            self.volatility,
            self.maturity,
            option_type,
        )?
        .with_dividend_yield(self.dividend_yield.unwrap_or(0.0))?)
    }
}

/// Result line for one trade.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub id: String,
    pub option_type: String,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub price: Option<f64>,
    pub degenerate: bool,
    pub error: Option<String>,
}

impl BatchRow {
    fn failed(record: &TradeRecord, err: impl ToString) -> Self {
        Self {
            id: record.id.clone(),
            option_type: record.option_type.clone(),
            spot: record.spot,
            strike: record.strike,
            maturity: record.maturity,
            price: None,
            degenerate: false,
            error: Some(err.to_string()),
        }
    }
}

impl Tabular for BatchRow {
    const HEADERS: &'static [&'static str] = &[
        "Trade ID", "Type", "Spot", "Strike", "T", "Price", "Degenerate", "Error",
    ];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            self.id.clone(),
            self.option_type.clone(),
            fixed(self.spot, precision),
            fixed(self.strike, precision),
            fixed(self.maturity, precision),
            fixed_or_dash(self.price, precision),
            self.degenerate.to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

/// Reads every trade from a CSV file.
pub fn read_trades(path: &Path) -> Result<Vec<TradeRecord>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader
        .deserialize()
        .map(|record| record.map_err(CliError::from))
        .collect()
}

/// Prices already-loaded trades, preserving input order.
pub fn price_trades(
    records: &[TradeRecord],
    config: &CliConfig,
    steps: Option<usize>,
) -> Result<Vec<BatchRow>> {
    let lattice = config.lattice_config(steps)?;

    let parsed: Vec<Result<OptionParams>> = records.iter().map(TradeRecord::params).collect();
    let valid: Vec<OptionParams> = parsed
        .iter()
        .filter_map(|p| p.as_ref().ok().copied())
        .collect();
    let mut valuations = price_batch(&valid, &lattice).into_iter();

    let rows = records
        .iter()
        .zip(parsed)
        .map(|(record, params)| match params {
            Err(err) => {
                warn!(id = %record.id, error = %err, "Skipping invalid trade");
                BatchRow::failed(record, err)
            }
            Ok(_) => match valuations.next() {
                Some(Ok(valuation)) => BatchRow {
                    id: record.id.clone(),
                    option_type: record.option_type.clone(),
                    spot: record.spot,
                    strike: record.strike,
                    maturity: record.maturity,
                    price: Some(valuation.price),
                    degenerate: valuation.is_degenerate(),
                    error: None,
                },
                Some(Err(err)) => BatchRow::failed(record, err),
                None => BatchRow::failed(record, "missing valuation"),
            },
        })
        .collect();

    Ok(rows)
}

/// Run the batch command
pub fn run(args: &BatchArgs, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    info!(input = %args.input.display(), "Loading trades");
    let records = read_trades(&args.input)?;
    let rows = price_trades(&records, config, args.steps)?;

    let failures = rows.iter().filter(|r| r.error.is_some()).count();
    info!(trades = rows.len(), failures, "Batch pricing complete");

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            render(&rows, config.output.format, config.output.precision, &mut file)
        }
        None => render(&rows, config.output.format, config.output.precision, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn record(id: &str, spot: f64, option_type: &str) -> TradeRecord {
        TradeRecord {
            id: id.to_string(),
            spot,
            strike: 72.5,
            rate: 0.048,
            volatility: 0.3453,
            maturity: 99.0 / 365.0,
            dividend_yield: Some(0.02),
            option_type: option_type.to_string(),
        }
    }

    #[test]
    fn test_price_trades_keeps_order_and_errors() {
        let records = vec![
            record("T1", 81.08, "p"),
            record("T2", -5.0, "p"),
            record("T3", 81.08, "x"),
            record("T4", 81.08, "call"),
        ];
        let rows = price_trades(&records, &CliConfig::default(), Some(1000)).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, "T1");
        let put = rows[0].price.unwrap();
        assert!((put - 2.082_993_218_780_485).abs() < 1e-8);
        assert!(rows[1].error.as_deref().unwrap().contains("spot"));
        assert!(rows[2].error.as_deref().unwrap().contains("Unknown option type"));
        let call = rows[3].price.unwrap();
        assert!((call - 11.147_484_790_934_795).abs() < 1e-8);
    }

    #[test]
    fn test_read_and_run() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("lattice-batch-{}.csv", std::process::id()));
        std::fs::write(
            &input,
            "id,spot,strike,rate,volatility,maturity,dividend_yield,option_type\n\
             A,100,100,0.05,0.2,1.0,,p\n\
             B,100,110,0.05,0.2,1.0,0.01,c\n",
        )
        .unwrap();

        let records = read_trades(&input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dividend_yield, None);
        assert_eq!(records[1].dividend_yield, Some(0.01));

        let mut config = CliConfig::default();
        config.output.format = OutputFormat::Csv;
        let args = BatchArgs {
            input: input.clone(),
            output: None,
            steps: Some(100),
        };
        let mut buffer = Vec::new();
        run(&args, &config, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Trade ID,Type,Spot"));

        std::fs::remove_file(&input).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let result = read_trades(Path::new("/nonexistent/trades.csv"));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
