//! Shared argument parsing: maturities and dividend schedules.

use clap::Args;
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::{CashDividend, DividendSchedule};

use crate::{CliError, Result};

/// Time to maturity, given in exactly one of three ways.
#[derive(Args, Debug, Clone, Default)]
pub struct MaturityArgs {
    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Time to maturity in days, converted on the configured day count's year basis
    #[arg(long)]
    pub maturity_days: Option<f64>,

    /// Expiry date (YYYY-MM-DD); requires --valuation-date
    #[arg(long)]
    pub expiry: Option<Date>,

    /// Valuation date (YYYY-MM-DD) for --expiry and dated dividends
    #[arg(long)]
    pub valuation_date: Option<Date>,
}

impl MaturityArgs {
    /// Resolves the maturity in years.
    pub fn resolve(&self, day_count: DayCountConvention) -> Result<f64> {
        match (self.maturity, self.maturity_days, self.expiry) {
            (Some(years), None, None) => Ok(years),
            (None, Some(days), None) => Ok(day_count.days_to_years(days)),
            (None, None, Some(expiry)) => {
                let valuation = self.valuation_date.ok_or_else(|| {
                    CliError::InvalidArgument("--expiry requires --valuation-date".to_string())
                })?;
                Ok(day_count.year_fraction(valuation, expiry))
            }
            (None, None, None) => Err(CliError::InvalidArgument(
                "one of --maturity, --maturity-days or --expiry is required".to_string(),
            )),
            _ => Err(CliError::InvalidArgument(
                "--maturity, --maturity-days and --expiry are mutually exclusive".to_string(),
            )),
        }
    }
}

/// Discrete dividends from the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct DividendArgs {
    /// Dividend as OFFSET:AMOUNT (years) or YYYY-MM-DD:AMOUNT; repeatable
    #[arg(short = 'd', long = "dividend")]
    pub dividends: Vec<String>,

    /// Dividend payment offsets in years, comma separated
    #[arg(long, value_delimiter = ',')]
    pub div_times: Vec<f64>,

    /// Dividend amounts matching --div-times, comma separated
    #[arg(long, value_delimiter = ',')]
    pub div_amounts: Vec<f64>,
}

impl DividendArgs {
    /// Builds the schedule from both argument forms.
    pub fn schedule(
        &self,
        valuation: Option<Date>,
        day_count: DayCountConvention,
    ) -> Result<DividendSchedule> {
        let mut dividends: Vec<CashDividend> =
            DividendSchedule::from_pairs(&self.div_times, &self.div_amounts)?
                .iter()
                .copied()
                .collect();
        for entry in &self.dividends {
            dividends.push(parse_dividend(entry, valuation, day_count)?);
        }
        Ok(DividendSchedule::new(dividends))
    }
}

/// Parses `OFFSET:AMOUNT` or `YYYY-MM-DD:AMOUNT`.
pub fn parse_dividend(
    entry: &str,
    valuation: Option<Date>,
    day_count: DayCountConvention,
) -> Result<CashDividend> {
    let (when, amount) = entry.split_once(':').ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "dividend '{}' must look like OFFSET:AMOUNT or YYYY-MM-DD:AMOUNT",
            entry
        ))
    })?;

    let amount: f64 = amount.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!("dividend amount '{}' is not a number", amount))
    })?;

    let time = match when.trim().parse::<f64>() {
        Ok(offset) => offset,
        Err(_) => {
            let date = Date::parse(when)?;
            let valuation = valuation.ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "dated dividend '{}' requires --valuation-date",
                    entry
                ))
            })?;
            day_count.year_fraction(valuation, date)
        }
    };

    Ok(CashDividend::new(time, amount)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_maturity_forms() {
        let dc = DayCountConvention::Actual365Fixed;
        let years = MaturityArgs {
            maturity: Some(0.5),
            ..Default::default()
        };
        assert_eq!(years.resolve(dc).unwrap(), 0.5);

        let days = MaturityArgs {
            maturity_days: Some(99.0),
            ..Default::default()
        };
        assert_relative_eq!(days.resolve(dc).unwrap(), 99.0 / 365.0, epsilon = 1e-15);

        let dated = MaturityArgs {
            expiry: Some(Date::from_ymd(2024, 12, 16).unwrap()),
            valuation_date: Some(Date::from_ymd(2024, 9, 8).unwrap()),
            ..Default::default()
        };
        assert_relative_eq!(dated.resolve(dc).unwrap(), 99.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_maturity_days_follow_day_count() {
        let days = MaturityArgs {
            maturity_days: Some(90.0),
            ..Default::default()
        };
        assert_relative_eq!(
            days.resolve(DayCountConvention::Actual360).unwrap(),
            0.25,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            days.resolve(DayCountConvention::Actual365Fixed).unwrap(),
            90.0 / 365.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_maturity_errors() {
        let dc = DayCountConvention::Actual365Fixed;
        assert!(MaturityArgs::default().resolve(dc).is_err());

        let both = MaturityArgs {
            maturity: Some(1.0),
            maturity_days: Some(365.0),
            ..Default::default()
        };
        assert!(both.resolve(dc).is_err());

        let undated = MaturityArgs {
            expiry: Some(Date::from_ymd(2025, 1, 1).unwrap()),
            ..Default::default()
        };
        assert!(undated.resolve(dc).is_err());
    }

    #[test]
    fn test_parse_offset_dividend() {
        let div = parse_dividend("0.25:1.5", None, DayCountConvention::Actual365Fixed).unwrap();
        assert_eq!(div.time(), 0.25);
        assert_eq!(div.amount(), 1.5);
    }

    #[test]
    fn test_parse_dated_dividend() {
        let valuation = Date::from_ymd(2024, 1, 1).unwrap();
        let div = parse_dividend(
            "2024-07-01:0.8",
            Some(valuation),
            DayCountConvention::Thirty360,
        )
        .unwrap();
        assert_relative_eq!(div.time(), 0.5, epsilon = 1e-15);
        assert!(parse_dividend("2024-07-01:0.8", None, DayCountConvention::Thirty360).is_err());
    }

    #[test]
    fn test_parse_dividend_errors() {
        let dc = DayCountConvention::Actual365Fixed;
        assert!(parse_dividend("0.25", None, dc).is_err());
        assert!(parse_dividend("0.25:abc", None, dc).is_err());
        assert!(parse_dividend("0.25:-1", None, dc).is_err());
        assert!(parse_dividend("soon:1", None, dc).is_err());
    }

    #[test]
    fn test_schedule_combines_forms() {
        let args = DividendArgs {
            dividends: vec!["0.75:2".to_string()],
            div_times: vec![0.25],
            div_amounts: vec![1.0],
        };
        let schedule = args
            .schedule(None, DayCountConvention::Actual365Fixed)
            .unwrap();
        assert_eq!(schedule.times(), vec![0.25, 0.75]);

        let mismatched = DividendArgs {
            div_times: vec![0.25, 0.5],
            div_amounts: vec![1.0],
            ..Default::default()
        };
        assert!(mismatched
            .schedule(None, DayCountConvention::Actual365Fixed)
            .is_err());
    }
}
