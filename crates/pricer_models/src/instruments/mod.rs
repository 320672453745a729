//! Option contract definitions.
//!
//! This module provides the validated inputs the lattice engines consume:
//! - [`OptionType`]: Call or Put, parsed from driver tags such as `"c"`/`"p"`
//! - [`ExerciseStyle`]: European or American
//! - [`OptionParams`]: spot, strike, rate, volatility, maturity and continuous yield
//! - [`DividendSchedule`]: discrete cash dividends with present-value helpers
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{CashDividend, DividendSchedule, OptionParams, OptionType};
//!
//! let params = OptionParams::new(81.08, 72.5, 0.048, 0.3453, 99.0 / 365.0, OptionType::Put)
//!     .unwrap()
//!     .with_dividend_yield(0.02)
//!     .unwrap();
//! assert_eq!(params.option_type(), OptionType::Put);
//!
//! let schedule = DividendSchedule::new(vec![CashDividend::new(0.1, 0.5).unwrap()]);
//! assert!(schedule.check_horizon(params.maturity()).is_ok());
//! ```

mod dividends;
mod error;
mod exercise;
mod params;
mod payoff;

pub use dividends::{CashDividend, DividendSchedule};
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use params::OptionParams;
pub use payoff::OptionType;
