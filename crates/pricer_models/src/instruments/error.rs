//! Instrument error types.
//!
//! Every variant is a violated precondition, so all of them surface as
//! `PricingError::InvalidArgument`.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Spot price is non-positive or not finite.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Strike price is non-positive or not finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Volatility is non-positive or not finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Time to maturity is non-positive or not finite.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Risk-free rate is not finite.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Continuous dividend yield is negative or not finite.
    #[error("Invalid dividend yield: q = {dividend_yield}")]
    InvalidDividendYield {
        /// The invalid yield value
        dividend_yield: f64,
    },

    /// A cash dividend has a negative or non-finite time or amount.
    #[error("Invalid dividend at t = {time}: amount = {amount}")]
    InvalidDividend {
        /// Payment time in years
        time: f64,
        /// Cash amount
        amount: f64,
    },

    /// A cash dividend is paid after the option expires.
    #[error("Dividend at t = {time} falls outside [0, {expiry}]")]
    DividendBeyondExpiry {
        /// Payment time in years
        time: f64,
        /// Option maturity in years
        expiry: f64,
    },

    /// Dividend times and amounts have different lengths.
    #[error("Dividend schedule mismatch: {times} times but {amounts} amounts")]
    MismatchedDividends {
        /// Number of payment times
        times: usize,
        /// Number of amounts
        amounts: usize,
    },

    /// Option type tag not recognised.
    #[error("Unknown option type: {0} (expected c, p, call or put)")]
    UnknownOptionType(String),

    /// Exercise style tag not recognised.
    #[error("Unknown exercise style: {0} (expected american or european)")]
    UnknownExerciseStyle(String),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            InstrumentError::InvalidSpot { spot: 0.0 }.to_string(),
            "Invalid spot: S = 0"
        );
        assert_eq!(
            InstrumentError::DividendBeyondExpiry {
                time: 1.5,
                expiry: 1.0
            }
            .to_string(),
            "Dividend at t = 1.5 falls outside [0, 1]"
        );
        assert_eq!(
            InstrumentError::UnknownOptionType("x".to_string()).to_string(),
            "Unknown option type: x (expected c, p, call or put)"
        );
    }

    #[test]
    fn test_every_variant_is_invalid_argument() {
        let errors = vec![
            InstrumentError::InvalidStrike { strike: -1.0 },
            InstrumentError::InvalidExpiry { expiry: 0.0 },
            InstrumentError::InvalidRate { rate: f64::NAN },
            InstrumentError::MismatchedDividends {
                times: 1,
                amounts: 2,
            },
            InstrumentError::UnknownExerciseStyle("bermudan".to_string()),
        ];
        for err in errors {
            let pricing: PricingError = err.into();
            assert!(pricing.is_invalid_argument());
        }
    }
}
