//! Validated option parameters.

use super::error::InstrumentError;
use super::payoff::OptionType;

/// Market and contract inputs for a single vanilla option.
///
/// Construction validates every field, so engines consuming an
/// `OptionParams` can skip their own argument checks.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionParams, OptionType};
///
/// let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
/// assert_eq!(params.dividend_yield(), 0.0);
///
/// let invalid = OptionParams::new(100.0, 100.0, 0.05, 0.0, 1.0, OptionType::Call);
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    dividend_yield: f64,
    option_type: OptionType,
}

impl OptionParams {
    /// Creates validated option parameters with zero continuous yield.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price (positive, finite)
    /// * `strike` - Strike price (positive, finite)
    /// * `rate` - Continuously compounded risk-free rate (finite, may be negative)
    /// * `volatility` - Annualised volatility (positive, finite)
    /// * `maturity` - Time to maturity in years (positive, finite)
    /// * `option_type` - Call or Put
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate });
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(InstrumentError::InvalidVolatility { volatility });
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(InstrumentError::InvalidExpiry { expiry: maturity });
        }

        Ok(Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
            dividend_yield: 0.0,
            option_type,
        })
    }

    /// Sets the continuous dividend yield (finite, non-negative).
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, InstrumentError> {
        if !dividend_yield.is_finite() || dividend_yield < 0.0 {
            return Err(InstrumentError::InvalidDividendYield { dividend_yield });
        }
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Returns a copy with a different spot, revalidated.
    pub fn with_spot(self, spot: f64) -> Result<Self, InstrumentError> {
        Self::new(
            spot,
            self.strike,
            self.rate,
            self.volatility,
            self.maturity,
            self.option_type,
        )?
        .with_dividend_yield(self.dividend_yield)
    }

    /// Returns a copy with a different strike, revalidated.
    pub fn with_strike(self, strike: f64) -> Result<Self, InstrumentError> {
        Self::new(
            self.spot,
            strike,
            self.rate,
            self.volatility,
            self.maturity,
            self.option_type,
        )?
        .with_dividend_yield(self.dividend_yield)
    }

    /// Returns a copy with the other payoff type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Current underlying price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Call or Put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }
}
