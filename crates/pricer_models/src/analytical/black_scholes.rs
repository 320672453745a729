//! Black-Scholes-Merton pricing model for European options.
//!
//! Closed-form prices and Greeks under lognormal dynamics with a
//! continuous dividend yield. The lattice engines converge to these
//! values for European exercise.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Black-Scholes-Merton model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model with zero dividend yield.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !spot.is_finite() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !volatility.is_finite() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield: zero,
            volatility,
        })
    }

    /// Sets the continuous dividend yield.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidDividendYield` if the yield is negative or not finite.
    pub fn with_dividend_yield(mut self, dividend_yield: T) -> Result<Self, AnalyticalError> {
        if !dividend_yield.is_finite() || dividend_yield < T::zero() {
            return Err(AnalyticalError::InvalidDividendYield {
                dividend_yield: dividend_yield.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let carry = self.rate - self.dividend_yield + half * self.volatility * self.volatility;
        ((self.spot / strike).ln() + carry * expiry) / (self.volatility * expiry.sqrt())
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// Returns the intrinsic value when `expiry <= 0`.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (self.spot - strike).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.forward_weight(expiry) * norm_cdf(d1) - strike * self.discount(expiry) * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// Returns the intrinsic value when `expiry <= 0`.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (strike - self.spot).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * self.discount(expiry) * norm_cdf(-d2) - self.forward_weight(expiry) * norm_cdf(-d1)
    }

    /// Prices a call or put.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let call = bs.price(OptionType::Call, 100.0, 1.0);
    /// assert!((call - 10.4506).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    pub fn delta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let carry = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => carry * n_d1,
            OptionType::Put => carry * (n_d1 - T::one()),
        }
    }

    /// Computes Gamma (∂²V/∂S²), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        let carry = (-self.dividend_yield * expiry).exp();
        carry * norm_pdf(self.d1(strike, expiry)) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// Negative values indicate time decay.
    pub fn theta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let two = T::from(2.0).unwrap();
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let fwd = self.forward_weight(expiry);
        let df = self.discount(expiry);

        let decay = -(fwd * norm_pdf(d1) * self.volatility) / (two * expiry.sqrt());
        match option_type {
            OptionType::Call => {
                decay - self.rate * strike * df * norm_cdf(d2)
                    + self.dividend_yield * fwd * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + self.rate * strike * df * norm_cdf(-d2)
                    - self.dividend_yield * fwd * norm_cdf(-d1)
            }
        }
    }

    #[inline]
    fn discount(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    #[inline]
    fn forward_weight(&self, expiry: T) -> T {
        self.spot * (-self.dividend_yield * expiry).exp()
    }
}
