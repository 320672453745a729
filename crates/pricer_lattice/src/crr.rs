//! Cox-Ross-Rubinstein pricer for options on an underlying with a
//! continuous dividend yield.
//!
//! Only the current value layer is kept, so memory is O(steps) while time
//! is O(steps²). Node `(j, i)` sits at time step `j` after `i` up moves and
//! has price `S·u^i·d^(j-i)`, evaluated in log space.

use pricer_models::instruments::{OptionParams, OptionType};

use crate::config::{validate_steps, LatticeConfig, MAX_STEPS};
use crate::error::LatticeError;
use crate::greeks::{EarlyLayers, LatticeGreeks};
use crate::params::LatticeParameters;

/// Price and lattice diagnostics from a single valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeValuation {
    /// Option value at the root node
    pub price: f64,
    /// Lattice the value was computed on
    pub parameters: LatticeParameters,
}

impl LatticeValuation {
    /// Returns whether the risk-neutral probability was outside (0, 1).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.parameters.is_degenerate()
    }
}

/// Binomial pricer for options on an underlying paying a continuous yield.
///
/// # Examples
/// ```
/// use pricer_lattice::{BinomialPricer, LatticeConfig};
/// use pricer_models::instruments::{OptionParams, OptionType};
///
/// let config = LatticeConfig::american(500).unwrap();
/// let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Put).unwrap();
///
/// let valuation = BinomialPricer::new(config).price(&params).unwrap();
/// assert!(valuation.price > params.intrinsic());
/// assert!(!valuation.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinomialPricer {
    config: LatticeConfig,
}

impl BinomialPricer {
    /// Creates a pricer with the given configuration.
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Prices the option at the root of the lattice.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an out-of-range step count, and
    /// `NumericalDegeneracy` when the lattice is degenerate under
    /// `DegeneracyPolicy::Reject`.
    pub fn price(&self, params: &OptionParams) -> Result<LatticeValuation, LatticeError> {
        self.config.validate()?;
        let parameters = self.lattice(params)?;
        let price = self.roll_back(params, &parameters, None);
        Ok(LatticeValuation { price, parameters })
    }

    /// Prices the option and reads delta, gamma and theta off the lattice.
    ///
    /// # Errors
    ///
    /// As [`BinomialPricer::price`], plus `InvalidArgument` when fewer than
    /// two steps are configured.
    pub fn price_with_greeks(
        &self,
        params: &OptionParams,
    ) -> Result<(LatticeValuation, LatticeGreeks), LatticeError> {
        self.config.validate()?;
        if self.config.steps() < 2 {
            return Err(LatticeError::invalid(
                "steps",
                "lattice Greeks need at least 2 steps",
            ));
        }
        let parameters = self.lattice(params)?;
        let mut layers = EarlyLayers::default();
        let price = self.roll_back(params, &parameters, Some(&mut layers));
        let greeks = layers.greeks(params.spot(), price, &parameters);
        Ok((LatticeValuation { price, parameters }, greeks))
    }

    fn lattice(&self, params: &OptionParams) -> Result<LatticeParameters, LatticeError> {
        let parameters = LatticeParameters::derive(
            params.maturity(),
            self.config.steps(),
            params.volatility(),
            params.rate(),
            params.dividend_yield(),
        );
        parameters.enforce(self.config.degeneracy_policy())?;
        Ok(parameters)
    }

    fn roll_back(
        &self,
        params: &OptionParams,
        lattice: &LatticeParameters,
        mut capture: Option<&mut EarlyLayers>,
    ) -> f64 {
        let steps = self.config.steps();
        let early_exercise = self.config.exercise().allows_early_exercise();
        let option_type = params.option_type();
        let (spot, strike) = (params.spot(), params.strike());
        let (p, disc) = (lattice.probability, lattice.discount);

        // Terminal payoffs, leaf i after i up moves
        let mut values: Vec<f64> = (0..=steps)
            .map(|i| option_type.intrinsic(lattice.node_price(spot, i, steps - i), strike))
            .collect();

        for j in (0..steps).rev() {
            for i in 0..=j {
                let continuation = disc * (p * values[i + 1] + (1.0 - p) * values[i]);
                values[i] = if early_exercise {
                    let node = lattice.node_price(spot, i, j - i);
                    continuation.max(option_type.exercise_value(node, strike))
                } else {
                    continuation
                };
            }
            if let Some(layers) = capture.as_deref_mut() {
                layers.record(j, &values[..=j]);
            }
        }

        values[0]
    }
}

/// Prices an American option on the no-dividend lattice.
///
/// Inputs are validated before any work is done; `continuous_yield` must be
/// finite and non-negative. The risk-neutral probability is not clamped: a
/// degenerate lattice logs a warning and still returns a value. Use
/// [`BinomialPricer`] with `DegeneracyPolicy::Reject` to fail instead, or
/// read [`LatticeValuation::parameters`] to inspect it.
///
/// # Examples
/// ```
/// use pricer_lattice::american_option_price;
/// use pricer_models::instruments::OptionType;
///
/// let price = american_option_price(
///     1000, 81.08, 72.5, 0.048, 0.3453, 99.0 / 365.0, 0.02, OptionType::Put,
/// )
/// .unwrap();
/// assert!((price - 2.082_993_218_780_485).abs() < 1e-8);
///
/// assert!(american_option_price(0, 81.08, 72.5, 0.048, 0.3453, 1.0, 0.02, OptionType::Put).is_err());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn american_option_price(
    steps: usize,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    continuous_yield: f64,
    option_type: OptionType,
) -> Result<f64, LatticeError> {
    validate_steps(steps, MAX_STEPS)?;
    let params = OptionParams::new(spot, strike, rate, volatility, maturity, option_type)?
        .with_dividend_yield(continuous_yield)?;
    let config = LatticeConfig::american(steps)?;
    Ok(BinomialPricer::new(config).price(&params)?.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DegeneracyPolicy;
    use approx::assert_relative_eq;
    use pricer_models::instruments::ExerciseStyle;

    fn three_step_put() -> OptionParams {
        OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Put).unwrap()
    }

    #[test]
    fn test_three_step_american_put() {
        let config = LatticeConfig::american(3).unwrap();
        let valuation = BinomialPricer::new(config).price(&three_step_put()).unwrap();
        assert_relative_eq!(valuation.price, 6.499_559_886_616_256, max_relative = 1e-12);
    }

    #[test]
    fn test_three_step_european_put() {
        let config = LatticeConfig::builder()
            .steps(3)
            .exercise(ExerciseStyle::European)
            .build()
            .unwrap();
        let valuation = BinomialPricer::new(config).price(&three_step_put()).unwrap();
        assert_relative_eq!(valuation.price, 6.166_813_542_022_532, max_relative = 1e-12);
    }

    #[test]
    fn test_single_step_matches_hand_calculation() {
        let params = three_step_put();
        let config = LatticeConfig::american(1).unwrap();
        let valuation = BinomialPricer::new(config).price(&params).unwrap();

        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (0.05_f64.exp() - d) / (u - d);
        let continuation = (-0.05_f64).exp() * (1.0 - p) * (100.0 - 100.0 * d);
        assert_relative_eq!(valuation.price, continuation, max_relative = 1e-14);
    }

    #[test]
    fn test_literal_put_in_year_units() {
        let price =
            american_option_price(1000, 81.08, 72.5, 0.048, 0.3453, 99.0 / 365.0, 0.02, OptionType::Put)
                .unwrap();
        assert_relative_eq!(price, 2.082_993_218_780_485, max_relative = 1e-9);
    }

    #[test]
    fn test_literal_put_in_day_units() {
        let price =
            american_option_price(1000, 81.08, 72.5, 0.048, 0.3453, 99.0, 0.02, OptionType::Put)
                .unwrap();
        assert_relative_eq!(price, 21.778_896_517_520_43, max_relative = 1e-9);
    }

    #[test]
    fn test_literal_call() {
        let price =
            american_option_price(1000, 81.08, 72.5, 0.048, 0.3453, 99.0 / 365.0, 0.02, OptionType::Call)
                .unwrap();
        assert_relative_eq!(price, 11.147_484_790_934_795, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_arguments() {
        let put = OptionType::Put;
        let cases = [
            american_option_price(0, 100.0, 100.0, 0.05, 0.2, 1.0, 0.0, put),
            american_option_price(10, 0.0, 100.0, 0.05, 0.2, 1.0, 0.0, put),
            american_option_price(10, 100.0, -5.0, 0.05, 0.2, 1.0, 0.0, put),
            american_option_price(10, 100.0, 100.0, 0.05, 0.0, 1.0, 0.0, put),
            american_option_price(10, 100.0, 100.0, 0.05, 0.2, 0.0, 0.0, put),
            american_option_price(10, 100.0, 100.0, 0.05, 0.2, 1.0, -0.01, put),
            american_option_price(10, f64::NAN, 100.0, 0.05, 0.2, 1.0, 0.0, put),
        ];
        for result in cases {
            assert!(matches!(result, Err(LatticeError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_degenerate_lattice_is_priced_and_flagged() {
        let params = OptionParams::new(100.0, 100.0, 0.05, 1e-4, 1.0, OptionType::Put).unwrap();
        let config = LatticeConfig::american(10).unwrap();
        let valuation = BinomialPricer::new(config).price(&params).unwrap();
        assert!(valuation.is_degenerate());
        assert!(valuation.price.is_finite());
    }

    #[test]
    fn test_degenerate_lattice_rejected_on_request() {
        let params = OptionParams::new(100.0, 100.0, 0.05, 1e-4, 1.0, OptionType::Put).unwrap();
        let config = LatticeConfig::builder()
            .steps(10)
            .degeneracy_policy(DegeneracyPolicy::Reject)
            .build()
            .unwrap();
        let result = BinomialPricer::new(config).price(&params);
        assert!(matches!(
            result,
            Err(LatticeError::NumericalDegeneracy { .. })
        ));
    }

    #[test]
    fn test_greeks_three_steps() {
        let config = LatticeConfig::american(3).unwrap();
        let (valuation, greeks) = BinomialPricer::new(config)
            .price_with_greeks(&three_step_put())
            .unwrap();
        assert_relative_eq!(valuation.price, 6.499_559_886_616_256, max_relative = 1e-12);
        assert_relative_eq!(greeks.delta, -0.417_955_725_507_304, max_relative = 1e-10);
        assert_relative_eq!(greeks.gamma, 0.024_651_304_437_467_94, max_relative = 1e-10);
        assert_relative_eq!(greeks.theta, -2.409_827_734_499_611, max_relative = 1e-10);
    }

    #[test]
    fn test_greeks_need_two_steps() {
        let config = LatticeConfig::american(1).unwrap();
        let result = BinomialPricer::new(config).price_with_greeks(&three_step_put());
        assert!(matches!(
            result,
            Err(LatticeError::InvalidArgument { name: "steps", .. })
        ));
    }
}
