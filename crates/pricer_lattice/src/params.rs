//! Derived lattice parameters and degeneracy diagnostics.

use tracing::{debug, warn};

use crate::config::DegeneracyPolicy;
use crate::error::LatticeError;

/// Largest log-price excursion from spot held on a node; deeper nodes saturate.
const MAX_LOG_MOVE: f64 = 600.0;

/// Per-step quantities of a Cox-Ross-Rubinstein lattice.
///
/// `up = exp(σ·√dt)`, `down = 1/up` and
/// `probability = (exp((r - q)·dt) - down) / (up - down)`.
/// The probability is never clamped; [`LatticeParameters::is_degenerate`]
/// reports when it falls outside (0, 1).
///
/// # Examples
/// ```
/// use pricer_lattice::LatticeParameters;
///
/// let params = LatticeParameters::derive(1.0, 100, 0.2, 0.05, 0.0);
/// assert!((params.up * params.down - 1.0).abs() < 1e-15);
/// assert!(!params.is_degenerate());
///
/// // Volatility too small to span the drift
/// let degenerate = LatticeParameters::derive(1.0, 10, 1e-4, 0.05, 0.0);
/// assert!(degenerate.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters {
    /// Time step in years
    pub dt: f64,
    /// Up-move factor
    pub up: f64,
    /// Down-move factor
    pub down: f64,
    /// Risk-neutral probability of an up move (unclamped)
    pub probability: f64,
    /// One-step discount factor `exp(-r·dt)`
    pub discount: f64,
}

impl LatticeParameters {
    /// Derives the lattice for `steps` steps over `maturity` years.
    ///
    /// `carry_yield` is the continuous dividend yield subtracted from the
    /// drift; pass zero when dividends are handled discretely.
    pub fn derive(
        maturity: f64,
        steps: usize,
        volatility: f64,
        rate: f64,
        carry_yield: f64,
    ) -> Self {
        let dt = maturity / steps as f64;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let probability = (((rate - carry_yield) * dt).exp() - down) / (up - down);
        let discount = (-rate * dt).exp();

        debug!(steps, dt, up, down, probability, "derived lattice parameters");

        Self {
            dt,
            up,
            down,
            probability,
            discount,
        }
    }

    /// Underlying price after `ups` up moves and `downs` down moves,
    /// `spot·u^ups·d^downs`.
    ///
    /// Evaluated in log space, so a deep lattice never collapses to zero
    /// or overflows. Excursions beyond `e^±600` saturate; at that depth the
    /// node carries no weight at `f64` resolution.
    ///
    /// # Examples
    /// ```
    /// use pricer_lattice::LatticeParameters;
    ///
    /// let params = LatticeParameters::derive(1.0, 4, 0.2, 0.05, 0.0);
    /// let node = params.node_price(100.0, 3, 1);
    /// assert!((node - 100.0 * params.up.powi(3) * params.down).abs() < 1e-10);
    ///
    /// let deep = LatticeParameters::derive(3.0, 100_000, 1.5, 0.03, 0.0);
    /// assert!(deep.node_price(100.0, 0, 100_000) > 0.0);
    /// assert!(deep.node_price(100.0, 100_000, 0).is_finite());
    /// ```
    #[inline]
    pub fn node_price(&self, spot: f64, ups: usize, downs: usize) -> f64 {
        let moves = ups as f64 - downs as f64;
        spot * (moves * self.up.ln())
            .clamp(-MAX_LOG_MOVE, MAX_LOG_MOVE)
            .exp()
    }

    /// Returns whether the risk-neutral probability lies outside (0, 1).
    ///
    /// A NaN probability counts as degenerate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.probability > 0.0 && self.probability < 1.0)
    }

    /// Applies `policy` to a degenerate lattice.
    ///
    /// Under `Warn` a warning is logged and pricing continues; under
    /// `Reject` the call fails. Healthy lattices always pass.
    pub fn enforce(&self, policy: DegeneracyPolicy) -> Result<(), LatticeError> {
        if !self.is_degenerate() {
            return Ok(());
        }
        match policy {
            DegeneracyPolicy::Warn => {
                warn!(
                    probability = self.probability,
                    up = self.up,
                    down = self.down,
                    "risk-neutral probability outside (0, 1); lattice admits arbitrage"
                );
                Ok(())
            }
            DegeneracyPolicy::Reject => Err(LatticeError::NumericalDegeneracy {
                probability: self.probability,
            }),
        }
    }
}
