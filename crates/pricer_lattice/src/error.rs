//! Error types for the lattice engines.

use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Lattice pricing errors.
///
/// # Variants
/// - `InvalidArgument`: A precondition on inputs or configuration was violated
/// - `NumericalDegeneracy`: The risk-neutral probability left (0, 1) and the
///   caller asked for degenerate lattices to be rejected
///
/// # Examples
/// ```
/// use pricer_lattice::LatticeError;
///
/// let err = LatticeError::InvalidArgument {
///     name: "steps",
///     reason: "must be at least 1".to_string(),
/// };
/// assert_eq!(err.to_string(), "Invalid argument 'steps': must be at least 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Invalid input with the offending parameter name.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// Description of the violation
        reason: String,
    },

    /// Risk-neutral probability outside the open unit interval.
    #[error("Risk-neutral probability p = {probability} lies outside (0, 1)")]
    NumericalDegeneracy {
        /// The offending probability
        probability: f64,
    },
}

impl LatticeError {
    /// Returns whether this error reports a violated precondition.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LatticeError::InvalidArgument { .. })
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LatticeError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<InstrumentError> for LatticeError {
    fn from(err: InstrumentError) -> Self {
        let name = match &err {
            InstrumentError::InvalidSpot { .. } => "spot",
            InstrumentError::InvalidStrike { .. } => "strike",
            InstrumentError::InvalidVolatility { .. } => "volatility",
            InstrumentError::InvalidExpiry { .. } => "maturity",
            InstrumentError::InvalidRate { .. } => "rate",
            InstrumentError::InvalidDividendYield { .. } => "dividend_yield",
            InstrumentError::InvalidDividend { .. }
            | InstrumentError::DividendBeyondExpiry { .. }
            | InstrumentError::MismatchedDividends { .. } => "dividends",
            InstrumentError::UnknownOptionType(_) => "option_type",
            InstrumentError::UnknownExerciseStyle(_) => "exercise",
        };
        LatticeError::InvalidArgument {
            name,
            reason: err.to_string(),
        }
    }
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidArgument { .. } => PricingError::InvalidArgument(err.to_string()),
            LatticeError::NumericalDegeneracy { .. } => {
                PricingError::NumericalDegeneracy(err.to_string())
            }
        }
    }
}
