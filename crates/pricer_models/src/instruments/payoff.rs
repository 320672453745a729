//! Call/Put payoff definitions.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::InstrumentError;

/// Type of option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// let put: OptionType = "p".parse().unwrap();
/// assert_eq!(put, OptionType::Put);
/// assert_eq!(put.intrinsic(90.0_f64, 100.0), 10.0);
/// assert!("x".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: max(S - K, 0)
    #[cfg_attr(feature = "serde", serde(alias = "c", alias = "C", alias = "Call"))]
    Call,
    /// Put option: max(K - S, 0)
    #[cfg_attr(feature = "serde", serde(alias = "p", alias = "P", alias = "Put"))]
    Put,
}

impl OptionType {
    /// Signed exercise value: `S - K` for a call, `K - S` for a put.
    ///
    /// Not floored at zero; lattice engines compare it against the
    /// continuation value directly.
    #[inline]
    pub fn exercise_value<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => spot - strike,
            OptionType::Put => strike - spot,
        }
    }

    /// Intrinsic value, the exercise value floored at zero.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        self.exercise_value(spot, strike).max(T::zero())
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Single-letter tag used by command-line drivers.
    pub fn tag(&self) -> char {
        match self {
            OptionType::Call => 'c',
            OptionType::Put => 'p',
        }
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            _ => Err(InstrumentError::UnknownOptionType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}
