//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by any pricing operation in the workspace
//! - `DateError`: Errors from date construction and parsing

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every crate-specific error in the workspace converts into this type,
/// so callers that drive several layers can handle a single error enum.
///
/// # Variants
/// - `InvalidArgument`: A precondition on the inputs was violated
/// - `NumericalDegeneracy`: The lattice is mis-specified (risk-neutral probability outside (0, 1))
/// - `ModelFailure`: The computation produced an unusable result
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid argument: Negative spot price");
/// assert!(err.is_invalid_argument());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidArgument(String),

    /// Risk-neutral probability outside the open unit interval
    NumericalDegeneracy(String),

    /// Model failed to produce valid result
    ModelFailure(String),
}

impl PricingError {
    /// Returns whether this error reports a violated precondition.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PricingError::InvalidArgument(_))
    }

    /// Returns whether this error reports a degenerate lattice.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, PricingError::NumericalDegeneracy(_))
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PricingError::NumericalDegeneracy(msg) => {
                write!(f, "Numerical degeneracy: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `UnknownDayCount`: Day count convention name not recognised
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Unknown day count convention name.
    #[error("Unknown day count convention: {0}")]
    UnknownDayCount(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}
