//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing and date operations
//! - `time`: `Date` and `DayCountConvention` for converting calendar inputs to year fractions
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`days_to_years`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, PricingError};
pub use time::{days_to_years, Date, DayCountConvention};
