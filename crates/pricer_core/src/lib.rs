//! # pricer_core: Foundation Types for Lattice Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Date, DayCountConvention, PricingError};
//!
//! let valuation = Date::from_ymd(2024, 9, 8).unwrap();
//! let expiry = Date::from_ymd(2024, 12, 16).unwrap();
//! let maturity = DayCountConvention::Actual365Fixed.year_fraction(valuation, expiry);
//! assert!((maturity - 99.0 / 365.0).abs() < 1e-12);
//!
//! let err = PricingError::InvalidArgument("spot must be positive".to_string());
//! assert_eq!(err.to_string(), "Invalid argument: spot must be positive");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date` and `DayCountConvention`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
