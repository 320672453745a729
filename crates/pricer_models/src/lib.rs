//! # Pricer Models (L2: Business Logic)
//!
//! Option contract definitions and closed-form reference formulas.
//!
//! This crate provides:
//! - Option contract inputs with validation (`instruments::OptionParams`)
//! - Call/Put and European/American tags parsed from driver input
//! - Discrete cash dividend schedules with present-value helpers
//! - Black-Scholes closed form with continuous dividend yield, used to
//!   validate lattice convergence
//!
//! ## Design Principles
//!
//! - **Validated value types**: every constructor checks its preconditions and
//!   returns `InstrumentError`, so downstream engines never see a bad input
//! - **Generic numerics**: closed forms are written over `num_traits::Float`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
