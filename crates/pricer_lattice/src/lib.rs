//! # Pricer Lattice (L3: Lattice Engines)
//!
//! Recombining binomial lattices for American and European vanilla options.
//!
//! This crate provides:
//! - [`BinomialPricer`] / [`american_option_price`]: Cox-Ross-Rubinstein
//!   lattice with a continuous dividend yield, O(steps) memory
//! - [`DividendPricer`] / [`price_with_dividends`]: full O(steps²) lattice for
//!   discrete cash dividends, returning option values and early-exercise flags
//! - [`LatticeParameters`]: up/down factors and the unclamped risk-neutral
//!   probability, with a degeneracy check
//! - [`LatticeGreeks`]: delta, gamma and theta read from the lattice
//! - [`price_batch`]: parallel pricing of independent inputs
//!
//! ## Degenerate lattices
//!
//! The risk-neutral probability is never clamped. When it leaves (0, 1)
//! the engines log a `tracing` warning and price anyway, unless the
//! configuration selects [`DegeneracyPolicy::Reject`]. Every result carries
//! its [`LatticeParameters`] so callers can test for degeneracy themselves.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_lattice::{BinomialPricer, LatticeConfig};
//! use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
//!
//! let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Put).unwrap();
//!
//! let american = BinomialPricer::new(LatticeConfig::american(400).unwrap())
//!     .price(&params)
//!     .unwrap();
//! let european = BinomialPricer::new(
//!     LatticeConfig::builder()
//!         .steps(400)
//!         .exercise(ExerciseStyle::European)
//!         .build()
//!         .unwrap(),
//! )
//! .price(&params)
//! .unwrap();
//!
//! assert!(american.price >= european.price);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod batch;
mod config;
mod crr;
mod dividend;
mod error;
mod greeks;
mod grid;
mod params;

pub use batch::price_batch;
pub use config::{DegeneracyPolicy, LatticeConfig, LatticeConfigBuilder, MAX_GRID_STEPS, MAX_STEPS};
pub use crr::{american_option_price, BinomialPricer, LatticeValuation};
pub use dividend::{
    price_with_dividends, DividendLattice, DividendMode, DividendPricer, NodeIndexing,
};
pub use error::LatticeError;
pub use greeks::LatticeGreeks;
pub use grid::TriangularGrid;
pub use params::LatticeParameters;
