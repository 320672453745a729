//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions used as the validation
//! reference for the lattice engines:
//! - Black-Scholes-Merton with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Theta)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports `f32` and `f64`
//! - **Numerical Stability**: Uses a double-precision rational CDF

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
