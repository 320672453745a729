//! CLI error types.

use pricer_core::types::{DateError, PricingError};
use pricer_lattice::LatticeError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command-line input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Self-check tolerance exceeded.
    #[error("Check failed: {0}")]
    CheckFailed(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Contract inputs rejected.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Closed-form reference rejected its inputs.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Lattice engine rejected the request.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Date or day-count input rejected.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Generic pricing failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
