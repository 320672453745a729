//! Parallel pricing of independent options.

use rayon::prelude::*;
use tracing::debug;

use pricer_models::instruments::OptionParams;

use crate::config::LatticeConfig;
use crate::crr::{BinomialPricer, LatticeValuation};
use crate::error::LatticeError;

/// Prices every input on the rayon pool.
///
/// Results come back in input order. Each valuation is independent, so one
/// failure does not affect the others.
///
/// # Examples
/// ```
/// use pricer_lattice::{price_batch, LatticeConfig};
/// use pricer_models::instruments::{OptionParams, OptionType};
///
/// let config = LatticeConfig::american(200).unwrap();
/// let inputs: Vec<_> = [90.0, 100.0, 110.0]
///     .iter()
///     .map(|&k| OptionParams::new(100.0, k, 0.05, 0.2, 1.0, OptionType::Put).unwrap())
///     .collect();
///
/// let results = price_batch(&inputs, &config);
/// assert_eq!(results.len(), 3);
/// assert!(results[0].as_ref().unwrap().price < results[2].as_ref().unwrap().price);
/// ```
pub fn price_batch(
    inputs: &[OptionParams],
    config: &LatticeConfig,
) -> Vec<Result<LatticeValuation, LatticeError>> {
    debug!(
        options = inputs.len(),
        steps = config.steps(),
        "pricing batch"
    );
    let pricer = BinomialPricer::new(*config);
    inputs.par_iter().map(|params| pricer.price(params)).collect()
}
