//! Full-lattice pricer for options on an underlying paying discrete cash
//! dividends.
//!
//! Two modes are offered:
//!
//! - [`DividendMode::Reference`] reproduces the classic escrow shortcut
//!   literally. Nodes are indexed by down moves from the top, one scalar
//!   dividend present value is subtracted at every node, the terminal layer
//!   is call-shaped while the exercise test is put-shaped, and a node is
//!   flagged whenever its exercise value is positive.
//! - [`DividendMode::Escrowed`] builds the tree on the escrowed spot,
//!   adds back only the dividends still to be paid at each node, values
//!   either a call or a put consistently, and flags the nodes where
//!   exercising is optimal. Nodes are indexed by up moves.

use pricer_models::instruments::{DividendSchedule, OptionParams, OptionType};

use crate::config::{validate_steps, DegeneracyPolicy, LatticeConfig, MAX_GRID_STEPS};
use crate::error::LatticeError;
use crate::grid::TriangularGrid;
use crate::params::LatticeParameters;

/// How the discrete dividends enter the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DividendMode {
    /// Literal escrow shortcut; always values the put-style exercise test.
    #[default]
    Reference,
    /// Per-node escrowed dividends with a consistent payoff for the given type.
    ///
    /// A dividend at `t = 0` counts as already paid and leaves the spot as given.
    Escrowed(OptionType),
}

/// Meaning of the second lattice index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeIndexing {
    /// Node `(i, j)` has made `j` down moves; `j = 0` is the top of the tree.
    DownMoves,
    /// Node `(i, j)` has made `j` up moves; `j = 0` is the bottom of the tree.
    UpMoves,
}

/// Result of a full-lattice valuation.
///
/// All grids are `(steps + 1) × (steps + 1)`; row `i` is the time step and
/// entries with `j > i` stay zero (or `false`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendLattice {
    /// Underlying price at each node as used by the exercise test
    pub stock_prices: TriangularGrid<f64>,
    /// Option value at each node
    pub option_values: TriangularGrid<f64>,
    /// Early-exercise indicator at each node
    pub early_exercise: TriangularGrid<bool>,
    /// Lattice the values were computed on
    pub parameters: LatticeParameters,
    /// Present value at valuation of the dividends the lattice accounts for.
    ///
    /// Reference mode counts the whole schedule. Escrowed mode counts only
    /// dividends paid strictly after valuation; one at `t = 0` is already paid.
    pub dividend_present_value: f64,
    /// Convention for the second index of every grid
    pub indexing: NodeIndexing,
    /// Mode the lattice was built with
    pub mode: DividendMode,
}

impl DividendLattice {
    /// Option value at the root node.
    #[inline]
    pub fn price(&self) -> f64 {
        self.option_values[(0, 0)]
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.option_values.steps()
    }

    /// Returns whether the risk-neutral probability was outside (0, 1).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.parameters.is_degenerate()
    }

    /// Number of flagged nodes.
    pub fn exercise_count(&self) -> usize {
        (0..=self.steps())
            .map(|i| self.early_exercise.layer(i).iter().filter(|&&f| f).count())
            .sum()
    }
}

/// Full-lattice pricer for discrete dividends.
///
/// # Examples
/// ```
/// use pricer_lattice::{DividendMode, DividendPricer, LatticeConfig};
/// use pricer_models::instruments::{DividendSchedule, OptionType};
///
/// let config = LatticeConfig::american(50).unwrap();
/// let schedule = DividendSchedule::from_pairs(&[0.25], &[1.0]).unwrap();
/// let pricer = DividendPricer::new(config, DividendMode::Escrowed(OptionType::Put)).unwrap();
///
/// let lattice = pricer.price(50.0, 52.0, 0.05, 0.5, 0.3, &schedule).unwrap();
/// assert_eq!(lattice.option_values.dim(), 51);
/// assert!(lattice.price() > 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DividendPricer {
    config: LatticeConfig,
    mode: DividendMode,
}

impl DividendPricer {
    /// Creates a pricer; the step count must not exceed [`MAX_GRID_STEPS`].
    ///
    /// The configured exercise style applies to the escrowed mode only;
    /// the reference mode always tests for early exercise.
    pub fn new(config: LatticeConfig, mode: DividendMode) -> Result<Self, LatticeError> {
        config.validate_for_grid()?;
        Ok(Self { config, mode })
    }

    /// Returns the mode.
    #[inline]
    pub fn mode(&self) -> DividendMode {
        self.mode
    }

    /// Builds and rolls back the full lattice.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when an input is out of range or a dividend is
    /// paid after `maturity`, and `NumericalDegeneracy` for a degenerate
    /// lattice under `DegeneracyPolicy::Reject`.
    pub fn price(
        &self,
        spot: f64,
        strike: f64,
        rate: f64,
        maturity: f64,
        volatility: f64,
        dividends: &DividendSchedule,
    ) -> Result<DividendLattice, LatticeError> {
        let option_type = match self.mode {
            DividendMode::Reference => OptionType::Put,
            DividendMode::Escrowed(option_type) => option_type,
        };
        let params = OptionParams::new(spot, strike, rate, volatility, maturity, option_type)?;
        dividends.check_horizon(maturity)?;

        let steps = self.config.steps();
        let parameters = LatticeParameters::derive(maturity, steps, volatility, rate, 0.0);
        parameters.enforce(self.config.degeneracy_policy())?;

        match self.mode {
            DividendMode::Reference => Ok(reference_lattice(&params, steps, parameters, dividends)),
            DividendMode::Escrowed(_) => {
                let early_exercise = self.config.exercise().allows_early_exercise();
                escrowed_lattice(&params, steps, parameters, dividends, early_exercise)
            }
        }
    }
}

/// Prices on the full lattice with the reference escrow shortcut.
///
/// Equivalent to [`DividendPricer`] in [`DividendMode::Reference`] with a
/// warn-only degeneracy policy.
///
/// # Examples
/// ```
/// use pricer_lattice::price_with_dividends;
/// use pricer_models::instruments::DividendSchedule;
///
/// let schedule = DividendSchedule::from_pairs(&[0.0], &[0.0]).unwrap();
/// let lattice = price_with_dividends(81.08, 72.5, 0.037, 100.0, 100, 0.34, &schedule).unwrap();
/// assert!(!lattice.early_exercise[(0, 0)]);
/// ```
pub fn price_with_dividends(
    spot: f64,
    strike: f64,
    rate: f64,
    maturity: f64,
    steps: usize,
    volatility: f64,
    dividends: &DividendSchedule,
) -> Result<DividendLattice, LatticeError> {
    validate_steps(steps, MAX_GRID_STEPS)?;
    let config = LatticeConfig::builder()
        .steps(steps)
        .degeneracy_policy(DegeneracyPolicy::Warn)
        .build()?;
    DividendPricer::new(config, DividendMode::Reference)?.price(
        spot, strike, rate, maturity, volatility, dividends,
    )
}

fn reference_lattice(
    params: &OptionParams,
    steps: usize,
    parameters: LatticeParameters,
    dividends: &DividendSchedule,
) -> DividendLattice {
    let (up, down) = (parameters.up, parameters.down);
    let (p, disc) = (parameters.probability, parameters.discount);
    let strike = params.strike();
    let pv = dividends.present_value(params.rate());

    let mut stock_prices = TriangularGrid::new(steps);
    stock_prices[(0, 0)] = params.spot();
    for i in 1..=steps {
        stock_prices[(i, 0)] = stock_prices[(i - 1, 0)] * up;
        for j in 1..=i {
            stock_prices[(i, j)] = stock_prices[(i - 1, j - 1)] * down;
        }
    }

    let mut option_values = TriangularGrid::new(steps);
    let mut early_exercise = TriangularGrid::new(steps);
    for j in 0..=steps {
        option_values[(steps, j)] = (stock_prices[(steps, j)] - strike - pv).max(0.0);
    }

    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation =
                disc * (p * option_values[(i + 1, j + 1)] + (1.0 - p) * option_values[(i + 1, j)]);
            let exercise = (strike - (stock_prices[(i, j)] - pv)).max(0.0);
            option_values[(i, j)] = continuation.max(exercise);
            early_exercise[(i, j)] = exercise > 0.0;
        }
    }

    DividendLattice {
        stock_prices,
        option_values,
        early_exercise,
        parameters,
        dividend_present_value: pv,
        indexing: NodeIndexing::DownMoves,
        mode: DividendMode::Reference,
    }
}

fn escrowed_lattice(
    params: &OptionParams,
    steps: usize,
    parameters: LatticeParameters,
    dividends: &DividendSchedule,
    early_exercise_allowed: bool,
) -> Result<DividendLattice, LatticeError> {
    let dt = parameters.dt;
    let (p, disc) = (parameters.probability, parameters.discount);
    let (rate, strike) = (params.rate(), params.strike());
    let option_type = params.option_type();

    let escrowed_value = dividends.future_present_value(rate);
    let escrowed_spot = params.spot() - escrowed_value;
    if escrowed_spot <= 0.0 {
        return Err(LatticeError::invalid(
            "dividends",
            format!(
                "present value of dividends exceeds spot (escrowed spot {})",
                escrowed_spot
            ),
        ));
    }

    let mut stock_prices = TriangularGrid::new(steps);
    for i in 0..=steps {
        let pending = dividends.remaining_value_at(rate, i as f64 * dt);
        for j in 0..=i {
            stock_prices[(i, j)] = parameters.node_price(escrowed_spot, j, i - j) + pending;
        }
    }

    let mut option_values = TriangularGrid::new(steps);
    let mut early_exercise = TriangularGrid::new(steps);
    for j in 0..=steps {
        option_values[(steps, j)] = option_type.intrinsic(stock_prices[(steps, j)], strike);
    }

    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation =
                disc * (p * option_values[(i + 1, j + 1)] + (1.0 - p) * option_values[(i + 1, j)]);
            if early_exercise_allowed {
                let exercise = option_type.exercise_value(stock_prices[(i, j)], strike);
                option_values[(i, j)] = continuation.max(exercise);
                early_exercise[(i, j)] = exercise > 0.0 && exercise >= continuation;
            } else {
                option_values[(i, j)] = continuation;
            }
        }
    }

    Ok(DividendLattice {
        stock_prices,
        option_values,
        early_exercise,
        parameters,
        dividend_present_value: escrowed_value,
        indexing: NodeIndexing::UpMoves,
        mode: DividendMode::Escrowed(option_type),
    })
}
