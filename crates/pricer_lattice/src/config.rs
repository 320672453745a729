//! Lattice engine configuration.
//!
//! This module provides the validated step count, exercise style and
//! degeneracy policy shared by every lattice engine.

use std::fmt;
use std::str::FromStr;

use pricer_models::instruments::ExerciseStyle;

use crate::error::LatticeError;

/// Maximum number of time steps for the O(steps) no-dividend lattice.
pub const MAX_STEPS: usize = 100_000;

/// Maximum number of time steps for the full O(steps²) dividend lattice.
pub const MAX_GRID_STEPS: usize = 5_000;

/// What to do when the risk-neutral probability leaves (0, 1).
///
/// # Variants
/// - `Warn`: Emit a `tracing` warning and price anyway (unclamped)
/// - `Reject`: Fail with `LatticeError::NumericalDegeneracy` before pricing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DegeneracyPolicy {
    /// Price with the unclamped probability and log a warning.
    #[default]
    Warn,

    /// Refuse to price a degenerate lattice.
    Reject,
}

impl FromStr for DegeneracyPolicy {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warn" => Ok(DegeneracyPolicy::Warn),
            "reject" => Ok(DegeneracyPolicy::Reject),
            other => Err(LatticeError::invalid(
                "degeneracy",
                format!("unknown policy '{}' (expected warn or reject)", other),
            )),
        }
    }
}

impl fmt::Display for DegeneracyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyPolicy::Warn => write!(f, "warn"),
            DegeneracyPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Lattice engine configuration.
///
/// Immutable once built. Use [`LatticeConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_lattice::{DegeneracyPolicy, LatticeConfig};
/// use pricer_models::instruments::ExerciseStyle;
///
/// let config = LatticeConfig::builder()
///     .steps(1000)
///     .exercise(ExerciseStyle::American)
///     .degeneracy_policy(DegeneracyPolicy::Reject)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 1000);
/// assert_eq!(config.degeneracy_policy(), DegeneracyPolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeConfig {
    steps: usize,
    exercise: ExerciseStyle,
    degeneracy_policy: DegeneracyPolicy,
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// American exercise, warn-on-degeneracy configuration with `steps` steps.
    pub fn american(steps: usize) -> Result<Self, LatticeError> {
        Self::builder().steps(steps).build()
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Returns the degeneracy policy.
    #[inline]
    pub fn degeneracy_policy(&self) -> DegeneracyPolicy {
        self.degeneracy_policy
    }

    /// Returns a copy with a different exercise style.
    #[inline]
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::InvalidArgument` if `steps` is 0 or greater
    /// than [`MAX_STEPS`].
    pub fn validate(&self) -> Result<(), LatticeError> {
        validate_steps(self.steps, MAX_STEPS)
    }

    /// Validates the step count against the full-lattice bound.
    pub fn validate_for_grid(&self) -> Result<(), LatticeError> {
        validate_steps(self.steps, MAX_GRID_STEPS)
    }
}

pub(crate) fn validate_steps(steps: usize, max: usize) -> Result<(), LatticeError> {
    if steps == 0 {
        return Err(LatticeError::invalid("steps", "must be at least 1"));
    }
    if steps > max {
        return Err(LatticeError::invalid(
            "steps",
            format!("{} exceeds the maximum of {}", steps, max),
        ));
    }
    Ok(())
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    steps: Option<usize>,
    exercise: ExerciseStyle,
    degeneracy_policy: DegeneracyPolicy,
}

impl LatticeConfigBuilder {
    /// Sets the number of time steps, in [1, 100_000].
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the exercise style (default American).
    #[inline]
    pub fn exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Sets the degeneracy policy (default Warn).
    #[inline]
    pub fn degeneracy_policy(mut self, policy: DegeneracyPolicy) -> Self {
        self.degeneracy_policy = policy;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::InvalidArgument` if `steps` was not set or is
    /// out of range.
    pub fn build(self) -> Result<LatticeConfig, LatticeError> {
        let steps = self
            .steps
            .ok_or_else(|| LatticeError::invalid("steps", "must be specified"))?;

        let config = LatticeConfig {
            steps,
            exercise: self.exercise,
            degeneracy_policy: self.degeneracy_policy,
        };

        config.validate()?;
        Ok(config)
    }
}
