//! Sensitivities read directly off the first lattice layers.

use crate::params::LatticeParameters;

/// Delta, gamma and theta estimated from the lattice itself.
///
/// Delta uses the two nodes at step 1, gamma the three nodes at step 2,
/// and theta compares the recombined middle node at step 2 (same spot as
/// the root) with the root value over `2·dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeGreeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t per year
    pub theta: f64,
}

/// Option values at steps 1 and 2, captured during backward induction.
#[derive(Debug, Default)]
pub(crate) struct EarlyLayers {
    step_one: [f64; 2],
    step_two: [f64; 3],
}

impl EarlyLayers {
    pub(crate) fn record(&mut self, step: usize, values: &[f64]) {
        match step {
            1 => self.step_one.copy_from_slice(values),
            2 => self.step_two.copy_from_slice(values),
            _ => {}
        }
    }

    pub(crate) fn greeks(&self, spot: f64, root: f64, lattice: &LatticeParameters) -> LatticeGreeks {
        let (u, d) = (lattice.up, lattice.down);
        let [v_d, v_u] = self.step_one;
        let [v_dd, v_ud, v_uu] = self.step_two;

        let delta = (v_u - v_d) / (spot * u - spot * d);

        let (s_uu, s_dd) = (spot * u * u, spot * d * d);
        let delta_up = (v_uu - v_ud) / (s_uu - spot);
        let delta_down = (v_ud - v_dd) / (spot - s_dd);
        let gamma = (delta_up - delta_down) / (0.5 * (s_uu - s_dd));

        let theta = (v_ud - root) / (2.0 * lattice.dt);

        LatticeGreeks {
            delta,
            gamma,
            theta,
        }
    }
}
