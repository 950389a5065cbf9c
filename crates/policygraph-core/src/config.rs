//! Graph-wide configuration.

use crate::engine::errors::GraphError;
use crate::engine::probability::DEFAULT_DENSITY_TOLERANCE;

/// Settings applied to nodes a graph builds on the caller's behalf
/// (`add_child`, `add_stage`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Accepted `|sum(p) - 1|` for a stochastic node's probabilities.
    pub density_tolerance: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            density_tolerance: DEFAULT_DENSITY_TOLERANCE,
        }
    }
}

impl GraphConfig {
    pub fn with_density_tolerance(mut self, tolerance: f64) -> Self {
        self.density_tolerance = tolerance;
        self
    }

    /// Checks that the tolerance is finite and in `[0, 1)`.
    pub fn validate(&self) -> Result<(), GraphError> {
        let tol = self.density_tolerance;
        if !tol.is_finite() || !(0.0..1.0).contains(&tol) {
            return Err(GraphError::InvalidConfig(format!(
                "density_tolerance must be finite and in [0, 1), got {}",
                tol
            )));
        }
        Ok(())
    }
}
