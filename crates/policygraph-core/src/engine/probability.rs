//! # Probability validation
//!
//! Pure checks used by every node on construction:
//!
//! - [`is_probability`]: a single value lies in (0, 1]
//! - [`is_density`]: a list of values sums to one within [`DEFAULT_DENSITY_TOLERANCE`]
//!
//! Non-finite inputs are never valid. Sums are accumulated with Kahan
//! compensation so long equiprobable lists (e.g. `1/7` repeated) do not drift.

use std::fmt;

use crate::engine::errors::GraphError;

/// Symmetric tolerance on `|sum - 1|` accepted for a probability list.
pub const DEFAULT_DENSITY_TOLERANCE: f64 = 1e-3;

/// Returns true iff `p` is finite and `0 < p <= 1`.
pub fn is_probability(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p <= 1.0
}

/// Returns true iff `p_list` is non-empty, finite, and sums to one within
/// [`DEFAULT_DENSITY_TOLERANCE`].
pub fn is_density(p_list: &[f64]) -> bool {
    is_density_with_tolerance(p_list, DEFAULT_DENSITY_TOLERANCE)
}

/// Same as [`is_density`] with an explicit tolerance on `|sum - 1|`.
pub fn is_density_with_tolerance(p_list: &[f64], tolerance: f64) -> bool {
    if p_list.is_empty() || !p_list.iter().all(|p| p.is_finite()) {
        return false;
    }
    (compensated_sum(p_list) - 1.0).abs() <= tolerance
}

/// Equiprobable distribution over `n` outcomes. Empty for `n == 0`.
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Kahan compensated summation.
pub(crate) fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0f64;
    let mut c = 0.0f64;
    for &v in values {
        let y = v - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Validates a stochastic node's probability list against its scenario count.
pub(crate) fn check_distribution(
    node: &str,
    probabilities: &[f64],
    scenario_count: usize,
    tolerance: f64,
) -> Result<(), GraphError> {
    if probabilities.len() != scenario_count {
        return Err(GraphError::distribution(
            node,
            format!(
                "{} scenarios but {} probabilities",
                scenario_count,
                probabilities.len()
            ),
        ));
    }
    if let Some((idx, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !is_probability(**p))
    {
        return Err(GraphError::distribution(
            node,
            format!("probability {} at position {} is not in (0, 1]", p, idx),
        ));
    }
    if !is_density_with_tolerance(probabilities, tolerance) {
        return Err(GraphError::distribution(
            node,
            format!(
                "probabilities sum to {} (tolerance {})",
                compensated_sum(probabilities),
                tolerance
            ),
        ));
    }
    Ok(())
}

/// The `p` attribute of a node or edge: a scalar for a deterministic node,
/// an ordered list aligned with the scenarios for a stochastic one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Probability {
    Scalar(f64),
    Distribution(Vec<f64>),
}

impl Probability {
    /// Slice view; a scalar is a one-element slice.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Probability::Scalar(p) => std::slice::from_ref(p),
            Probability::Distribution(ps) => ps,
        }
    }

    /// Total mass carried by this value.
    pub fn total(&self) -> f64 {
        compensated_sum(self.as_slice())
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Scalar(p) => write!(f, "{}", p),
            Probability::Distribution(ps) => {
                write!(f, "[")?;
                for (i, p) in ps.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, "]")
            }
        }
    }
}
