//! # Policy graph nodes
//!
//! A [`Node`] is one stage vertex of the policy graph. It holds either a single
//! deterministic [`Scenario`] or an ordered list of scenarios with aligned
//! probabilities, plus the name of its parent node.
//!
//! ## Construction rules
//!
//! - A one-element scenario list with a one-element probability list is
//!   unwrapped to a deterministic node before any check runs.
//! - Deterministic nodes need `0 < p <= 1`, otherwise
//!   [`GraphError::InvalidProbability`].
//! - Stochastic nodes need one probability per scenario, every entry in
//!   (0, 1], and a sum within the tolerance, otherwise
//!   [`GraphError::InvalidDistribution`].
//!
//! Nodes are immutable once built. The parent link is a name, not an owning
//! pointer: the graph owns every node and resolves parents by name.

use std::fmt;
use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::errors::GraphError;
use crate::engine::graph::ROOT_NAME;
use crate::engine::probability::{
    check_distribution, is_probability, Probability, DEFAULT_DENSITY_TOLERANCE,
};
use crate::engine::scenario::Scenario;

/// Whether a node branches into several scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    Deterministic,
    Stochastic,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Deterministic => f.write_str("Deterministic"),
            NodeType::Stochastic => f.write_str("Stochastic"),
        }
    }
}

/// The realizations a node carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Realization<D> {
    Deterministic {
        scenario: Scenario<D>,
        probability: f64,
    },
    /// At least two scenarios; `probabilities[i]` belongs to `scenarios[i]`.
    Stochastic {
        scenarios: Vec<Scenario<D>>,
        probabilities: Vec<f64>,
    },
}

/// A labeled vertex of the policy graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<D> {
    name: Arc<str>,
    parent: Option<Arc<str>>,
    realization: Realization<D>,
    /// Built once from the validated probabilities of a stochastic node.
    sampler: Option<WeightedIndex<f64>>,
}

impl<D> Node<D> {
    /// Builds a node from a scenario list and an aligned probability list,
    /// using [`DEFAULT_DENSITY_TOLERANCE`] for the sum check.
    ///
    /// # Example
    ///
    /// ```rust
    /// use policygraph_core::{Node, NodeType, Scenario};
    ///
    /// let node = Node::new(
    ///     "stage_2",
    ///     vec![Scenario::new("low", 10.0), Scenario::new("high", 30.0)],
    ///     vec![0.5, 0.5],
    /// )
    /// .unwrap()
    /// .with_parent("root");
    /// assert_eq!(node.node_type(), NodeType::Stochastic);
    /// assert_eq!(node.name_list(), vec!["stage_2_low", "stage_2_high"]);
    /// ```
    pub fn new(
        name: impl Into<Arc<str>>,
        scenarios: Vec<Scenario<D>>,
        probabilities: Vec<f64>,
    ) -> Result<Self, GraphError> {
        Self::new_with_tolerance(name, scenarios, probabilities, DEFAULT_DENSITY_TOLERANCE)
    }

    /// Same as [`Node::new`] with an explicit tolerance on `|sum(p) - 1|`.
    pub fn new_with_tolerance(
        name: impl Into<Arc<str>>,
        mut scenarios: Vec<Scenario<D>>,
        mut probabilities: Vec<f64>,
        tolerance: f64,
    ) -> Result<Self, GraphError> {
        let name = name.into();

        if scenarios.is_empty() {
            return Err(GraphError::distribution(&name, "node has no scenarios"));
        }

        if scenarios.len() == 1 && probabilities.len() == 1 {
            if let (Some(scenario), Some(probability)) = (scenarios.pop(), probabilities.pop()) {
                return Self::deterministic(name, scenario, probability);
            }
        }

        check_distribution(&name, &probabilities, scenarios.len(), tolerance)?;
        let sampler = WeightedIndex::new(&probabilities)
            .map_err(|e| GraphError::distribution(&name, e.to_string()))?;
        Ok(Self {
            name,
            parent: None,
            realization: Realization::Stochastic {
                scenarios,
                probabilities,
            },
            sampler: Some(sampler),
        })
    }

    /// Builds a single-scenario node reached with `probability`.
    pub fn deterministic(
        name: impl Into<Arc<str>>,
        scenario: Scenario<D>,
        probability: f64,
    ) -> Result<Self, GraphError> {
        let name = name.into();
        if !is_probability(probability) {
            return Err(GraphError::InvalidProbability {
                node: name.to_string(),
                value: probability,
            });
        }
        Ok(Self {
            name,
            parent: None,
            realization: Realization::Deterministic {
                scenario,
                probability,
            },
            sampler: None,
        })
    }

    /// The deterministic root every graph starts from.
    pub(crate) fn root(scenario: Scenario<D>) -> Self {
        Self {
            name: Arc::from(ROOT_NAME),
            parent: None,
            realization: Realization::Deterministic {
                scenario,
                probability: 1.0,
            },
            sampler: None,
        }
    }

    /// Sets the parent this node hangs off once added to a graph.
    pub fn with_parent(mut self, parent: impl Into<Arc<str>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn realization(&self) -> &Realization<D> {
        &self.realization
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self.realization, Realization::Stochastic { .. })
    }

    pub fn node_type(&self) -> NodeType {
        if self.is_stochastic() {
            NodeType::Stochastic
        } else {
            NodeType::Deterministic
        }
    }

    /// Number of scenarios held.
    pub fn len(&self) -> usize {
        self.scenarios().len()
    }

    /// Always false; a node holds at least one scenario.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Scenarios in declaration order; a deterministic node yields one.
    pub fn scenarios(&self) -> &[Scenario<D>] {
        match &self.realization {
            Realization::Deterministic { scenario, .. } => std::slice::from_ref(scenario),
            Realization::Stochastic { scenarios, .. } => scenarios,
        }
    }

    /// Probabilities aligned with [`Node::scenarios`].
    pub fn probabilities(&self) -> &[f64] {
        match &self.realization {
            Realization::Deterministic { probability, .. } => std::slice::from_ref(probability),
            Realization::Stochastic { probabilities, .. } => probabilities,
        }
    }

    /// The node's `p` attribute: scalar when deterministic, list otherwise.
    pub fn probability(&self) -> Probability {
        match &self.realization {
            Realization::Deterministic { probability, .. } => Probability::Scalar(*probability),
            Realization::Stochastic { probabilities, .. } => {
                Probability::Distribution(probabilities.clone())
            }
        }
    }

    /// Composite labels `"{node}_{scenario}"` for a stochastic node, or just
    /// the node name when deterministic.
    pub fn name_list(&self) -> Vec<String> {
        match &self.realization {
            Realization::Deterministic { .. } => vec![self.name.to_string()],
            Realization::Stochastic { scenarios, .. } => scenarios
                .iter()
                .map(|s| format!("{}_{}", self.name, s.name()))
                .collect(),
        }
    }

    /// Draws a scenario uniformly, ignoring the node's probabilities.
    ///
    /// Matches the sampling behaviour downstream code was written against.
    /// Use [`Node::sample_weighted`] for draws that follow `p`.
    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> &Scenario<D> {
        match &self.realization {
            Realization::Deterministic { scenario, .. } => scenario,
            Realization::Stochastic { scenarios, .. } => {
                &scenarios[rng.gen_range(0..scenarios.len())]
            }
        }
    }

    /// Draws a scenario with probability proportional to its weight.
    pub fn sample_weighted<R: Rng>(&self, rng: &mut R) -> &Scenario<D> {
        match &self.sampler {
            Some(sampler) => &self.scenarios()[sampler.sample(rng)],
            None => &self.scenarios()[0],
        }
    }

    /// Reproducible uniform draw: same seed and node give the same scenario.
    ///
    /// The generator is local to the call, so draws never interfere with
    /// each other or with any other random source.
    pub fn random_scenario(&self, seed: u64) -> &Scenario<D> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample_uniform(&mut rng)
    }

    /// Reproducible draw that follows the node's probabilities.
    pub fn random_weighted_scenario(&self, seed: u64) -> &Scenario<D> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.sample_weighted(&mut rng)
    }
}
