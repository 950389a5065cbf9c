//! Error types for policy graph construction and lookup.

use thiserror::Error;

/// Errors raised while building or querying a policy graph.
///
/// Every variant is reported at the point of violation and the graph is left
/// exactly as it was before the failing call. The enum is `#[non_exhaustive]`
/// so new failure kinds can be added without breaking callers.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A deterministic node's probability lies outside (0, 1].
    #[error("invalid probability for node '{node}': {value} is not in (0, 1]")]
    InvalidProbability { node: String, value: f64 },

    /// A stochastic node's probabilities do not form a distribution over its scenarios.
    #[error("invalid distribution for node '{node}': {reason}")]
    InvalidDistribution { node: String, reason: String },

    /// The node name is already registered in the graph.
    #[error("node '{0}' already exists in the policy graph")]
    DuplicateNode(String),

    /// The node names a parent that has not been added yet.
    #[error("parent '{parent}' of node '{node}' is not in the policy graph")]
    UnknownParent { node: String, parent: String },

    /// A non-root node was added without a parent.
    #[error("node '{0}' has no parent; only the root may be detached")]
    MissingParent(String),

    /// Parent lookup on a node without an incoming edge (the root).
    #[error("node '{0}' has no parent")]
    NoParent(String),

    /// Lookup or assignment against a name the graph does not contain.
    #[error("node '{0}' is not in the policy graph")]
    UnknownNode(String),

    /// The graph cannot address another node or edge with a `u32` id.
    #[error("policy graph capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Rejected graph configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    pub(crate) fn distribution(node: &str, reason: impl Into<String>) -> Self {
        GraphError::InvalidDistribution {
            node: node.to_string(),
            reason: reason.into(),
        }
    }
}
