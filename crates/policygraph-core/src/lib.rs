//! # Policygraph Core
//!
//! Scenario/policy graph construction and validation for multi-stage
//! stochastic programs. A policy graph is a tree of stages; each stage node
//! holds one deterministic scenario or several weighted scenarios, and every
//! node can be bound to an opaque subproblem handle that a decomposition
//! algorithm solves in that node's context.
//!
//! ```rust
//! use policygraph_core::{LinearPolicyGraph, Scenario};
//!
//! let mut lpg: LinearPolicyGraph<Option<f64>, &str> =
//!     LinearPolicyGraph::new(Scenario::new("try", None));
//! let three: Vec<_> = (0..3).map(|i| Scenario::new(i.to_string(), None)).collect();
//! let four: Vec<_> = (0..4).map(|i| Scenario::new(i.to_string(), None)).collect();
//! lpg.add_stage(three, None).unwrap();
//! lpg.add_stage(four.clone(), None).unwrap();
//! lpg.add_stage(four, None).unwrap();
//! lpg.assign_subproblem("subproblem");
//!
//! let graph = lpg.graph();
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.stage_count(), 4);
//! ```

pub mod config;
pub mod engine;

#[cfg(feature = "serde")]
pub(crate) mod serde_helpers;

// Re-export commonly used types
pub use config::GraphConfig;
pub use engine::errors::GraphError;
pub use engine::graph::{EdgeData, EdgeId, NodeId, PolicyGraph, ROOT_NAME};
pub use engine::linear::LinearPolicyGraph;
pub use engine::node::{Node, NodeType, Realization};
pub use engine::probability::{
    is_density, is_density_with_tolerance, is_probability, uniform, Probability,
    DEFAULT_DENSITY_TOLERANCE,
};
pub use engine::scenario::Scenario;
pub use engine::summary::{EdgeExport, GraphExport, GraphSummary, NodeExport, NodeSummary};
