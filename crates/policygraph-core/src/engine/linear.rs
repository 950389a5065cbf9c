//! # Linear policy graphs
//!
//! A [`LinearPolicyGraph`] appends stages one at a time as a single chain:
//! stage `t + 1` always hangs off stage `t`, starting from the root (stage 1).
//! Branching only happens inside a stage, through its scenario list.

use crate::config::GraphConfig;
use crate::engine::errors::GraphError;
use crate::engine::graph::{NodeId, PolicyGraph};
use crate::engine::node::Node;
use crate::engine::probability::uniform;
use crate::engine::scenario::Scenario;

/// A policy graph built as a chain of stages.
///
/// # Example
///
/// ```rust
/// use policygraph_core::{LinearPolicyGraph, Scenario};
///
/// let mut lpg: LinearPolicyGraph<(), &str> = LinearPolicyGraph::new(Scenario::new("try", ()));
/// let demand: Vec<_> = (0..3).map(|i| Scenario::new(i.to_string(), ())).collect();
/// lpg.add_stage(demand, None).unwrap();
/// lpg.assign_subproblem("model");
///
/// assert_eq!(lpg.num_stages(), 2);
/// assert_eq!(lpg.graph().parent_name("stage_2").unwrap(), "root");
/// assert!(lpg.graph().unassigned_nodes().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LinearPolicyGraph<D, H = ()> {
    graph: PolicyGraph<D, H>,
    last_t: u32,
    last_node: NodeId,
}

impl<D, H> LinearPolicyGraph<D, H> {
    pub fn new(root_scenario: Scenario<D>) -> Self {
        Self::from_graph(PolicyGraph::new(root_scenario))
    }

    pub fn with_config(root_scenario: Scenario<D>, config: GraphConfig) -> Result<Self, GraphError> {
        PolicyGraph::with_config(root_scenario, config).map(Self::from_graph)
    }

    fn from_graph(graph: PolicyGraph<D, H>) -> Self {
        Self {
            graph,
            last_t: 1,
            last_node: NodeId(0),
        }
    }

    /// Appends `stage_{t+1}` below the current last stage.
    ///
    /// Without `probabilities` the scenarios are equiprobable. Node or graph
    /// construction errors are returned unchanged, and a failed call leaves
    /// the stage counter and the chain tail where they were.
    pub fn add_stage(
        &mut self,
        scenarios: Vec<Scenario<D>>,
        probabilities: Option<Vec<f64>>,
    ) -> Result<NodeId, GraphError> {
        let probabilities = probabilities.unwrap_or_else(|| uniform(scenarios.len()));
        let t = self.last_t + 1;
        let node = Node::new_with_tolerance(
            format!("stage_{}", t),
            scenarios,
            probabilities,
            self.graph.config().density_tolerance,
        )?
        .with_parent(self.graph.name_of(self.last_node).clone());
        let id = self.graph.add_node(node)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(stage = t, "appended stage");

        self.last_t = t;
        self.last_node = id;
        Ok(id)
    }

    /// Stage counter; the root counts as stage 1.
    pub fn num_stages(&self) -> u32 {
        self.last_t
    }

    /// The stage the next [`add_stage`](Self::add_stage) call attaches to.
    pub fn last_node(&self) -> &Node<D> {
        &self.graph.nodes()[self.last_node.0 as usize]
    }

    pub fn assign(&mut self, handle: H, node_name: &str) -> Result<Option<H>, GraphError> {
        self.graph.assign(handle, node_name)
    }

    /// Binds the same subproblem handle to every node added so far.
    pub fn assign_subproblem(&mut self, handle: H)
    where
        H: Clone,
    {
        self.graph.assign_all(handle);
    }

    pub fn graph(&self) -> &PolicyGraph<D, H> {
        &self.graph
    }

    pub fn into_graph(self) -> PolicyGraph<D, H> {
        self.graph
    }
}

impl<D, H> From<LinearPolicyGraph<D, H>> for PolicyGraph<D, H> {
    fn from(lpg: LinearPolicyGraph<D, H>) -> Self {
        lpg.into_graph()
    }
}
