//! Read-only views of a policy graph for reporting and rendering.
//!
//! - [`GraphSummary`]: one line per node plus the stage count, via `Display`
//! - [`GraphExport`]: adjacency-list dump with node and edge attributes,
//!   serializable with the `serde` feature

use std::fmt;

use crate::engine::graph::PolicyGraph;
use crate::engine::node::{Node, NodeType};
use crate::engine::probability::Probability;
use crate::engine::scenario::Scenario;

/// Per-node line of a [`GraphSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub name: String,
    pub node_type: NodeType,
    /// Scenario names, in declaration order.
    pub scenarios: Vec<String>,
    pub probability: Probability,
}

/// Console-style overview of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    pub nodes: Vec<NodeSummary>,
    pub stages: usize,
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            let scenarios = match node.node_type {
                NodeType::Deterministic => node.scenarios.join(", "),
                NodeType::Stochastic => format!("[{}]", node.scenarios.join(", ")),
            };
            writeln!(
                f,
                "Node name: {} \t Node Type: {} \t Scenarios: {} \t Probability: {}",
                node.name, node.node_type, scenarios, node.probability
            )?;
        }
        write!(f, "Stages: {}", self.stages)
    }
}

/// Exported node with every attribute a renderer consumes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeExport<D> {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub node_type: NodeType,
    pub parent: Option<String>,
    pub data: Vec<Scenario<D>>,
    pub p: Probability,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeExport {
    pub from: String,
    pub to: String,
    pub p: Probability,
}

/// Structured dump of a policy graph: nodes in insertion order, then edges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphExport<D> {
    pub nodes: Vec<NodeExport<D>>,
    pub edges: Vec<EdgeExport>,
    pub stages: usize,
}

impl<D, H> PolicyGraph<D, H> {
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self
                .nodes()
                .iter()
                .map(|n| NodeSummary {
                    name: n.name().to_string(),
                    node_type: n.node_type(),
                    scenarios: n.scenarios().iter().map(|s| s.name().to_string()).collect(),
                    probability: n.probability(),
                })
                .collect(),
            stages: self.stage_count(),
        }
    }

    pub fn export(&self) -> GraphExport<D>
    where
        D: Clone,
    {
        GraphExport {
            nodes: self.nodes().iter().map(export_node).collect(),
            edges: self
                .edges()
                .iter()
                .map(|e| EdgeExport {
                    from: self.name_of(e.src).to_string(),
                    to: self.name_of(e.dst).to_string(),
                    p: e.p.clone(),
                })
                .collect(),
            stages: self.stage_count(),
        }
    }
}

fn export_node<D: Clone>(node: &Node<D>) -> NodeExport<D> {
    NodeExport {
        name: node.name().to_string(),
        node_type: node.node_type(),
        parent: node.parent_name().map(str::to_string),
        data: node.scenarios().to_vec(),
        p: node.probability(),
        names: node.name_list(),
    }
}
