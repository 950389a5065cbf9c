//! # Policy Graph
//!
//! The directed tree of stages that stochastic-programming algorithms walk.
//!
//! ## Key Components
//!
//! - **PolicyGraph**: owns every [`Node`], the parent → child edges, and the
//!   map from node name to an opaque subproblem handle `H`
//! - **EdgeData**: a transition annotated with the child's probability `p`
//!
//! ## Invariants
//!
//! - Node names are unique; the root is always named [`ROOT_NAME`] with `p = 1`
//! - Every non-root node has exactly one incoming edge, from a parent that was
//!   added before it
//! - An edge's `p` is the child node's `p`
//! - A failing call leaves the graph untouched
//!
//! ## Design
//!
//! Nodes live in an insertion-ordered `Vec` indexed by name through an
//! `FxHashMap`. Children are kept per parent in a `SmallVec` since most stages
//! have a single successor. Because parents always precede children, node ids
//! are a topological order and depth is a single forward pass.
//!
//! ## Example
//!
//! ```rust
//! use policygraph_core::{PolicyGraph, Scenario};
//!
//! let mut graph: PolicyGraph<f64, &str> = PolicyGraph::new(Scenario::new("try", 0.0));
//! graph
//!     .add_child("root", "stage_2", vec![Scenario::new("a", 1.0), Scenario::new("b", 2.0)], vec![0.5, 0.5])
//!     .unwrap();
//! assert_eq!(graph.children_names("root").unwrap(), vec!["stage_2"]);
//! assert_eq!(graph.parent_name("stage_2").unwrap(), "root");
//! graph.assign("model", "stage_2").unwrap();
//! assert_eq!(graph.unassigned_nodes(), vec!["root"]);
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::GraphConfig;
use crate::engine::errors::GraphError;
use crate::engine::node::Node;
use crate::engine::probability::Probability;
use crate::engine::scenario::Scenario;

/// Name of the node every policy graph starts from.
pub const ROOT_NAME: &str = "root";

/// Position of a node in insertion order.
///
/// Parents are always inserted before their children, so ids are a
/// topological order of the tree.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

/// Position of an edge in insertion order.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u32);

/// A directed parent → child transition.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub id: EdgeId,
    pub src: NodeId,
    pub dst: NodeId,
    /// The child's probability, scalar or per scenario.
    pub p: Probability,
}

/// Scenario tree of a multi-stage decision process.
///
/// `D` is the opaque scenario payload, `H` the opaque subproblem handle bound
/// to nodes through [`PolicyGraph::assign`]. Neither is ever inspected.
///
/// Construction must be serialized by the owner; once built the graph is
/// plain data and can be shared for concurrent reads.
#[derive(Debug, Clone)]
pub struct PolicyGraph<D, H = ()> {
    config: GraphConfig,
    nodes: Vec<Node<D>>,
    node_index: FxHashMap<Arc<str>, NodeId>,
    edges: Vec<EdgeData>,
    children: FxHashMap<NodeId, SmallVec<[EdgeId; 4]>>,
    incoming: FxHashMap<NodeId, EdgeId>,
    assignments: FxHashMap<Arc<str>, H>,
}

impl<D, H> PolicyGraph<D, H> {
    /// Creates a graph whose deterministic root holds `root_scenario` with `p = 1`.
    pub fn new(root_scenario: Scenario<D>) -> Self {
        Self::build(root_scenario, GraphConfig::default())
    }

    /// Creates a graph with explicit configuration.
    ///
    /// Fails with [`GraphError::InvalidConfig`] if the configuration does not validate.
    pub fn with_config(root_scenario: Scenario<D>, config: GraphConfig) -> Result<Self, GraphError> {
        config.validate()?;
        Ok(Self::build(root_scenario, config))
    }

    fn build(root_scenario: Scenario<D>, config: GraphConfig) -> Self {
        let root = Node::root(root_scenario);
        let mut node_index = FxHashMap::default();
        node_index.insert(root.name_arc().clone(), NodeId(0));
        Self {
            config,
            nodes: vec![root],
            node_index,
            edges: Vec::new(),
            children: FxHashMap::default(),
            incoming: FxHashMap::default(),
            assignments: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn root(&self) -> &Node<D> {
        &self.nodes[0]
    }

    /// Registers `node` and, for a non-root node, the edge from its parent.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if the name is taken
    /// - [`GraphError::MissingParent`] if the node declares no parent
    /// - [`GraphError::UnknownParent`] if the parent is not in the graph
    /// - [`GraphError::CapacityExceeded`] if a new id would not fit in `u32`
    pub fn add_node(&mut self, node: Node<D>) -> Result<NodeId, GraphError> {
        if self.node_index.contains_key(node.name()) {
            return Err(GraphError::DuplicateNode(node.name().to_string()));
        }
        let parent_name = node
            .parent_name()
            .ok_or_else(|| GraphError::MissingParent(node.name().to_string()))?;
        let parent = self
            .node_id(parent_name)
            .ok_or_else(|| GraphError::UnknownParent {
                node: node.name().to_string(),
                parent: parent_name.to_string(),
            })?;

        let id = NodeId(next_index(self.nodes.len(), "nodes")?);
        let edge_id = EdgeId(next_index(self.edges.len(), "edges")?);
        let p = node.probability();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node = node.name(),
            parent = parent_name,
            node_type = %node.node_type(),
            scenarios = node.len(),
            "adding policy graph node"
        );

        self.node_index.insert(node.name_arc().clone(), id);
        self.nodes.push(node);
        self.add_edge(edge_id, parent, id, p);
        Ok(id)
    }

    /// Builds a node with the graph's tolerance and adds it under `parent`.
    pub fn add_child(
        &mut self,
        parent: &str,
        name: impl Into<Arc<str>>,
        scenarios: Vec<Scenario<D>>,
        probabilities: Vec<f64>,
    ) -> Result<NodeId, GraphError> {
        let node = Node::new_with_tolerance(
            name,
            scenarios,
            probabilities,
            self.config.density_tolerance,
        )?
        .with_parent(parent);
        self.add_node(node)
    }

    /// Trusted insert: endpoints exist and `p` was validated with the node.
    fn add_edge(&mut self, id: EdgeId, src: NodeId, dst: NodeId, p: Probability) {
        self.edges.push(EdgeData { id, src, dst, p });
        self.children.entry(src).or_default().push(id);
        self.incoming.insert(dst, id);
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    pub fn node(&self, name: &str) -> Option<&Node<D>> {
        self.node_id(name).and_then(|id| self.node_by_id(id))
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node<D>> {
        self.nodes.get(id.0 as usize)
    }

    pub(crate) fn name_of(&self, id: NodeId) -> &Arc<str> {
        self.nodes[id.0 as usize].name_arc()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// All nodes in insertion order, root first.
    pub fn nodes(&self) -> &[Node<D>] {
        &self.nodes
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|n| n.name())
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn require(&self, name: &str) -> Result<NodeId, GraphError> {
        self.node_id(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    /// Children of `parent_name` in insertion order.
    pub fn children_names(&self, parent_name: &str) -> Result<Vec<&str>, GraphError> {
        let id = self.require(parent_name)?;
        Ok(self
            .children
            .get(&id)
            .map(|edges| {
                edges
                    .iter()
                    .map(|e| &**self.name_of(self.edges[e.0 as usize].dst))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// The parent of `child_name`; [`GraphError::NoParent`] for the root.
    pub fn parent_name(&self, child_name: &str) -> Result<&str, GraphError> {
        let id = self.require(child_name)?;
        self.incoming
            .get(&id)
            .map(|e| &**self.name_of(self.edges[e.0 as usize].src))
            .ok_or_else(|| GraphError::NoParent(child_name.to_string()))
    }

    /// The `p` carried by the edge `from → to`, if that edge exists.
    pub fn edge_probability(&self, from: &str, to: &str) -> Option<&Probability> {
        let src = self.node_id(from)?;
        let dst = self.node_id(to)?;
        let edge = &self.edges[self.incoming.get(&dst)?.0 as usize];
        (edge.src == src).then_some(&edge.p)
    }

    /// Number of edges between the root and `name`.
    pub fn depth(&self, name: &str) -> Result<usize, GraphError> {
        let mut id = self.require(name)?;
        let mut depth = 0;
        while let Some(e) = self.incoming.get(&id) {
            id = self.edges[e.0 as usize].src;
            depth += 1;
        }
        Ok(depth)
    }

    /// Stages spanned by the tree: deepest root-to-leaf path plus one.
    pub fn stage_count(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        for edge in &self.edges {
            depths[edge.dst.0 as usize] = depths[edge.src.0 as usize] + 1;
        }
        depths.into_iter().max().unwrap_or(0) + 1
    }

    /// Binds `handle` to `node_name`, returning the handle it replaces.
    ///
    /// Fails with [`GraphError::UnknownNode`] if the node is not in the graph.
    pub fn assign(&mut self, handle: H, node_name: &str) -> Result<Option<H>, GraphError> {
        let key = self
            .node_index
            .get_key_value(node_name)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| GraphError::UnknownNode(node_name.to_string()))?;
        Ok(self.assignments.insert(key, handle))
    }

    /// Binds a clone of `handle` to every node currently in the graph.
    pub fn assign_all(&mut self, handle: H)
    where
        H: Clone,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(nodes = self.nodes.len(), "assigning subproblem to all nodes");

        for node in &self.nodes {
            self.assignments
                .insert(node.name_arc().clone(), handle.clone());
        }
    }

    pub fn assignment(&self, node_name: &str) -> Option<&H> {
        self.assignments.get(node_name)
    }

    pub fn assignment_map(&self) -> &FxHashMap<Arc<str>, H> {
        &self.assignments
    }

    /// Replaces the whole assignment map.
    ///
    /// Every key must name a node in the graph; otherwise nothing changes and
    /// [`GraphError::UnknownNode`] is returned.
    pub fn set_assignment_map<K, I>(&mut self, assignments: I) -> Result<(), GraphError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, H)>,
    {
        let mut map = FxHashMap::default();
        for (name, handle) in assignments {
            let key = self
                .node_index
                .get_key_value(name.as_ref())
                .map(|(k, _)| k.clone())
                .ok_or_else(|| GraphError::UnknownNode(name.as_ref().to_string()))?;
            map.insert(key, handle);
        }
        self.assignments = map;
        Ok(())
    }

    /// Nodes with a handle, in insertion order.
    pub fn assigned_nodes(&self) -> Vec<&str> {
        self.node_names()
            .filter(|n| self.assignments.contains_key(*n))
            .collect()
    }

    /// Nodes without a handle, in insertion order. Recomputed on every call.
    pub fn unassigned_nodes(&self) -> Vec<&str> {
        self.node_names()
            .filter(|n| !self.assignments.contains_key(*n))
            .collect()
    }
}

/// Next `u32` id for a table currently holding `len` entries.
fn next_index(len: usize, table: &str) -> Result<u32, GraphError> {
    u32::try_from(len).map_err(|_| {
        GraphError::CapacityExceeded(format!("{} already holds {} entries", table, len))
    })
}
