use std::collections::{BTreeMap, BTreeSet};

use ltm_core::errors::{graph_error, ErrorInfo, LtmError};
use ltm_core::{Directedness, InfluenceGraph, NodeId};
use serde::{Deserialize, Serialize};

use crate::overlay::AttributeOverlay;

/// Edge description returned by [`GraphModel::edges`] and
/// [`NormalizedGraph::edges`](crate::NormalizedGraph::edges).
///
/// Undirected edges are reported with `source < target` and no influence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source endpoint (the smaller endpoint for undirected edges).
    pub source: NodeId,
    /// Target endpoint.
    pub target: NodeId,
    /// Influence weight when set; always `None` for undirected edges.
    pub influence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct NodeEntry {
    pub(crate) threshold: Option<f64>,
    /// Successors, or neighbours for undirected graphs.
    pub(crate) successors: BTreeSet<NodeId>,
    /// Predecessors, or neighbours for undirected graphs.
    pub(crate) predecessors: BTreeSet<NodeId>,
}

/// Edge storage, one representation per directedness.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EdgeSet {
    Directed(BTreeMap<(NodeId, NodeId), Option<f64>>),
    /// Pairs are stored as `(min, max)`.
    Undirected(BTreeSet<(NodeId, NodeId)>),
}

/// Raw graph with optional threshold and influence attributes.
///
/// Parallel edges and self-loops are rejected at insertion. Attribute bounds
/// are not checked here; [`initialize`](crate::initialize) validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphModel {
    pub(crate) nodes: BTreeMap<NodeId, NodeEntry>,
    pub(crate) edges: EdgeSet,
}

impl GraphModel {
    /// Creates an empty graph.
    pub fn new(directedness: Directedness) -> Self {
        let edges = match directedness {
            Directedness::Directed => EdgeSet::Directed(BTreeMap::new()),
            Directedness::Undirected => EdgeSet::Undirected(BTreeSet::new()),
        };
        Self {
            nodes: BTreeMap::new(),
            edges,
        }
    }

    /// Builds a graph from `(source, target)` pairs, creating endpoints on demand.
    pub fn from_edges<I, N>(directedness: Directedness, pairs: I) -> Result<Self, LtmError>
    where
        I: IntoIterator<Item = (N, N)>,
        N: Into<NodeId>,
    {
        let mut graph = Self::new(directedness);
        for (source, target) in pairs {
            graph.add_edge(source.into(), target.into())?;
        }
        Ok(graph)
    }

    /// Returns whether the graph is directed.
    pub fn directedness(&self) -> Directedness {
        match self.edges {
            EdgeSet::Directed(_) => Directedness::Directed,
            EdgeSet::Undirected(_) => Directedness::Undirected,
        }
    }

    /// Adds an isolated node. Returns `false` when the node already existed.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, NodeEntry::default());
        true
    }

    /// Adds an edge without an influence attribute.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), LtmError> {
        self.insert_edge(source, target, None)
    }

    /// Adds a directed edge carrying an explicit influence.
    pub fn add_edge_with_influence(
        &mut self,
        source: NodeId,
        target: NodeId,
        influence: f64,
    ) -> Result<(), LtmError> {
        if !self.directedness().is_directed() {
            return Err(undirected_influence(source, target));
        }
        self.insert_edge(source, target, Some(influence))
    }

    /// Sets the threshold of an existing node.
    pub fn set_threshold(&mut self, node: NodeId, threshold: f64) -> Result<(), LtmError> {
        let entry = self.nodes.get_mut(&node).ok_or_else(|| unknown_node(node))?;
        entry.threshold = Some(threshold);
        Ok(())
    }

    /// Sets the influence of an existing directed edge.
    pub fn set_influence(
        &mut self,
        source: NodeId,
        target: NodeId,
        influence: f64,
    ) -> Result<(), LtmError> {
        match &mut self.edges {
            EdgeSet::Undirected(_) => Err(undirected_influence(source, target)),
            EdgeSet::Directed(edges) => {
                let slot = edges
                    .get_mut(&(source, target))
                    .ok_or_else(|| unknown_edge(source, target))?;
                *slot = Some(influence);
                Ok(())
            }
        }
    }

    /// Applies every entry of an attribute overlay.
    pub fn apply_overlay(&mut self, overlay: &AttributeOverlay) -> Result<(), LtmError> {
        for entry in &overlay.thresholds {
            self.set_threshold(entry.node, entry.threshold)?;
        }
        for entry in &overlay.influences {
            self.set_influence(entry.source, entry.target, entry.influence)?;
        }
        Ok(())
    }

    /// Returns the stored threshold of `node`, if any.
    pub fn threshold_of(&self, node: NodeId) -> Option<f64> {
        self.nodes.get(&node).and_then(|entry| entry.threshold)
    }

    /// Returns the stored influence of the directed edge `(source, target)`, if any.
    pub fn influence_of(&self, source: NodeId, target: NodeId) -> Option<f64> {
        match &self.edges {
            EdgeSet::Directed(edges) => edges.get(&(source, target)).copied().flatten(),
            EdgeSet::Undirected(_) => None,
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        match &self.edges {
            EdgeSet::Directed(edges) => edges.len(),
            EdgeSet::Undirected(edges) => edges.len(),
        }
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns whether `node` belongs to the graph.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns whether the edge exists; argument order is ignored for undirected graphs.
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        match &self.edges {
            EdgeSet::Directed(edges) => edges.contains_key(&(source, target)),
            EdgeSet::Undirected(edges) => edges.contains(&ordered(source, target)),
        }
    }

    /// Returns the number of inbound edges (neighbours for undirected graphs).
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.nodes
            .get(&node)
            .map(|entry| entry.predecessors.len())
            .unwrap_or(0)
    }

    /// Returns the number of outbound edges (neighbours for undirected graphs).
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.nodes
            .get(&node)
            .map(|entry| entry.successors.len())
            .unwrap_or(0)
    }

    /// Returns node identifiers in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Returns all edges sorted by `(source, target)`.
    pub fn edges(&self) -> Vec<Edge> {
        match &self.edges {
            EdgeSet::Directed(edges) => edges
                .iter()
                .map(|(&(source, target), influence)| Edge {
                    source,
                    target,
                    influence: *influence,
                })
                .collect(),
            EdgeSet::Undirected(edges) => edges
                .iter()
                .map(|&(source, target)| Edge {
                    source,
                    target,
                    influence: None,
                })
                .collect(),
        }
    }

    fn insert_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        influence: Option<f64>,
    ) -> Result<(), LtmError> {
        if source == target {
            return Err(graph_error("self-loop", "self-loops are not supported")
                .with_edge(source, target));
        }
        let inserted = match &mut self.edges {
            EdgeSet::Directed(edges) => {
                if edges.contains_key(&(source, target)) {
                    false
                } else {
                    edges.insert((source, target), influence);
                    true
                }
            }
            EdgeSet::Undirected(edges) => edges.insert(ordered(source, target)),
        };
        if !inserted {
            return Err(LtmError::MultiEdgeUnsupported(ErrorInfo::new(
                "duplicate-edge",
                format!("edge ({source}, {target}) already exists"),
            ))
            .with_edge(source, target)
            .with_hint("linear threshold diffusion is not defined for graphs with multi-edges"));
        }
        let directed = self.directedness().is_directed();
        let from = self.nodes.entry(source).or_default();
        from.successors.insert(target);
        if !directed {
            from.predecessors.insert(target);
        }
        let to = self.nodes.entry(target).or_default();
        to.predecessors.insert(source);
        if !directed {
            to.successors.insert(source);
        }
        Ok(())
    }
}

impl InfluenceGraph for GraphModel {
    fn directedness(&self) -> Directedness {
        GraphModel::directedness(self)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.nodes.keys().copied())
    }

    fn threshold(&self, node: NodeId) -> Option<f64> {
        self.threshold_of(node)
    }

    fn out_neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.nodes.get(&node) {
            Some(entry) => Box::new(entry.successors.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn in_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, Option<f64>)> + '_> {
        let Some(entry) = self.nodes.get(&node) else {
            return Box::new(std::iter::empty());
        };
        Box::new(
            entry
                .predecessors
                .iter()
                .map(move |source| (*source, self.influence_of(*source, node))),
        )
    }

    fn degree(&self, node: NodeId) -> usize {
        match self.directedness() {
            Directedness::Directed => self.in_degree(node) + self.out_degree(node),
            Directedness::Undirected => self.out_degree(node),
        }
    }

    fn in_degree(&self, node: NodeId) -> usize {
        GraphModel::in_degree(self, node)
    }
}

fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn unknown_node(node: NodeId) -> LtmError {
    graph_error("unknown-node", format!("node {node} does not exist")).with_node(node)
}

fn unknown_edge(source: NodeId, target: NodeId) -> LtmError {
    graph_error("unknown-edge", format!("edge ({source}, {target}) does not exist"))
        .with_edge(source, target)
}

fn undirected_influence(source: NodeId, target: NodeId) -> LtmError {
    graph_error(
        "undirected-influence",
        "influence is not defined for undirected edges",
    )
    .with_edge(source, target)
    .with_hint("undirected diffusion activates every neighbour unconditionally")
}
