use std::collections::BTreeMap;

use ltm_core::errors::{ErrorInfo, LtmError};
use ltm_core::{
    validate_influence, validate_threshold, Directedness, InfluenceGraph, NodeId,
    DEFAULT_THRESHOLD,
};
use tracing::debug;

use crate::model::{Edge, EdgeSet, GraphModel};

/// Graph whose every node carries a threshold and, when directed, every edge an influence.
///
/// Produced by [`initialize`]; independent of the [`GraphModel`] it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGraph {
    thresholds: BTreeMap<NodeId, f64>,
    topology: Topology,
    edge_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Topology {
    Directed {
        successors: BTreeMap<NodeId, Vec<NodeId>>,
        predecessors: BTreeMap<NodeId, Vec<(NodeId, f64)>>,
    },
    Undirected {
        neighbors: BTreeMap<NodeId, Vec<NodeId>>,
    },
}

/// Fills missing thresholds and influences with model defaults and validates bounds.
///
/// * unset threshold: [`DEFAULT_THRESHOLD`]
/// * unset influence on `(u, v)`: `1 / in_degree(v)`
/// * any value outside `[0, 1]`: [`LtmError::InvalidParameter`] naming the node or edge
///
/// Undirected graphs only receive thresholds.
pub fn initialize(graph: &GraphModel) -> Result<NormalizedGraph, LtmError> {
    let mut thresholds = BTreeMap::new();
    let mut defaulted_thresholds = 0usize;
    for (node, entry) in &graph.nodes {
        let threshold = match entry.threshold {
            Some(value) => validate_threshold(*node, value)?,
            None => {
                defaulted_thresholds += 1;
                DEFAULT_THRESHOLD
            }
        };
        thresholds.insert(*node, threshold);
    }

    let mut defaulted_influences = 0usize;
    let topology = match &graph.edges {
        EdgeSet::Directed(edges) => {
            let mut successors: BTreeMap<NodeId, Vec<NodeId>> =
                graph.nodes.keys().map(|node| (*node, Vec::new())).collect();
            let mut predecessors: BTreeMap<NodeId, Vec<(NodeId, f64)>> =
                graph.nodes.keys().map(|node| (*node, Vec::new())).collect();
            for (&(source, target), influence) in edges {
                let influence = match influence {
                    Some(value) => validate_influence(source, target, *value)?,
                    None => {
                        defaulted_influences += 1;
                        equal_split(graph, source, target)?
                    }
                };
                successors.entry(source).or_default().push(target);
                predecessors
                    .entry(target)
                    .or_default()
                    .push((source, influence));
            }
            Topology::Directed {
                successors,
                predecessors,
            }
        }
        EdgeSet::Undirected(_) => Topology::Undirected {
            neighbors: graph
                .nodes
                .iter()
                .map(|(node, entry)| (*node, entry.successors.iter().copied().collect()))
                .collect(),
        },
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        defaulted_thresholds,
        defaulted_influences,
        "graph normalized"
    );

    Ok(NormalizedGraph {
        thresholds,
        topology,
        edge_count: graph.edge_count(),
    })
}

fn equal_split(graph: &GraphModel, source: NodeId, target: NodeId) -> Result<f64, LtmError> {
    let in_degree = graph.in_degree(target);
    if in_degree == 0 {
        return Err(LtmError::InvalidParameter(ErrorInfo::new(
            "zero-in-degree",
            format!("cannot split influence of edge ({source}, {target}): target has no in-edges"),
        ))
        .with_edge(source, target));
    }
    Ok(1.0 / in_degree as f64)
}

impl NormalizedGraph {
    /// Returns whether the graph is directed.
    pub fn directedness(&self) -> Directedness {
        match self.topology {
            Topology::Directed { .. } => Directedness::Directed,
            Topology::Undirected { .. } => Directedness::Undirected,
        }
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Returns the influence of the directed edge `(source, target)`.
    pub fn influence(&self, source: NodeId, target: NodeId) -> Option<f64> {
        match &self.topology {
            Topology::Directed { predecessors, .. } => predecessors
                .get(&target)?
                .iter()
                .find(|(from, _)| *from == source)
                .map(|(_, influence)| *influence),
            Topology::Undirected { .. } => None,
        }
    }

    /// Returns `(node, threshold)` pairs in ascending node order.
    pub fn node_thresholds(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.thresholds.iter().map(|(node, t)| (*node, *t))
    }

    /// Returns all edges sorted by `(source, target)`.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count);
        match &self.topology {
            Topology::Directed { predecessors, .. } => {
                for (target, inbound) in predecessors {
                    for (source, influence) in inbound {
                        edges.push(Edge {
                            source: *source,
                            target: *target,
                            influence: Some(*influence),
                        });
                    }
                }
                edges.sort_by_key(|edge| (edge.source, edge.target));
            }
            Topology::Undirected { neighbors } => {
                for (node, adjacent) in neighbors {
                    for other in adjacent.iter().filter(|other| *other > node) {
                        edges.push(Edge {
                            source: *node,
                            target: *other,
                            influence: None,
                        });
                    }
                }
            }
        }
        edges
    }

    /// Rebuilds a [`GraphModel`] with every attribute set explicitly.
    pub fn to_model(&self) -> Result<GraphModel, LtmError> {
        let mut model = GraphModel::new(self.directedness());
        for (node, threshold) in &self.thresholds {
            model.add_node(*node);
            model.set_threshold(*node, *threshold)?;
        }
        for edge in self.edges() {
            match edge.influence {
                Some(influence) => {
                    model.add_edge_with_influence(edge.source, edge.target, influence)?
                }
                None => model.add_edge(edge.source, edge.target)?,
            }
        }
        Ok(model)
    }
}

impl InfluenceGraph for NormalizedGraph {
    fn directedness(&self) -> Directedness {
        NormalizedGraph::directedness(self)
    }

    fn node_count(&self) -> usize {
        self.thresholds.len()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.thresholds.contains_key(&node)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.thresholds.keys().copied())
    }

    fn threshold(&self, node: NodeId) -> Option<f64> {
        self.thresholds.get(&node).copied()
    }

    fn out_neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        let adjacent = match &self.topology {
            Topology::Directed { successors, .. } => successors.get(&node),
            Topology::Undirected { neighbors } => neighbors.get(&node),
        };
        match adjacent {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn in_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, Option<f64>)> + '_> {
        match &self.topology {
            Topology::Directed { predecessors, .. } => match predecessors.get(&node) {
                Some(list) => Box::new(list.iter().map(|(source, w)| (*source, Some(*w)))),
                None => Box::new(std::iter::empty()),
            },
            Topology::Undirected { neighbors } => match neighbors.get(&node) {
                Some(list) => Box::new(list.iter().map(|source| (*source, None))),
                None => Box::new(std::iter::empty()),
            },
        }
    }

    fn degree(&self, node: NodeId) -> usize {
        match &self.topology {
            Topology::Directed {
                successors,
                predecessors,
            } => {
                successors.get(&node).map_or(0, Vec::len)
                    + predecessors.get(&node).map_or(0, Vec::len)
            }
            Topology::Undirected { neighbors } => neighbors.get(&node).map_or(0, Vec::len),
        }
    }

    fn in_degree(&self, node: NodeId) -> usize {
        match &self.topology {
            Topology::Directed { predecessors, .. } => predecessors.get(&node).map_or(0, Vec::len),
            Topology::Undirected { neighbors } => neighbors.get(&node).map_or(0, Vec::len),
        }
    }

    fn check_initialized(&self) -> Result<(), LtmError> {
        Ok(())
    }
}
