#![deny(missing_docs)]

//! Core identifiers, the graph contract consumed by the diffusion engine, and
//! the error taxonomy shared by every LTM crate.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod params;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, ErrorKind, LtmError};
pub use params::{validate_influence, validate_threshold, DEFAULT_THRESHOLD};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};

/// Opaque, hashable and totally ordered node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Whether edges are ordered pairs or unordered pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Directedness {
    /// Ordered `(source, target)` edges carrying an influence weight.
    Directed,
    /// Unordered edges without weights; diffusion is plain adjacency.
    Undirected,
}

impl Directedness {
    /// Returns `true` for [`Directedness::Directed`].
    pub fn is_directed(self) -> bool {
        matches!(self, Directedness::Directed)
    }
}

/// Describes the read-only graph contract consumed by diffusion and seed selection.
///
/// Every iterator yields nodes in ascending identifier order so that callers
/// observe a stable ordering. For undirected graphs `out_neighbors` and
/// `in_edges` both enumerate the neighbourhood, the latter with no influence.
pub trait InfluenceGraph: Send + Sync {
    /// Returns whether the graph is directed.
    fn directedness(&self) -> Directedness;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns whether `node` belongs to the graph.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Returns an iterator over all node identifiers in ascending order.
    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Returns the threshold of `node`, or `None` when unset or unknown.
    fn threshold(&self, node: NodeId) -> Option<f64>;

    /// Returns the successors (directed) or neighbours (undirected) of `node`.
    fn out_neighbors(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Returns the in-neighbours of `node` paired with the influence of the inbound edge.
    fn in_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, Option<f64>)> + '_>;

    /// Returns the total degree of `node` (in plus out for directed graphs).
    fn degree(&self, node: NodeId) -> usize;

    /// Returns the number of inbound edges of `node` (the degree for undirected graphs).
    fn in_degree(&self, node: NodeId) -> usize {
        self.in_edges(node).count()
    }

    /// Returns every node adjacent to `node` regardless of direction, ascending.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut adjacent: BTreeSet<NodeId> = self.out_neighbors(node).collect();
        adjacent.extend(self.in_edges(node).map(|(source, _)| source));
        adjacent.into_iter().collect()
    }

    /// Verifies that every parameter needed by the diffusion rule is present and bounded.
    fn check_initialized(&self) -> Result<(), LtmError> {
        let directed = self.directedness().is_directed();
        for node in self.nodes() {
            let Some(threshold) = self.threshold(node) else {
                return Err(LtmError::UninitializedParameter(ErrorInfo::new(
                    "missing-threshold",
                    format!("node {node} has no threshold"),
                ))
                .with_node(node)
                .with_hint("normalize the graph with `initialize` before simulating"));
            };
            validate_threshold(node, threshold)?;
            if !directed {
                continue;
            }
            for (source, influence) in self.in_edges(node) {
                let Some(influence) = influence else {
                    return Err(LtmError::UninitializedParameter(ErrorInfo::new(
                        "missing-influence",
                        format!("edge ({source}, {node}) has no influence"),
                    ))
                    .with_edge(source, node)
                    .with_hint("normalize the graph with `initialize` before simulating"));
                };
                validate_influence(source, node, influence)?;
            }
        }
        Ok(())
    }
}
