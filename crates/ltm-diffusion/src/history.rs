//! Frozen per-round record of a simulation.

use std::collections::BTreeSet;

use ltm_core::errors::{serde_error, LtmError};
use ltm_core::NodeId;
use serde::{Deserialize, Serialize};

/// Terminal state of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// A round activated nothing new, or every node is active.
    Converged,
    /// The step budget ran out while nodes were still being activated.
    StepLimitReached,
}

/// Layered record of one simulation.
///
/// Layer 0 holds the deduplicated seeds and layer `k` the nodes first
/// activated in round `k`. Every layer is sorted ascending and no node
/// appears in more than one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializableHistory")]
pub struct ActivationHistory {
    layers: Vec<Vec<NodeId>>,
    termination: Termination,
    node_count: usize,
}

impl ActivationHistory {
    pub(crate) fn new(layers: Vec<Vec<NodeId>>, termination: Termination, node_count: usize) -> Self {
        Self {
            layers,
            termination,
            node_count,
        }
    }

    /// Returns all layers, seeds first.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Returns layer 0.
    pub fn seeds(&self) -> &[NodeId] {
        &self.layers[0]
    }

    /// Number of diffusion rounds that activated at least one node.
    pub fn rounds(&self) -> usize {
        self.layers.len() - 1
    }

    /// How the simulation ended.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Number of nodes in the simulated graph.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Iterates over every active node, layer by layer.
    pub fn activated(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.layers.iter().flatten().copied()
    }

    /// Returns the set of active nodes.
    pub fn activated_set(&self) -> BTreeSet<NodeId> {
        self.activated().collect()
    }

    /// Total number of active nodes, seeds included.
    pub fn activated_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Returns whether every node of the graph ended up active.
    pub fn is_fully_activated(&self) -> bool {
        self.activated_count() == self.node_count
    }

    /// Returns the round in which `node` became active (0 for seeds).
    pub fn round_of(&self, node: NodeId) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.binary_search(&node).is_ok())
    }
}

#[derive(Deserialize)]
struct SerializableHistory {
    layers: Vec<Vec<NodeId>>,
    termination: Termination,
    node_count: usize,
}

impl TryFrom<SerializableHistory> for ActivationHistory {
    type Error = LtmError;

    fn try_from(raw: SerializableHistory) -> Result<Self, Self::Error> {
        if raw.layers.first().map_or(true, Vec::is_empty) {
            return Err(serde_error("invalid-history", "layer 0 must hold at least one seed"));
        }
        let mut seen = BTreeSet::new();
        for (round, layer) in raw.layers.iter().enumerate() {
            if round > 0 && layer.is_empty() {
                return Err(serde_error("invalid-history", "empty activation layer")
                    .with_context("round", round));
            }
            if layer.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(serde_error("invalid-history", "layer is not strictly ascending")
                    .with_context("round", round));
            }
            if let Some(node) = layer.iter().find(|node| !seen.insert(**node)) {
                return Err(serde_error("invalid-history", "node appears in two layers")
                    .with_node(*node)
                    .with_context("round", round));
            }
        }
        if seen.len() > raw.node_count {
            return Err(serde_error(
                "invalid-history",
                "more active nodes than the graph holds",
            )
            .with_context("node_count", raw.node_count));
        }
        Ok(Self::new(raw.layers, raw.termination, raw.node_count))
    }
}
