//! Deterministic degree ranking shared by both heuristics.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use ltm_core::{InfluenceGraph, NodeId};

/// Nodes ranked by descending degree, ties broken by ascending identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOrdering {
    ranked: Vec<(NodeId, usize)>,
}

impl CandidateOrdering {
    /// Ranks every node of `graph`.
    pub fn new<G: InfluenceGraph + ?Sized>(graph: &G) -> Self {
        let mut ranked: Vec<(NodeId, usize)> =
            graph.nodes().map(|node| (node, graph.degree(node))).collect();
        ranked.sort_by_key(|(node, degree)| (Reverse(*degree), *node));
        Self { ranked }
    }

    /// Iterates `(node, degree)` pairs, best first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.ranked.iter().copied()
    }

    /// Returns the best-ranked node not contained in `excluded`.
    pub fn first_outside(&self, excluded: &BTreeSet<NodeId>) -> Option<NodeId> {
        self.ranked
            .iter()
            .map(|(node, _)| *node)
            .find(|node| !excluded.contains(node))
    }

    /// Number of ranked nodes.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Returns whether no node is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
