use std::collections::BTreeSet;

use ltm_core::errors::LtmError;
use ltm_core::{InfluenceGraph, NodeId};
use ltm_diffusion::simulate;
use tracing::trace;

use crate::config::CoverageCheck;
use crate::ordering::CandidateOrdering;

/// Seeds chosen so far and the nodes they dominate.
#[derive(Debug, Default)]
struct Cover {
    seeds: BTreeSet<NodeId>,
    dominated: BTreeSet<NodeId>,
}

impl Cover {
    fn add_seed<G: InfluenceGraph + ?Sized>(&mut self, graph: &G, node: NodeId) {
        if !self.seeds.insert(node) {
            return;
        }
        self.dominated.insert(node);
        self.dominated.extend(graph.out_neighbors(node));
        trace!(%node, dominated = self.dominated.len(), "seed added");
    }

    fn is_complete<G: InfluenceGraph + ?Sized>(
        &self,
        graph: &G,
        check: CoverageCheck,
    ) -> Result<bool, LtmError> {
        match check {
            CoverageCheck::Bookkeeping => Ok(self.dominated.len() == graph.node_count()),
            CoverageCheck::Simulation if self.seeds.is_empty() => Ok(false),
            CoverageCheck::Simulation => {
                Ok(simulate(graph, self.seeds.iter().copied(), 1)?.is_fully_activated())
            }
        }
    }
}

/// Degree-pruned greedy dominating set.
///
/// Isolated nodes (and, when directed, nodes without in-edges) are forced
/// seeds; every degree-1 node forces its sole neighbour; the remaining nodes
/// of degree two or more join in descending degree order unless already
/// dominated, until `check` reports full coverage.
pub(crate) fn degree_greedy<G: InfluenceGraph + ?Sized>(
    graph: &G,
    ordering: &CandidateOrdering,
    check: CoverageCheck,
) -> Result<BTreeSet<NodeId>, LtmError> {
    let directed = graph.directedness().is_directed();
    let mut cover = Cover::default();

    for node in graph.nodes() {
        if graph.degree(node) == 0 || (directed && graph.in_degree(node) == 0) {
            cover.add_seed(graph, node);
        }
    }
    for node in graph.nodes() {
        if graph.degree(node) != 1 {
            continue;
        }
        if let Some(neighbor) = graph.neighbors(node).first() {
            cover.add_seed(graph, *neighbor);
        }
    }

    if cover.is_complete(graph, check)? {
        return Ok(cover.seeds);
    }
    for (node, degree) in ordering.iter() {
        if degree < 2 || cover.dominated.contains(&node) {
            continue;
        }
        cover.add_seed(graph, node);
        if cover.is_complete(graph, check)? {
            break;
        }
    }
    Ok(cover.seeds)
}
