use std::collections::BTreeSet;

use ltm_core::{InfluenceGraph, NodeId};
use tracing::trace;

use crate::ordering::CandidateOrdering;

/// Sources of a burning sequence, in the order they were lit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BurningSequence {
    pub(crate) sources: Vec<NodeId>,
    pub(crate) rounds: usize,
}

/// Greedy burning: each round the fire spreads from the nodes that caught
/// last round, then the best-ranked node not yet reached is lit as a new
/// source. Stops once every node has been reached.
pub(crate) fn burning_sequence<G: InfluenceGraph + ?Sized>(
    graph: &G,
    ordering: &CandidateOrdering,
) -> BurningSequence {
    let total = graph.node_count();
    let mut reached: BTreeSet<NodeId> = BTreeSet::new();
    let mut burning: Vec<NodeId> = Vec::new();
    let mut sources = Vec::new();
    let mut rounds = 0usize;

    while reached.len() < total {
        rounds += 1;
        let mut ignited = BTreeSet::new();
        for node in &burning {
            ignited.extend(
                graph
                    .out_neighbors(*node)
                    .filter(|next| !reached.contains(next)),
            );
        }
        reached.extend(ignited.iter().copied());
        burning = ignited.into_iter().collect();

        if reached.len() < total {
            if let Some(source) = ordering.first_outside(&reached) {
                reached.insert(source);
                burning.push(source);
                sources.push(source);
            }
        }
        trace!(round = rounds, reached = reached.len(), "burning round");
    }

    BurningSequence { sources, rounds }
}
