use ltm_core::errors::{graph_error, LtmError};
use ltm_core::rng::RngHandle;
use ltm_core::{Directedness, NodeId};
use rand::Rng;

use crate::model::GraphModel;

/// Generates an Erdős–Rényi `G(n, p)` graph over nodes `0..n_nodes`.
pub fn gen_gnp(
    n_nodes: usize,
    probability: f64,
    directedness: Directedness,
    rng: &mut RngHandle,
) -> Result<GraphModel, LtmError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(graph_error(
            "invalid-probability",
            "edge probability must lie in [0, 1]",
        )
        .with_context("probability", probability));
    }
    let mut graph = with_nodes(n_nodes, directedness);
    for source in 0..n_nodes {
        let targets = match directedness {
            Directedness::Directed => 0..n_nodes,
            Directedness::Undirected => source + 1..n_nodes,
        };
        for target in targets {
            if source != target && rng.gen_bool(probability) {
                graph.add_edge(node(source), node(target))?;
            }
        }
    }
    Ok(graph)
}

/// Generates a connected graph: a random spanning tree rooted at node 0 plus
/// up to `extra_edges` additional random edges.
///
/// Directed trees point away from the root, so every node is reachable from node 0.
pub fn gen_connected(
    n_nodes: usize,
    extra_edges: usize,
    directedness: Directedness,
    rng: &mut RngHandle,
) -> Result<GraphModel, LtmError> {
    let mut graph = with_nodes(n_nodes, directedness);
    for child in 1..n_nodes {
        let parent = rng.gen_range(0..child);
        graph.add_edge(node(parent), node(child))?;
    }
    if n_nodes < 2 {
        return Ok(graph);
    }
    for _ in 0..extra_edges {
        let source = node(rng.gen_range(0..n_nodes));
        let target = node(rng.gen_range(0..n_nodes));
        if source == target || graph.contains_edge(source, target) {
            continue;
        }
        graph.add_edge(source, target)?;
    }
    Ok(graph)
}

/// Assigns every node a threshold drawn uniformly from `[0, 1)`.
pub fn randomize_thresholds(graph: &mut GraphModel, rng: &mut RngHandle) -> Result<(), LtmError> {
    for id in graph.node_ids() {
        graph.set_threshold(id, rng.gen::<f64>())?;
    }
    Ok(())
}

fn with_nodes(n_nodes: usize, directedness: Directedness) -> GraphModel {
    let mut graph = GraphModel::new(directedness);
    for index in 0..n_nodes {
        graph.add_node(node(index));
    }
    graph
}

fn node(index: usize) -> NodeId {
    NodeId::from_raw(index as u64)
}
