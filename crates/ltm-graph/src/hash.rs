use sha2::{Digest, Sha256};

use crate::model::GraphModel;

/// Computes the canonical structural hash of a graph, attributes included.
pub fn canonical_hash(graph: &GraphModel) -> String {
    let mut hasher = Sha256::new();
    if graph.directedness().is_directed() {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }

    let nodes = graph.node_ids();
    hasher.update((nodes.len() as u64).to_le_bytes());
    for node in nodes {
        hasher.update(node.as_raw().to_le_bytes());
        encode_option_f64(graph.threshold_of(node), &mut hasher);
    }

    let edges = graph.edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        hasher.update(edge.source.as_raw().to_le_bytes());
        hasher.update(edge.target.as_raw().to_le_bytes());
        encode_option_f64(edge.influence, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_option_f64(value: Option<f64>, hasher: &mut Sha256) {
    match value {
        Some(v) => {
            hasher.update(b":some");
            hasher.update(v.to_bits().to_le_bytes());
        }
        None => hasher.update(b":none"),
    }
}
