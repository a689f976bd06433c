use ltm_core::errors::{serde_error, LtmError};
use ltm_core::provenance::SchemaVersion;
use ltm_core::{Directedness, NodeId};
use serde::{Deserialize, Serialize};

use crate::model::GraphModel;

const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &GraphModel) -> Result<Vec<u8>, LtmError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable).map_err(|err| serde_error("serialize-bytes", err))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<GraphModel, LtmError> {
    let serializable: SerializableGraph =
        bincode::deserialize(bytes).map_err(|err| serde_error("deserialize-bytes", err))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &GraphModel) -> Result<String, LtmError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable).map_err(|err| serde_error("serialize-json", err))
}

/// Restores a graph from a JSON string. Structural checks run again on load.
pub fn graph_from_json(json: &str) -> Result<GraphModel, LtmError> {
    let serializable: SerializableGraph =
        serde_json::from_str(json).map_err(|err| serde_error("deserialize-json", err))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    directedness: Directedness,
    nodes: Vec<SerializableNode>,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNode {
    id: u64,
    #[serde(default)]
    threshold: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge {
    source: u64,
    target: u64,
    #[serde(default)]
    influence: Option<f64>,
}

impl SerializableGraph {
    fn from_graph(graph: &GraphModel) -> Self {
        let nodes = graph
            .node_ids()
            .into_iter()
            .map(|node| SerializableNode {
                id: node.as_raw(),
                threshold: graph.threshold_of(node),
            })
            .collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(|edge| SerializableEdge {
                source: edge.source.as_raw(),
                target: edge.target.as_raw(),
                influence: edge.influence,
            })
            .collect();
        Self {
            schema_version: GRAPH_SCHEMA,
            directedness: graph.directedness(),
            nodes,
            edges,
        }
    }

    fn into_graph(self) -> Result<GraphModel, LtmError> {
        if self.schema_version.major != GRAPH_SCHEMA.major {
            return Err(serde_error(
                "schema-mismatch",
                format!(
                    "graph schema {}.{}.{} is not supported",
                    self.schema_version.major, self.schema_version.minor, self.schema_version.patch
                ),
            ));
        }
        let mut graph = GraphModel::new(self.directedness);
        for node in &self.nodes {
            graph.add_node(NodeId::from_raw(node.id));
        }
        for edge in self.edges {
            let source = NodeId::from_raw(edge.source);
            let target = NodeId::from_raw(edge.target);
            match edge.influence {
                Some(influence) => graph.add_edge_with_influence(source, target, influence)?,
                None => graph.add_edge(source, target)?,
            }
        }
        for node in self.nodes {
            if let Some(threshold) = node.threshold {
                graph.set_threshold(NodeId::from_raw(node.id), threshold)?;
            }
        }
        Ok(graph)
    }
}
