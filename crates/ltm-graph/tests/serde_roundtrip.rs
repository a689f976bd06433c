use ltm_core::errors::ErrorKind;
use ltm_core::rng::RngHandle;
use ltm_core::Directedness;
use ltm_graph::{
    canonical_hash, gen_connected, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, randomize_thresholds,
};

#[test]
fn json_round_trip_preserves_hash() {
    let mut rng = RngHandle::from_seed(11);
    let mut graph = gen_connected(12, 10, Directedness::Directed, &mut rng).unwrap();
    for node in graph.node_ids() {
        graph
            .set_threshold(node, (node.as_raw() % 4) as f64 / 4.0)
            .unwrap();
    }

    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn bytes_round_trip_preserves_hash() {
    let mut rng = RngHandle::from_seed(12);
    let graph = gen_connected(20, 15, Directedness::Undirected, &mut rng).unwrap();
    let bytes = graph_to_bytes(&graph).unwrap();
    let restored = graph_from_bytes(&bytes).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn hash_depends_on_attributes() {
    let mut rng = RngHandle::from_seed(13);
    let mut graph = gen_connected(6, 2, Directedness::Directed, &mut rng).unwrap();
    let before = canonical_hash(&graph);
    randomize_thresholds(&mut graph, &mut rng).unwrap();
    assert_ne!(before, canonical_hash(&graph));
}

#[test]
fn json_with_parallel_edges_is_rejected() {
    let json = r#"{
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "directedness": "undirected",
        "nodes": [{"id": 1}, {"id": 2}],
        "edges": [{"source": 1, "target": 2}, {"source": 2, "target": 1}]
    }"#;
    let err = graph_from_json(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MultiEdgeUnsupported);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = graph_from_json("{not json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serde);
    assert_eq!(err.info().code, "deserialize-json");
}
