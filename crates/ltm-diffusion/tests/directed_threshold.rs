use ltm_core::errors::ErrorKind;
use ltm_core::{Directedness, NodeId};
use ltm_diffusion::{simulate, Termination};
use ltm_graph::{initialize, GraphModel, NormalizedGraph};

fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::from_raw).collect()
}

/// Six-node influence network with reciprocal edges and mixed thresholds.
fn reference_model() -> GraphModel {
    let mut graph = GraphModel::new(Directedness::Directed);
    let edges = [
        (1, 2, 0.5),
        (2, 1, 0.5),
        (1, 3, 0.2),
        (3, 1, 0.2),
        (2, 3, 0.3),
        (2, 4, 0.5),
        (3, 4, 0.1),
        (3, 5, 0.2),
        (4, 5, 0.2),
        (5, 6, 0.6),
        (6, 5, 0.6),
        (6, 4, 0.3),
        (6, 2, 0.4),
    ];
    for (source, target, influence) in edges {
        graph
            .add_edge_with_influence(n(source), n(target), influence)
            .unwrap();
    }
    for (node, threshold) in [(2, 0.4), (3, 0.4), (4, 0.55), (5, 0.5), (6, 0.3)] {
        graph.set_threshold(n(node), threshold).unwrap();
    }
    graph
}

fn reference_graph() -> NormalizedGraph {
    initialize(&reference_model()).unwrap()
}

#[test]
fn same_round_activations_do_not_contribute() {
    let graph = reference_graph();
    let history = simulate(&graph, [n(1)], 1).unwrap();
    // 3 needs 1 (0.2) plus 2 (0.3), but 2 only became active this round.
    assert_eq!(history.layers(), &[ids(&[1]), ids(&[2])]);
    assert_eq!(history.termination(), Termination::StepLimitReached);
}

#[test]
fn single_seed_runs_to_convergence() {
    let graph = reference_graph();
    let history = simulate(&graph, [n(1)], 0).unwrap();
    assert_eq!(
        history.layers(),
        &[ids(&[1]), ids(&[2]), ids(&[3]), ids(&[4])]
    );
    assert_eq!(history.termination(), Termination::Converged);
    assert_eq!(history.activated_count(), 4);
    // 5 collects 0.2 + 0.2 against a threshold of 0.5.
    assert_eq!(history.round_of(n(5)), None);
    assert_eq!(history.round_of(n(6)), None);
}

#[test]
fn pair_of_seeds_activates_everything() {
    let graph = reference_graph();
    let history = simulate(&graph, [n(6), n(1)], 0).unwrap();
    assert_eq!(
        history.layers(),
        &[ids(&[1, 6]), ids(&[2, 5]), ids(&[3, 4])]
    );
    assert!(history.is_fully_activated());
    assert_eq!(history.termination(), Termination::Converged);
}

#[test]
fn unreached_node_blocks_full_activation() {
    let graph = reference_graph();
    let history = simulate(&graph, [n(1), n(4)], 0).unwrap();
    assert_eq!(history.layers(), &[ids(&[1, 4]), ids(&[2]), ids(&[3])]);
    assert!(!history.is_fully_activated());
}

#[test]
fn raw_model_with_every_attribute_set_simulates_directly() {
    let model = reference_model();
    // node 1 keeps no explicit threshold
    let err = simulate(&model, [n(1)], 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UninitializedParameter);
    assert_eq!(err.info().context.get("node"), Some(&"1".to_string()));

    let mut complete = model.clone();
    complete.set_threshold(n(1), 0.5).unwrap();
    let direct = simulate(&complete, [n(1)], 0).unwrap();
    let normalized = simulate(&reference_graph(), [n(1)], 0).unwrap();
    assert_eq!(direct, normalized);
}

#[test]
fn missing_influence_is_uninitialized() {
    let mut graph = GraphModel::new(Directedness::Directed);
    graph.add_edge(n(1), n(2)).unwrap();
    graph.set_threshold(n(1), 0.5).unwrap();
    graph.set_threshold(n(2), 0.5).unwrap();
    let err = simulate(&graph, [n(1)], 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UninitializedParameter);
    assert_eq!(err.info().code, "missing-influence");
}

#[test]
fn zero_threshold_needs_an_active_in_neighbour() {
    let mut graph = GraphModel::new(Directedness::Directed);
    graph.add_edge_with_influence(n(1), n(2), 0.0).unwrap();
    graph.add_node(n(3));
    graph.set_threshold(n(2), 0.0).unwrap();
    graph.set_threshold(n(3), 0.0).unwrap();
    let normalized = initialize(&graph).unwrap();
    let history = simulate(&normalized, [n(1)], 0).unwrap();
    assert_eq!(history.layers(), &[ids(&[1]), ids(&[2])]);
    assert_eq!(history.round_of(n(3)), None);
}

#[test]
fn default_split_activates_a_chain() {
    let graph =
        GraphModel::from_edges(Directedness::Directed, [(1u64, 2u64), (2, 3), (3, 4)]).unwrap();
    let normalized = initialize(&graph).unwrap();
    let history = simulate(&normalized, [n(1)], 0).unwrap();
    assert_eq!(history.rounds(), 3);
    assert!(history.is_fully_activated());

    let bounded = simulate(&normalized, [n(1)], 2).unwrap();
    assert_eq!(bounded.layers(), &[ids(&[1]), ids(&[2]), ids(&[3])]);
    assert_eq!(bounded.termination(), Termination::StepLimitReached);
}

#[test]
fn threshold_equal_to_sum_activates() {
    let mut graph = GraphModel::new(Directedness::Directed);
    graph.add_edge_with_influence(n(1), n(3), 0.7).unwrap();
    graph.add_edge_with_influence(n(2), n(3), 0.1).unwrap();
    graph.set_threshold(n(3), 0.8).unwrap();
    let normalized = initialize(&graph).unwrap();
    // 0.7 + 0.1 sums to 0.7999999999999999.
    let history = simulate(&normalized, [n(1), n(2)], 0).unwrap();
    assert_eq!(history.round_of(n(3)), Some(1));
}
