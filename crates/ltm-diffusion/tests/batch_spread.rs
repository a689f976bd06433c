use ltm_core::errors::ErrorKind;
use ltm_core::{Directedness, NodeId};
use ltm_diffusion::{influence_spread, simulate, simulate_batch};
use ltm_graph::{initialize, GraphModel};

fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

#[test]
fn batch_preserves_order_and_matches_sequential_runs() {
    let graph = GraphModel::from_edges(
        Directedness::Undirected,
        [(1u64, 2u64), (2, 3), (3, 4), (4, 5)],
    )
    .unwrap();
    let normalized = initialize(&graph).unwrap();
    let seed_sets = vec![vec![n(1)], vec![n(3)], vec![n(5), n(1)]];

    let batch = simulate_batch(&normalized, &seed_sets, 0, 3).unwrap();
    assert_eq!(batch.len(), 3);
    for (seeds, history) in seed_sets.iter().zip(&batch) {
        let sequential = simulate(&normalized, seeds.iter().copied(), 0).unwrap();
        assert_eq!(&sequential, history);
    }
    assert_eq!(batch[0].rounds(), 4);
    assert_eq!(batch[1].rounds(), 2);
}

#[test]
fn batch_fails_on_any_bad_seed_set() {
    let graph = GraphModel::from_edges(Directedness::Undirected, [(1u64, 2u64)]).unwrap();
    let normalized = initialize(&graph).unwrap();
    let err = simulate_batch(&normalized, &[vec![n(1)], vec![n(7)]], 0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSeed);
}

#[test]
fn spread_ranks_by_reach_then_id() {
    // 1 -> 2 -> 3, 4 isolated
    let mut graph =
        GraphModel::from_edges(Directedness::Directed, [(1u64, 2u64), (2, 3)]).unwrap();
    graph.add_node(n(4));
    let normalized = initialize(&graph).unwrap();

    let spread = influence_spread(&normalized, 0, 2).unwrap();
    let ranking: Vec<(u64, usize)> = spread
        .iter()
        .map(|entry| (entry.node.as_raw(), entry.activated))
        .collect();
    assert_eq!(ranking, vec![(1, 3), (2, 2), (3, 1), (4, 1)]);
    assert_eq!(spread[0].rounds, 2);
    assert_eq!(spread[3].rounds, 0);
}

#[test]
fn spread_respects_step_limit() {
    let graph =
        GraphModel::from_edges(Directedness::Directed, [(1u64, 2u64), (2, 3)]).unwrap();
    let normalized = initialize(&graph).unwrap();
    let spread = influence_spread(&normalized, 1, 1).unwrap();
    assert_eq!(spread[0].node, n(1));
    assert_eq!(spread[0].activated, 2);
    assert_eq!(spread[1].node, n(2));
    assert_eq!(spread[1].activated, 2);
}
