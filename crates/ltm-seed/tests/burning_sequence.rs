use ltm_core::{Directedness, NodeId};
use ltm_diffusion::simulate;
use ltm_graph::{initialize, GraphModel};
use ltm_seed::{select_seeds, select_seeds_with, SeedStrategy, SelectionConfig};

fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::from_raw).collect()
}

#[test]
fn two_triangles_burn_in_two_rounds() {
    let graph = GraphModel::from_edges(
        Directedness::Undirected,
        [
            (1u64, 2u64),
            (1, 3),
            (2, 3),
            (3, 4),
            (3, 5),
            (4, 5),
            (4, 6),
            (5, 6),
        ],
    )
    .unwrap();
    let normalized = initialize(&graph).unwrap();
    let selection = select_seeds(&normalized, SeedStrategy::MinimalBurning).unwrap();
    assert_eq!(selection.seeds, ids(&[3, 6]));
    assert_eq!(selection.rounds, Some(2));
    assert_eq!(selection.activated, Some(6));
}

#[test]
fn sources_keep_choice_order() {
    // path 1 - 2 - ... - 7: the first source is the lowest interior node
    let graph = GraphModel::from_edges(
        Directedness::Undirected,
        [(1u64, 2u64), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7)],
    )
    .unwrap();
    let normalized = initialize(&graph).unwrap();
    let selection = select_seeds(&normalized, SeedStrategy::MinimalBurning).unwrap();
    // round 1 lights 2; round 2 spreads to {1, 3} and lights 4;
    // round 3 spreads to {5} and lights 6; round 4 reaches 7
    assert_eq!(selection.seeds, ids(&[2, 4, 6]));
    assert_eq!(selection.rounds, Some(4));
    assert_eq!(selection.repairs, 0);

    let history = simulate(&normalized, selection.seeds.iter().copied(), 0).unwrap();
    assert!(history.is_fully_activated());
}

#[test]
fn isolated_node_is_lit() {
    let mut graph = GraphModel::from_edges(Directedness::Undirected, [(1u64, 2u64)]).unwrap();
    graph.add_node(n(3));
    let normalized = initialize(&graph).unwrap();
    let selection = select_seeds(&normalized, SeedStrategy::MinimalBurning).unwrap();
    assert_eq!(selection.seeds, ids(&[1, 3]));
    assert_eq!(selection.rounds, Some(2));
}

#[test]
fn directed_burning_is_verified_without_a_step_budget() {
    // 1 -> 2 -> 3 -> 4, plus 5 -> 4 splitting 4's threshold credit
    let graph = GraphModel::from_edges(
        Directedness::Directed,
        [(1u64, 2u64), (2, 3), (3, 4), (5, 4)],
    )
    .unwrap();
    let normalized = initialize(&graph).unwrap();
    let selection = select_seeds_with(
        &normalized,
        &SelectionConfig::for_strategy(SeedStrategy::MinimalBurning),
    )
    .unwrap();
    let history = simulate(&normalized, selection.seeds.iter().copied(), 0).unwrap();
    assert!(history.is_fully_activated());
    assert_eq!(selection.activated, Some(5));
    assert!(selection.seed_set().contains(&n(5)));
}
