//! Selection entry points and the coverage repair loop.

use std::collections::BTreeSet;

use ltm_core::errors::{ErrorInfo, LtmError};
use ltm_core::{InfluenceGraph, NodeId};
use ltm_diffusion::simulate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::burning::burning_sequence;
use crate::config::{SeedStrategy, SelectionConfig};
use crate::greedy::degree_greedy;
use crate::ordering::CandidateOrdering;

/// Outcome of a seed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSelection {
    /// Heuristic that produced the seeds.
    pub strategy: SeedStrategy,
    /// Ascending for greedy selection; choice order for burning, repairs last.
    pub seeds: Vec<NodeId>,
    /// Active nodes after the verification simulation, when one ran.
    pub activated: Option<usize>,
    /// Burning number for [`SeedStrategy::MinimalBurning`].
    pub rounds: Option<usize>,
    /// Seeds added because verification left nodes inactive.
    pub repairs: usize,
}

impl SeedSelection {
    /// Seeds as a set.
    pub fn seed_set(&self) -> BTreeSet<NodeId> {
        self.seeds.iter().copied().collect()
    }
}

/// Selects seeds with the default configuration of `strategy`.
pub fn select_seeds<G>(graph: &G, strategy: SeedStrategy) -> Result<SeedSelection, LtmError>
where
    G: InfluenceGraph + ?Sized,
{
    select_seeds_with(graph, &SelectionConfig::for_strategy(strategy))
}

/// Selects a seed set that activates every node of `graph`.
///
/// Fails with [`LtmError::NoSeedPossible`] on an empty graph and with
/// [`LtmError::UninitializedParameter`] when parameters are missing. With
/// `verify` enabled the seeds are simulated and, while nodes stay inactive,
/// the best-ranked inactive node is added.
pub fn select_seeds_with<G>(graph: &G, config: &SelectionConfig) -> Result<SeedSelection, LtmError>
where
    G: InfluenceGraph + ?Sized,
{
    if graph.node_count() == 0 {
        return Err(LtmError::NoSeedPossible(ErrorInfo::new(
            "empty-graph",
            "cannot select seeds for a graph without nodes",
        )));
    }
    graph.check_initialized()?;

    let ordering = CandidateOrdering::new(graph);
    let mut selection = match config.strategy {
        SeedStrategy::DegreeGreedy => SeedSelection {
            strategy: config.strategy,
            seeds: degree_greedy(graph, &ordering, config.coverage_check)?
                .into_iter()
                .collect(),
            activated: None,
            rounds: None,
            repairs: 0,
        },
        SeedStrategy::MinimalBurning => {
            let sequence = burning_sequence(graph, &ordering);
            SeedSelection {
                strategy: config.strategy,
                seeds: sequence.sources,
                activated: None,
                rounds: Some(sequence.rounds),
                repairs: 0,
            }
        }
    };

    if config.verify {
        ensure_coverage(
            graph,
            &ordering,
            &mut selection,
            config.effective_verify_step_limit(),
        )?;
    }
    if selection.strategy == SeedStrategy::DegreeGreedy {
        selection.seeds.sort_unstable();
    }

    info!(
        strategy = ?selection.strategy,
        seeds = selection.seeds.len(),
        repairs = selection.repairs,
        nodes = graph.node_count(),
        "seed selection finished"
    );
    Ok(selection)
}

fn ensure_coverage<G: InfluenceGraph + ?Sized>(
    graph: &G,
    ordering: &CandidateOrdering,
    selection: &mut SeedSelection,
    step_limit: i64,
) -> Result<(), LtmError> {
    loop {
        let history = simulate(graph, selection.seeds.iter().copied(), step_limit)?;
        let active = history.activated_set();
        let next = match ordering.first_outside(&active) {
            Some(node) if !history.is_fully_activated() => node,
            _ => {
                selection.activated = Some(history.activated_count());
                return Ok(());
            }
        };
        debug!(
            node = %next,
            activated = history.activated_count(),
            nodes = graph.node_count(),
            "coverage repair"
        );
        selection.seeds.push(next);
        selection.repairs += 1;
    }
}
