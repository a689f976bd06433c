//! Round-based diffusion driver.

use std::collections::BTreeSet;

use ltm_core::errors::{ErrorInfo, LtmError};
use ltm_core::params::reaches_threshold;
use ltm_core::{Directedness, InfluenceGraph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::history::{ActivationHistory, Termination};

/// Lifecycle of a [`Diffusion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffusionPhase {
    /// Seeds are active and no round has run yet.
    Seeded,
    /// At least one round activated new nodes.
    Diffusing {
        /// Index of the last completed round.
        round: usize,
    },
    /// No further activation is possible.
    Converged,
    /// The step budget was exhausted.
    StepLimitReached,
}

impl DiffusionPhase {
    /// Returns whether the simulation has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, DiffusionPhase::Converged | DiffusionPhase::StepLimitReached)
    }
}

/// Round-based linear threshold simulation over a borrowed graph.
///
/// Every round evaluates candidates against the active set as it stood when
/// the round began, so nodes activated in round `k` first contribute in
/// round `k + 1`.
#[derive(Debug)]
pub struct Diffusion<'g, G: InfluenceGraph + ?Sized> {
    graph: &'g G,
    active: BTreeSet<NodeId>,
    layers: Vec<Vec<NodeId>>,
    budget: Option<usize>,
    phase: DiffusionPhase,
}

impl<'g, G: InfluenceGraph + ?Sized> Diffusion<'g, G> {
    /// Activates `seeds` and prepares the first round.
    ///
    /// A `step_limit` of zero or less means unbounded. Fails with
    /// [`LtmError::UninitializedParameter`] when the graph lacks a threshold
    /// or influence, and with [`LtmError::UnknownSeed`] when the seed set is
    /// empty or names a node outside the graph.
    pub fn new(
        graph: &'g G,
        seeds: impl IntoIterator<Item = NodeId>,
        step_limit: i64,
    ) -> Result<Self, LtmError> {
        graph.check_initialized()?;
        let active: BTreeSet<NodeId> = seeds.into_iter().collect();
        if active.is_empty() {
            return Err(LtmError::UnknownSeed(ErrorInfo::new(
                "empty-seed-set",
                "at least one seed is required",
            )));
        }
        if let Some(missing) = active.iter().find(|seed| !graph.contains_node(**seed)) {
            return Err(LtmError::UnknownSeed(ErrorInfo::new(
                "unknown-seed",
                format!("seed {missing} is not a node of the graph"),
            ))
            .with_node(*missing));
        }
        let budget = usize::try_from(step_limit).ok().filter(|limit| *limit > 0);
        Ok(Self {
            graph,
            layers: vec![active.iter().copied().collect()],
            active,
            budget,
            phase: DiffusionPhase::Seeded,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DiffusionPhase {
        self.phase
    }

    /// Number of rounds that activated at least one node so far.
    pub fn round(&self) -> usize {
        self.layers.len() - 1
    }

    /// Number of currently active nodes.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns whether `node` is active.
    pub fn is_active(&self, node: NodeId) -> bool {
        self.active.contains(&node)
    }

    /// Runs one round and returns the newly activated nodes.
    ///
    /// Returns `None` once the simulation reaches a terminal phase; the phase
    /// then tells whether it converged or ran out of budget.
    pub fn step(&mut self) -> Option<&[NodeId]> {
        if self.phase.is_terminal() {
            return None;
        }
        if self.active.len() == self.graph.node_count() {
            self.phase = DiffusionPhase::Converged;
            return None;
        }
        if self.budget.is_some_and(|budget| self.round() >= budget) {
            self.phase = DiffusionPhase::StepLimitReached;
            return None;
        }

        let layer = self.next_layer();
        if layer.is_empty() {
            self.phase = DiffusionPhase::Converged;
            return None;
        }
        self.active.extend(layer.iter().copied());
        self.layers.push(layer);
        let round = self.round();
        debug!(
            round,
            activated = self.layers[round].len(),
            active = self.active.len(),
            "diffusion round"
        );
        self.phase = DiffusionPhase::Diffusing { round };
        self.layers.last().map(Vec::as_slice)
    }

    /// Runs rounds until a terminal phase and returns the history.
    pub fn run(mut self) -> ActivationHistory {
        while self.step().is_some() {}
        let termination = match self.phase {
            DiffusionPhase::StepLimitReached => Termination::StepLimitReached,
            _ => Termination::Converged,
        };
        ActivationHistory::new(self.layers, termination, self.graph.node_count())
    }

    /// Only out-neighbours of the last layer can change state: every other
    /// inactive node saw the same active in-neighbourhood last round.
    fn next_layer(&self) -> Vec<NodeId> {
        let mut candidates = BTreeSet::new();
        if let Some(frontier) = self.layers.last() {
            for node in frontier {
                candidates.extend(
                    self.graph
                        .out_neighbors(*node)
                        .filter(|next| !self.active.contains(next)),
                );
            }
        }
        match self.graph.directedness() {
            Directedness::Undirected => candidates.into_iter().collect(),
            Directedness::Directed => candidates
                .into_iter()
                .filter(|candidate| self.crosses_threshold(*candidate))
                .collect(),
        }
    }

    fn crosses_threshold(&self, node: NodeId) -> bool {
        let Some(threshold) = self.graph.threshold(node) else {
            return false;
        };
        let accumulated: f64 = self
            .graph
            .in_edges(node)
            .filter(|(source, _)| self.active.contains(source))
            .map(|(_, influence)| influence.unwrap_or(0.0))
            .sum();
        trace!(%node, accumulated, threshold, "threshold check");
        reaches_threshold(accumulated, threshold)
    }
}

/// Runs a full simulation from `seeds`.
///
/// See [`Diffusion::new`] for the meaning of `step_limit` and the failure modes.
pub fn simulate<G>(
    graph: &G,
    seeds: impl IntoIterator<Item = NodeId>,
    step_limit: i64,
) -> Result<ActivationHistory, LtmError>
where
    G: InfluenceGraph + ?Sized,
{
    Ok(Diffusion::new(graph, seeds, step_limit)?.run())
}
