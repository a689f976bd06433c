//! Strategy and verification options for seed selection.

use serde::{Deserialize, Serialize};

/// Seed selection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStrategy {
    /// Degree-pruned greedy growth of a dominating set.
    #[default]
    DegreeGreedy,
    /// Greedy burning sequence.
    MinimalBurning,
}

impl SeedStrategy {
    /// Step budget used to verify coverage when none is configured.
    ///
    /// A dominating set activates the graph in one round; a burning
    /// sequence may need many.
    pub fn default_verify_step_limit(self) -> i64 {
        match self {
            SeedStrategy::DegreeGreedy => 1,
            SeedStrategy::MinimalBurning => 0,
        }
    }
}

/// How the greedy pass decides that the graph is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageCheck {
    /// Track dominated neighbourhoods directly.
    #[default]
    Bookkeeping,
    /// Re-simulate one round after every added seed.
    Simulation,
}

/// Options for [`select_seeds_with`](crate::select_seeds_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Heuristic to run.
    #[serde(default)]
    pub strategy: SeedStrategy,
    /// Stopping test of the greedy pass; ignored by burning.
    #[serde(default)]
    pub coverage_check: CoverageCheck,
    /// Simulate the selected seeds and repair any remaining gap.
    #[serde(default = "default_verify")]
    pub verify: bool,
    /// Step budget for verification; `None` uses the strategy default.
    #[serde(default)]
    pub verify_step_limit: Option<i64>,
}

fn default_verify() -> bool {
    true
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategy: SeedStrategy::default(),
            coverage_check: CoverageCheck::default(),
            verify: default_verify(),
            verify_step_limit: None,
        }
    }
}

impl SelectionConfig {
    /// Default configuration for `strategy`.
    pub fn for_strategy(strategy: SeedStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Verification budget after applying the strategy default.
    pub fn effective_verify_step_limit(&self) -> i64 {
        self.verify_step_limit
            .unwrap_or_else(|| self.strategy.default_verify_step_limit())
    }
}
