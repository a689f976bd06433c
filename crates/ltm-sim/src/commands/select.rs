use std::error::Error;

use clap::{Args, ValueEnum};
use ltm_seed::{select_seeds_with, CoverageCheck, SeedStrategy, SelectionConfig};
use serde_json::json;

use crate::input::GraphArgs;
use crate::print_json;

/// Command-line names of [`SeedStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Degree-pruned greedy dominating set.
    DegreeGreedy,
    /// Greedy burning sequence.
    MinimalBurning,
}

impl From<StrategyArg> for SeedStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::DegreeGreedy => SeedStrategy::DegreeGreedy,
            StrategyArg::MinimalBurning => SeedStrategy::MinimalBurning,
        }
    }
}

/// Command-line names of [`CoverageCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoverageCheckArg {
    /// Track dominated neighbourhoods.
    Bookkeeping,
    /// Re-simulate one round after every added seed.
    Simulation,
}

impl From<CoverageCheckArg> for CoverageCheck {
    fn from(arg: CoverageCheckArg) -> Self {
        match arg {
            CoverageCheckArg::Bookkeeping => CoverageCheck::Bookkeeping,
            CoverageCheckArg::Simulation => CoverageCheck::Simulation,
        }
    }
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    /// Selection heuristic.
    #[arg(long, value_enum, default_value_t = StrategyArg::DegreeGreedy)]
    pub strategy: StrategyArg,
    /// Stopping test of the greedy pass.
    #[arg(long, value_enum, default_value_t = CoverageCheckArg::Bookkeeping)]
    pub coverage_check: CoverageCheckArg,
    /// Skip the verification simulation and repair loop.
    #[arg(long)]
    pub no_verify: bool,
    /// Step budget of the verification simulation.
    #[arg(long, allow_negative_numbers = true)]
    pub verify_step_limit: Option<i64>,
}

impl SelectArgs {
    fn config(&self) -> SelectionConfig {
        SelectionConfig {
            strategy: self.strategy.into(),
            coverage_check: self.coverage_check.into(),
            verify: !self.no_verify,
            verify_step_limit: self.verify_step_limit,
        }
    }
}

pub fn run(args: &SelectArgs) -> Result<(), Box<dyn Error>> {
    let prepared = args.graph.prepare()?;
    let selection = select_seeds_with(&prepared.normalized, &args.config())?;
    print_json(&json!({
        "graph": prepared.source,
        "selection": selection,
    }))
}
