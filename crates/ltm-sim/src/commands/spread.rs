use std::error::Error;

use clap::Args;
use ltm_diffusion::influence_spread;
use serde_json::json;

use crate::config::available_concurrency;
use crate::input::GraphArgs;
use crate::print_json;

#[derive(Args, Debug)]
pub struct SpreadArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    /// Round budget per single-seed simulation.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub step_limit: i64,
    /// Worker threads; defaults to the available parallelism.
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Print only the best entries.
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: &SpreadArgs) -> Result<(), Box<dyn Error>> {
    let prepared = args.graph.prepare()?;
    let concurrency = args.concurrency.unwrap_or_else(available_concurrency);
    let mut entries = influence_spread(&prepared.normalized, args.step_limit, concurrency)?;
    if let Some(top) = args.top {
        entries.truncate(top);
    }
    print_json(&json!({
        "graph": prepared.source,
        "step_limit": args.step_limit,
        "entries": entries,
    }))
}
