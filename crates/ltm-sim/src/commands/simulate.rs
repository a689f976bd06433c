use std::error::Error;

use clap::Args;
use ltm_diffusion::simulate;
use serde_json::json;

use crate::input::{node_ids, GraphArgs};
use crate::print_json;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    /// Comma separated seed node ids.
    #[arg(long, value_delimiter = ',', required = true)]
    pub seeds: Vec<u64>,
    /// Round budget; zero or negative runs to convergence.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub step_limit: i64,
}

pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let prepared = args.graph.prepare()?;
    let history = simulate(
        &prepared.normalized,
        node_ids(&args.seeds),
        args.step_limit,
    )?;
    print_json(&json!({
        "graph": prepared.source,
        "step_limit": args.step_limit,
        "activated": history.activated_count(),
        "fully_activated": history.is_fully_activated(),
        "history": history,
    }))
}
