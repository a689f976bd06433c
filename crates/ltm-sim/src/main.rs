use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    run::{self, RunArgs},
    select::{self, SelectArgs},
    simulate::{self, SimulateArgs},
    spread::{self, SpreadArgs},
};
use config::RunConfig;

mod commands;
mod config;
mod input;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "ltm-sim", about = "Linear threshold diffusion CLI")]
struct Cli {
    /// Log filter for stderr output; `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate diffusion from a seed set and print the activation layers.
    Simulate(SimulateArgs),
    /// Select a seed set that activates the whole graph.
    Select(SelectArgs),
    /// Rank every node by the reach of its single-seed simulation.
    Spread(SpreadArgs),
    /// Execute every section of a YAML run configuration.
    Run(RunArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => {
            logging::init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            simulate::run(&args)
        }
        Command::Select(args) => {
            logging::init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            select::run(&args)
        }
        Command::Spread(args) => {
            logging::init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            spread::run(&args)
        }
        Command::Run(args) => {
            let config = RunConfig::load(&args.config)?;
            logging::init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level))?;
            run::run(&args, &config)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
