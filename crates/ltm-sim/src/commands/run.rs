use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use ltm_core::{Directedness, RunProvenance, SchemaVersion};
use ltm_diffusion::{influence_spread, simulate, ActivationHistory, SpreadEntry};
use ltm_graph::canonical_hash;
use ltm_seed::{select_seeds_with, SeedSelection};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::config::RunConfig;
use crate::input::{node_ids, prepare_graph};
use crate::{print_json, write_json};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Directory receiving `report.json`.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
struct GraphSummary {
    directedness: Directedness,
    nodes: usize,
    edges: usize,
}

#[derive(Debug, Serialize)]
struct RunReport {
    provenance: RunProvenance,
    graph: GraphSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<ActivationHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<SeedSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spread: Option<Vec<SpreadEntry>>,
}

pub fn run(args: &RunArgs, config: &RunConfig) -> Result<(), Box<dyn Error>> {
    let prepared = prepare_graph(
        &config.graph.path,
        config.graph.format,
        config.graph.directed,
        config.attributes.as_deref(),
    )?;
    let graph = &prepared.normalized;

    let simulation = match &config.simulation {
        Some(section) => Some(simulate(graph, node_ids(&section.seeds), section.step_limit)?),
        None => None,
    };
    let selection = match &config.selection {
        Some(section) => Some(select_seeds_with(graph, section)?),
        None => None,
    };
    let spread = match &config.spread {
        Some(section) => {
            let mut entries = influence_spread(graph, section.step_limit, section.concurrency)?;
            if let Some(top) = section.top {
                entries.truncate(top);
            }
            Some(entries)
        }
        None => None,
    };

    let report = RunReport {
        provenance: provenance(&prepared.source, canonical_hash(&prepared.model)),
        graph: GraphSummary {
            directedness: prepared.model.directedness(),
            nodes: prepared.model.node_count(),
            edges: prepared.model.edge_count(),
        },
        simulation,
        selection,
        spread,
    };
    let report_path = args.out.join("report.json");
    write_json(&report_path, &report)?;
    info!(path = %report_path.display(), "run report written");

    print_json(&json!({
        "report": report_path.display().to_string(),
        "graph_hash": report.provenance.graph_hash,
        "activated": report.simulation.as_ref().map(ActivationHistory::activated_count),
        "seeds": report.selection.as_ref().map(|selection| selection.seeds.len()),
    }))
}

fn provenance(source: &str, graph_hash: String) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "ltm-sim".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    RunProvenance {
        schema_version: SchemaVersion::default(),
        graph_hash,
        graph_source: source.to_string(),
        created_at: Utc::now().to_rfc3339(),
        tool_versions,
    }
}
