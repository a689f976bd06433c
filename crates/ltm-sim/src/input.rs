use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use ltm_core::errors::{graph_error, LtmError};
use ltm_core::{Directedness, NodeId};
use ltm_graph::{graph_from_json, initialize, AttributeOverlay, GraphModel, NormalizedGraph};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// On-disk graph encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFormat {
    /// Whitespace separated `source target` pairs, one per line.
    #[default]
    EdgeList,
    /// Serialized graph produced by `graph_to_json`.
    Json,
}

/// Graph input flags shared by the one-off sub-commands.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph file to load.
    #[arg(long)]
    pub graph: PathBuf,
    /// Encoding of the graph file.
    #[arg(long, value_enum, default_value_t = GraphFormat::EdgeList)]
    pub format: GraphFormat,
    /// Treat edge-list pairs as directed edges.
    #[arg(long)]
    pub directed: bool,
    /// Optional YAML attribute overlay with thresholds and influences.
    #[arg(long)]
    pub attributes: Option<PathBuf>,
}

/// Raw graph plus its normalized form.
pub struct PreparedGraph {
    pub source: String,
    pub model: GraphModel,
    pub normalized: NormalizedGraph,
}

/// Loads the graph, applies the overlay and normalizes parameters.
pub fn prepare_graph(
    path: &Path,
    format: GraphFormat,
    directed: bool,
    attributes: Option<&Path>,
) -> Result<PreparedGraph, Box<dyn Error>> {
    let directedness = if directed {
        Directedness::Directed
    } else {
        Directedness::Undirected
    };
    let mut model = load_graph(path, format, directedness)?;
    if let Some(overlay_path) = attributes {
        let overlay = load_overlay(overlay_path)?;
        model.apply_overlay(&overlay)?;
    }
    let normalized = initialize(&model)?;
    info!(
        source = %path.display(),
        nodes = model.node_count(),
        edges = model.edge_count(),
        directed = model.directedness().is_directed(),
        "graph loaded"
    );
    Ok(PreparedGraph {
        source: path.display().to_string(),
        model,
        normalized,
    })
}

impl GraphArgs {
    /// Loads and normalizes the graph described by the flags.
    pub fn prepare(&self) -> Result<PreparedGraph, Box<dyn Error>> {
        prepare_graph(
            &self.graph,
            self.format,
            self.directed,
            self.attributes.as_deref(),
        )
    }
}

/// Reads a graph file in the given format.
pub fn load_graph(
    path: &Path,
    format: GraphFormat,
    directedness: Directedness,
) -> Result<GraphModel, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let graph = match format {
        GraphFormat::EdgeList => parse_edge_list(&text, directedness)?,
        GraphFormat::Json => {
            let graph = graph_from_json(&text)?;
            if graph.directedness() != directedness {
                warn!(
                    stored = ?graph.directedness(),
                    "ignoring directedness flag for JSON graph"
                );
            }
            graph
        }
    };
    Ok(graph)
}

/// Parses an edge list.
///
/// Blank lines and lines starting with `#` or `%` are skipped; columns after
/// the first two are ignored.
pub fn parse_edge_list(text: &str, directedness: Directedness) -> Result<GraphModel, LtmError> {
    let mut graph = GraphModel::new(directedness);
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            return Err(graph_error("edge-list-parse", "expected `source target`")
                .with_context("line", line_no));
        };
        let source = parse_node(source, line_no)?;
        let target = parse_node(target, line_no)?;
        graph
            .add_edge(source, target)
            .map_err(|err| err.with_context("line", line_no))?;
    }
    Ok(graph)
}

fn parse_node(field: &str, line_no: usize) -> Result<NodeId, LtmError> {
    field.parse::<u64>().map(NodeId::from_raw).map_err(|_| {
        graph_error(
            "edge-list-parse",
            format!("`{field}` is not a non-negative integer node id"),
        )
        .with_context("line", line_no)
    })
}

/// Reads a YAML attribute overlay.
pub fn load_overlay(path: &Path) -> Result<AttributeOverlay, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let overlay: AttributeOverlay = serde_yaml::from_str(&text)?;
    Ok(overlay)
}

/// Converts raw identifiers into node ids.
pub fn node_ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::from_raw).collect()
}
