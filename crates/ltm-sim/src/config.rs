use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use ltm_seed::SelectionConfig;
use serde::{Deserialize, Serialize};

use crate::input::GraphFormat;

/// YAML description of a complete `ltm-sim run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Graph input.
    pub graph: GraphSource,
    /// Optional YAML attribute overlay.
    #[serde(default)]
    pub attributes: Option<PathBuf>,
    /// Diffusion from a fixed seed set.
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
    /// Seed selection.
    #[serde(default)]
    pub selection: Option<SelectionConfig>,
    /// Single-seed reach of every node.
    #[serde(default)]
    pub spread: Option<SpreadConfig>,
    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location and encoding of the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSource {
    /// Graph file; relative paths resolve against the config file.
    pub path: PathBuf,
    /// File encoding.
    #[serde(default)]
    pub format: GraphFormat,
    /// Whether edge-list pairs are directed.
    #[serde(default)]
    pub directed: bool,
}

/// Seeds and step budget for a single simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed node ids.
    pub seeds: Vec<u64>,
    /// Round budget; zero or negative runs to convergence.
    #[serde(default)]
    pub step_limit: i64,
}

/// Influence spread settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadConfig {
    /// Round budget per single-seed simulation.
    #[serde(default)]
    pub step_limit: i64,
    /// Worker threads.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Keep only the best entries when set.
    #[serde(default)]
    pub top: Option<usize>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `ltm_diffusion=debug`.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|threads| threads.get())
        .unwrap_or(1)
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl RunConfig {
    /// Reads the config and resolves relative input paths against its directory.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        let mut config: RunConfig = serde_yaml::from_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.graph.path = resolve(base, &config.graph.path);
        config.attributes = config
            .attributes
            .as_deref()
            .map(|attributes| resolve(base, attributes));
        Ok(config)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub(crate) fn available_concurrency() -> usize {
    default_concurrency()
}
