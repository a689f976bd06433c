use ltm_core::NodeId;
use serde::{Deserialize, Serialize};

/// Per-node and per-edge attribute values layered over an ingested edge list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverlay {
    /// Explicit node thresholds.
    #[serde(default)]
    pub thresholds: Vec<ThresholdEntry>,
    /// Explicit directed edge influences.
    #[serde(default)]
    pub influences: Vec<InfluenceEntry>,
}

/// Threshold assigned to one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    /// Node receiving the threshold.
    pub node: NodeId,
    /// Threshold value.
    pub threshold: f64,
}

/// Influence assigned to one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEntry {
    /// Edge source.
    pub source: NodeId,
    /// Edge target.
    pub target: NodeId,
    /// Influence value.
    pub influence: f64,
}

impl AttributeOverlay {
    /// Adds a threshold entry.
    pub fn with_threshold(mut self, node: impl Into<NodeId>, threshold: f64) -> Self {
        self.thresholds.push(ThresholdEntry {
            node: node.into(),
            threshold,
        });
        self
    }

    /// Adds an influence entry.
    pub fn with_influence(
        mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        influence: f64,
    ) -> Self {
        self.influences.push(InfluenceEntry {
            source: source.into(),
            target: target.into(),
            influence,
        });
        self
    }

    /// Returns whether the overlay carries no entries.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty() && self.influences.is_empty()
    }
}
