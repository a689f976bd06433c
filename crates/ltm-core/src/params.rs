//! Model defaults and bound checks for thresholds and influences.

use crate::errors::{ErrorInfo, LtmError};
use crate::NodeId;

/// Threshold assigned to nodes that carry none.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Slack applied when comparing an accumulated influence sum with a threshold.
pub const ACTIVATION_EPSILON: f64 = 1e-12;

/// Checks that a node threshold is finite and lies in `[0, 1]`.
pub fn validate_threshold(node: NodeId, threshold: f64) -> Result<f64, LtmError> {
    if in_unit_interval(threshold) {
        return Ok(threshold);
    }
    Err(LtmError::InvalidParameter(
        ErrorInfo::new(
            "threshold-out-of-range",
            format!("the threshold of node {node} must lie in [0, 1]"),
        )
        .with_context("value", threshold.to_string()),
    )
    .with_node(node))
}

/// Checks that an edge influence is finite and lies in `[0, 1]`.
pub fn validate_influence(source: NodeId, target: NodeId, influence: f64) -> Result<f64, LtmError> {
    if in_unit_interval(influence) {
        return Ok(influence);
    }
    Err(LtmError::InvalidParameter(
        ErrorInfo::new(
            "influence-out-of-range",
            format!("the influence of edge ({source}, {target}) must lie in [0, 1]"),
        )
        .with_context("value", influence.to_string()),
    )
    .with_edge(source, target))
}

/// Returns `true` once `accumulated` influence reaches `threshold`.
pub fn reaches_threshold(accumulated: f64, threshold: f64) -> bool {
    accumulated + ACTIVATION_EPSILON >= threshold
}

fn in_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
