//! Structured error types shared across LTM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NodeId;

/// Structured payload attached to every [`LtmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs naming the offending node or edge.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the diffusion engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LtmError {
    /// The graph contains parallel edges.
    #[error("multi-edge unsupported: {0}")]
    MultiEdgeUnsupported(ErrorInfo),
    /// A threshold or influence lies outside `[0, 1]`.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// A simulation was requested on a graph with unset parameters.
    #[error("uninitialized parameter: {0}")]
    UninitializedParameter(ErrorInfo),
    /// A seed is not a node of the graph, or the seed set is empty.
    #[error("unknown seed: {0}")]
    UnknownSeed(ErrorInfo),
    /// Seed selection was asked to cover an empty graph.
    #[error("no seed possible: {0}")]
    NoSeedPossible(ErrorInfo),
    /// Structural ingestion errors other than multi-edges.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization, schema and IO errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Fieldless discriminant of [`LtmError`], convenient for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`LtmError::MultiEdgeUnsupported`].
    MultiEdgeUnsupported,
    /// See [`LtmError::InvalidParameter`].
    InvalidParameter,
    /// See [`LtmError::UninitializedParameter`].
    UninitializedParameter,
    /// See [`LtmError::UnknownSeed`].
    UnknownSeed,
    /// See [`LtmError::NoSeedPossible`].
    NoSeedPossible,
    /// See [`LtmError::Graph`].
    Graph,
    /// See [`LtmError::Serde`].
    Serde,
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LtmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LtmError::MultiEdgeUnsupported(info)
            | LtmError::InvalidParameter(info)
            | LtmError::UninitializedParameter(info)
            | LtmError::UnknownSeed(info)
            | LtmError::NoSeedPossible(info)
            | LtmError::Graph(info)
            | LtmError::Serde(info) => info,
        }
    }

    /// Returns the variant discriminant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LtmError::MultiEdgeUnsupported(_) => ErrorKind::MultiEdgeUnsupported,
            LtmError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            LtmError::UninitializedParameter(_) => ErrorKind::UninitializedParameter,
            LtmError::UnknownSeed(_) => ErrorKind::UnknownSeed,
            LtmError::NoSeedPossible(_) => ErrorKind::NoSeedPossible,
            LtmError::Graph(_) => ErrorKind::Graph,
            LtmError::Serde(_) => ErrorKind::Serde,
        }
    }

    /// Adds a context entry to the payload, keeping the variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value.to_string()))
    }

    /// Attaches a remediation hint, keeping the variant.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    /// Adds the `node` context entry.
    pub fn with_node(self, node: NodeId) -> Self {
        self.with_context("node", node)
    }

    /// Adds the `source` and `target` context entries.
    pub fn with_edge(self, source: NodeId, target: NodeId) -> Self {
        self.with_context("source", source)
            .with_context("target", target)
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            LtmError::MultiEdgeUnsupported(info) => LtmError::MultiEdgeUnsupported(f(info)),
            LtmError::InvalidParameter(info) => LtmError::InvalidParameter(f(info)),
            LtmError::UninitializedParameter(info) => LtmError::UninitializedParameter(f(info)),
            LtmError::UnknownSeed(info) => LtmError::UnknownSeed(f(info)),
            LtmError::NoSeedPossible(info) => LtmError::NoSeedPossible(f(info)),
            LtmError::Graph(info) => LtmError::Graph(f(info)),
            LtmError::Serde(info) => LtmError::Serde(f(info)),
        }
    }
}

/// Shorthand for [`LtmError::Graph`].
pub fn graph_error(code: impl Into<String>, message: impl Into<String>) -> LtmError {
    LtmError::Graph(ErrorInfo::new(code, message))
}

/// Shorthand for [`LtmError::Serde`] wrapping any displayable cause.
pub fn serde_error(code: impl Into<String>, err: impl ToString) -> LtmError {
    LtmError::Serde(ErrorInfo::new(code, err.to_string()))
}
