#![deny(missing_docs)]

//! Graph container, attribute overlays and the parameter initializer that
//! turns a raw [`GraphModel`] into a [`NormalizedGraph`] ready for diffusion.

mod generators;
mod hash;
mod model;
mod normalize;
mod overlay;
mod serialization;

pub use generators::{gen_connected, gen_gnp, randomize_thresholds};
pub use hash::canonical_hash;
pub use model::{Edge, GraphModel};
pub use normalize::{initialize, NormalizedGraph};
pub use overlay::{AttributeOverlay, InfluenceEntry, ThresholdEntry};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
