#![deny(missing_docs)]

//! Linear threshold diffusion.
//!
//! [`Diffusion`] drives a simulation one round at a time over any
//! [`InfluenceGraph`](ltm_core::InfluenceGraph); [`simulate`] runs it to the
//! end. Directed graphs activate a node once the influence of its active
//! in-neighbours reaches its threshold. Undirected graphs activate every
//! neighbour of the previous round's layer.

pub mod batch;
pub mod engine;
pub mod history;

pub use batch::{influence_spread, simulate_batch, SpreadEntry};
pub use engine::{simulate, Diffusion, DiffusionPhase};
pub use history::{ActivationHistory, Termination};
