#![deny(missing_docs)]

//! Heuristic seed selection.
//!
//! Both strategies look for a small seed set that activates every node:
//! [`SeedStrategy::DegreeGreedy`] grows a dominating set by descending
//! degree, [`SeedStrategy::MinimalBurning`] builds a burning sequence. Neither
//! is minimal; coverage is the only guarantee.

pub mod config;
pub mod ordering;
pub mod select;

mod burning;
mod greedy;

pub use config::{CoverageCheck, SeedStrategy, SelectionConfig};
pub use ordering::CandidateOrdering;
pub use select::{select_seeds, select_seeds_with, SeedSelection};
