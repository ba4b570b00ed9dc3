//! Timeout-Tree Scalability Analyser - Type System
//!
//! - `params`: Input parameters (fixed section, scenario rows, timeout schedule)
//! - `shape`: Tree shapes swept by the scalability analysis
//! - `results`: Per-shape, per-scenario and report result records
//! - `statistics`: Run statistics collected by the analysis engine

mod params;
mod results;
mod shape;
pub mod statistics;

pub use params::*;
pub use results::*;
pub use shape::*;

pub use statistics::ProcessingStats;
