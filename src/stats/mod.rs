//! The statistics/aggregation engine.
//!
//! Responsibilities:
//!
//! - group readings by day/month and compute per-side means (`grouping`)
//! - score mold risk from averaged temperature/humidity (`mold`)
//! - detect season arrival in the daily outside series (`season`)

pub mod grouping;
pub mod mold;
pub mod season;

pub use grouping::*;
pub use mold::*;
pub use season::*;
