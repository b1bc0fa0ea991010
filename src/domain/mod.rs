//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - classified log records (`Reading`, `Side`)
//! - per-period aggregates (`DaySummary`, `MonthSummary`, `MoldRiskEntry`)
//! - season detection inputs/outputs (`DailyMean`, `SeasonWindow`, `SeasonArrival`)
//! - run configuration (`StatsConfig`) and the portable run summary (`SummaryFile`)

pub mod types;

pub use types::*;
