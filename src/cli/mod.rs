//! Command-line parsing for the weather log statistics tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation/statistics code.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::MonthKey;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "wstats",
    version,
    about = "Weather log statistics (day/month averages, mold risk, season arrival)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full report: run summary, temperature and mold-risk rankings, season
    /// dates, plot; overwrites the plain-text summary file.
    ///
    /// This is the default when the binary is invoked without a subcommand.
    Report(StatsArgs),
    /// Temperature rankings per day/month plus season dates; appends the
    /// season lines to the summary file.
    Temps(StatsArgs),
    /// Mold-risk rankings per day/month; overwrites the summary file.
    Mold(StatsArgs),
    /// Season-arrival report only (no file writes).
    Seasons(StatsArgs),
    /// Averages for a single date.
    Day(DayArgs),
    /// Plot a previously exported summary JSON.
    Plot(PlotArgs),
    /// Write a synthetic weather log (useful for demos and testing).
    Sample(SampleArgs),
}

/// Common options for the statistics commands.
#[derive(Debug, Parser, Clone)]
pub struct StatsArgs {
    /// Weather log file to ingest.
    #[arg(short = 'i', long, default_value = "tempdata.txt")]
    pub input: PathBuf,

    /// Season base year (default: the year of the earliest reading).
    #[arg(long)]
    pub year: Option<i32>,

    /// Calendar month to drop during ingest (repeatable).
    #[arg(long = "exclude-month", value_name = "YYYY-MM", value_parser = MonthKey::from_str)]
    pub exclude_months: Vec<MonthKey>,

    /// Rows shown per ranking table (0 = all).
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Plain-text summary file maintained by report/temps/mold runs.
    #[arg(long, default_value = "monthly_averages.txt")]
    pub summary_file: PathBuf,

    /// Export per-month averages + risks to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run summary to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,

    /// Render an ASCII plot of the daily outside means (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for the single-date lookup.
#[derive(Debug, Parser)]
pub struct DayArgs {
    /// Weather log file to ingest.
    #[arg(short = 'i', long, default_value = "tempdata.txt")]
    pub input: PathBuf,

    /// Date to look up (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    /// Calendar month to drop during ingest (repeatable).
    #[arg(long = "exclude-month", value_name = "YYYY-MM", value_parser = MonthKey::from_str)]
    pub exclude_months: Vec<MonthKey>,
}

/// Options for plotting a saved summary.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Summary JSON file produced by `wstats report --export-summary`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for synthetic log generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output path for the generated log.
    #[arg(short = 'o', long, default_value = "tempdata.txt")]
    pub out: PathBuf,

    /// First day of the generated range.
    #[arg(long, default_value = "2016-06-01")]
    pub start: NaiveDate,

    /// Number of days to generate.
    #[arg(long, default_value_t = 240)]
    pub days: usize,

    /// Observation slots per day (each writes one outside and one inside line).
    #[arg(long = "per-day", default_value_t = 3)]
    pub per_day: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability that a generated line is corrupted.
    #[arg(long = "error-rate", default_value_t = 0.02)]
    pub error_rate: f64,
}
