//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Which side of the wall a reading was taken on.
///
/// Assigned once at parse time from the raw location label; downstream code
/// never looks at the label text again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Outside,
    Inside,
    Unknown,
}

impl Side {
    /// Classify a raw location label.
    ///
    /// The logger writes Swedish location tags; `ute`/`utomhus` mark outdoor
    /// sensors and `inne`/`inomhus` indoor ones. Matching is case-insensitive
    /// and substring-based because labels carry extra noise ("Ute (norr)").
    pub fn from_location(label: &str) -> Side {
        let label = label.to_lowercase();
        if label.contains("ute") || label.contains("utomhus") {
            Side::Outside
        } else if label.contains("inne") || label.contains("inomhus") {
            Side::Inside
        } else {
            Side::Unknown
        }
    }

    /// Whether this reading feeds the outside aggregates.
    ///
    /// Unclassified sensors are treated as outdoor ones; the indoor label set
    /// is closed, the outdoor one is not.
    pub fn counts_as_outside(self) -> bool {
        matches!(self, Side::Outside | Side::Unknown)
    }
}

/// One timestamped observation from the log, already classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    /// Raw location label, preserved for display/diagnostics.
    pub location: String,
    pub side: Side,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percent. 0-100 expected but not enforced here.
    pub humidity: i32,
}

/// Per-day averaged temperature/humidity for each side.
///
/// A `None` mean says the day has no readings for that side. Absence is never
/// coerced to `0.0`; callers decide how to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub mean_temp_outside: Option<f64>,
    pub mean_temp_inside: Option<f64>,
    pub mean_hum_outside: Option<f64>,
    pub mean_hum_inside: Option<f64>,
}

/// Per-month averages, keyed by the first day of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: NaiveDate,
    pub mean_temp_outside: Option<f64>,
    pub mean_temp_inside: Option<f64>,
    pub mean_hum_outside: Option<f64>,
    pub mean_hum_inside: Option<f64>,
}

/// A period's means plus the mold-risk score for each side.
///
/// A side with an undefined mean gets `risk = None` rather than a score
/// computed from a placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldRiskEntry {
    pub period: NaiveDate,
    pub mean_temp_outside: Option<f64>,
    pub mean_temp_inside: Option<f64>,
    pub mean_hum_outside: Option<f64>,
    pub mean_hum_inside: Option<f64>,
    pub risk_outside: Option<u8>,
    pub risk_inside: Option<u8>,
}

/// One entry of the date-ordered series the season detector scans.
///
/// `mean_outside.is_some()` doubles as the "day has outside data" flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub mean_outside: Option<f64>,
}

/// Date range scanned for a season's arrival.
///
/// Kept as explicit data rather than constants inside the detector so tests
/// can probe arbitrary synthetic ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonWindow {
    pub search_start: NaiveDate,
    pub search_end: NaiveDate,
}

impl SeasonWindow {
    /// Meteorological autumn search window for a base year: Aug 1 -> Feb 14.
    pub fn autumn(year: i32) -> Self {
        Self {
            search_start: ymd(year, 8, 1),
            search_end: ymd(year + 1, 2, 14),
        }
    }

    /// Meteorological winter search window for a base year: Dec 1 -> Feb 14.
    pub fn winter(year: i32) -> Self {
        Self {
            search_start: ymd(year, 12, 1),
            search_end: ymd(year + 1, 2, 14),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Outcome of one season-arrival detection.
///
/// `arrival` is present only when a full qualifying run was found inside the
/// search window. The longest-run fields are the fallback statistic and are
/// populated either way; `longest_run_start` is present iff the length is > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonArrival {
    pub arrival: Option<NaiveDate>,
    pub longest_run_len: usize,
    pub longest_run_start: Option<NaiveDate>,
}

/// A calendar month used for filtering, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("Invalid month '{s}'. Expected YYYY-MM.");
        let (y, m) = s.split_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(MonthKey { year, month })
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub input: PathBuf,
    /// Season base year; `None` means "infer from the earliest reading".
    pub year: Option<i32>,
    /// Calendar months dropped during ingest.
    pub exclude_months: Vec<MonthKey>,
    /// Rows shown per ranking table; 0 = all.
    pub top: usize,

    pub summary_file: PathBuf,
    pub export_csv: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// A saved run summary (JSON).
///
/// The "portable" representation of one full run: enough to re-render the
/// season report and the daily temperature plot without re-reading the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub season_year: i32,
    pub days: Vec<DaySummary>,
    pub months: Vec<MoldRiskEntry>,
    pub autumn: SeasonArrival,
    pub winter: SeasonArrival,
}
