//! Weather log ingest and normalization.
//!
//! This module turns a line-based logger export into clean `Reading`s that
//! are safe to aggregate.
//!
//! Record format (one observation per line):
//!
//! ```text
//! 2016-09-01 06:30:00, Ute, 12.5, 88
//! ```
//!
//! Design goals:
//! - **Row-level validation**: skip bad rows, but report what happened
//! - **Classification at the boundary**: the side tag is assigned here, once;
//!   the engine never re-parses location text
//! - **Deterministic behavior**: no hidden randomness
//! - **Separation of concerns**: no aggregation logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{MonthKey, Reading, Side};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Summary stats about the readings actually kept.
#[derive(Debug, Clone, Default)]
pub struct DatasetStats {
    pub n_outside: usize,
    pub n_inside: usize,
    pub n_unknown: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl DatasetStats {
    pub fn n_readings(&self) -> usize {
        self.n_outside + self.n_inside + self.n_unknown
    }
}

/// Ingest output: kept readings + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub readings: Vec<Reading>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a weather log file, skipping malformed rows and excluded months.
pub fn load_readings(path: &Path, exclude_months: &[MonthKey]) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open weather log '{}': {e}", path.display()))
    })?;
    ingest_reader(file, exclude_months)
}

/// Ingest from any reader. `load_readings` is the file-backed front door;
/// this split keeps parsing testable without touching the filesystem.
pub fn ingest_reader(
    reader: impl Read,
    exclude_months: &[MonthKey],
) -> Result<IngestedData, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                rows_read += 1;
                row_errors.push(RowError {
                    line: e.position().map_or(idx + 1, position_line),
                    message: format!("unreadable record: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map_or(idx + 1, position_line);
        if is_blank(&record) {
            continue;
        }
        rows_read += 1;

        match parse_record(&record) {
            Ok(reading) => {
                if excluded(reading.timestamp.date(), exclude_months) {
                    continue;
                }
                readings.push(reading);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let stats = compute_stats(&readings);
    let rows_used = readings.len();

    Ok(IngestedData {
        readings,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn position_line(position: &csv::Position) -> usize {
    position.line() as usize
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.is_empty())
}

fn excluded(date: NaiveDate, exclude_months: &[MonthKey]) -> bool {
    exclude_months.iter().any(|month| month.contains(date))
}

fn parse_record(record: &StringRecord) -> Result<Reading, String> {
    let (timestamp_raw, location, temperature_raw, humidity_raw) = split_fields(record)?;

    let timestamp = NaiveDateTime::parse_from_str(&timestamp_raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| format!("invalid timestamp '{timestamp_raw}'"))?;
    let temperature: f64 = temperature_raw
        .parse()
        .map_err(|_| format!("invalid temperature '{temperature_raw}'"))?;
    let humidity: i32 = humidity_raw
        .parse()
        .map_err(|_| format!("invalid humidity '{humidity_raw}'"))?;

    let side = Side::from_location(&location);

    Ok(Reading {
        timestamp,
        location,
        side,
        temperature,
        humidity,
    })
}

/// Split a record into (timestamp, location, temperature, humidity).
///
/// The logger sometimes writes temperatures with a decimal comma (`12,5`),
/// which the comma-separated format splits across two fields. A five-field
/// record whose third field is an integer and fourth is a bare digit group is
/// re-joined into one temperature.
fn split_fields(record: &StringRecord) -> Result<(String, String, String, String), String> {
    match record.len() {
        4 => Ok((
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
            record[3].to_string(),
        )),
        5 if is_int_like(&record[2]) && is_digits(&record[3]) => Ok((
            record[0].to_string(),
            record[1].to_string(),
            format!("{}.{}", &record[2], &record[3]),
            record[4].to_string(),
        )),
        n => Err(format!("expected 4 fields, found {n}")),
    }
}

fn is_int_like(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    is_digits(digits)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn compute_stats(readings: &[Reading]) -> DatasetStats {
    let mut stats = DatasetStats::default();
    for reading in readings {
        match reading.side {
            Side::Outside => stats.n_outside += 1,
            Side::Inside => stats.n_inside += 1,
            Side::Unknown => stats.n_unknown += 1,
        }
        let date = reading.timestamp.date();
        stats.first_date = Some(stats.first_date.map_or(date, |d| d.min(date)));
        stats.last_date = Some(stats.last_date.map_or(date, |d| d.max(date)));
    }
    stats
}
