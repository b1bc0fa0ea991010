//! Read/write summary JSON files.
//!
//! Summary JSON is the "portable" representation of one full run:
//! - day summaries (enough to re-render the temperature plot)
//! - per-month means + mold risk
//! - season-arrival results and the season year
//!
//! The schema is defined by `domain::SummaryFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::SummaryFile;
use crate::error::AppError;

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create summary JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::usage(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open summary JSON '{}': {e}",
            path.display()
        ))
    })?;
    let summary: SummaryFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeasonArrival;

    #[test]
    fn summary_round_trips_through_json() {
        let summary = SummaryFile {
            tool: "wstats".to_string(),
            season_year: 2016,
            days: Vec::new(),
            months: Vec::new(),
            autumn: SeasonArrival {
                arrival: Some("2016-09-12".parse().unwrap()),
                longest_run_len: 5,
                longest_run_start: Some("2016-09-12".parse().unwrap()),
            },
            winter: SeasonArrival {
                arrival: None,
                longest_run_len: 2,
                longest_run_start: Some("2016-12-20".parse().unwrap()),
            },
        };

        let text = serde_json::to_string(&summary).unwrap();
        let back: SummaryFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back.season_year, 2016);
        assert_eq!(back.autumn, summary.autumn);
        assert_eq!(back.winter, summary.winter);
    }

    #[test]
    fn missing_summary_is_a_usage_error() {
        let err = read_summary_json(Path::new("/no/such/summary.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
