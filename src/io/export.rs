//! Summary text file and CSV export writers.
//!
//! Content comes from `report::format`; this module only touches the
//! filesystem. Every writer returns a `Result` so the caller decides whether
//! a failed write aborts the run or degrades to a warning.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::domain::{MoldRiskEntry, SeasonArrival};
use crate::error::AppError;
use crate::report::format::{format_season_lines, format_summary_file};

/// Overwrite the plain-text summary file with the full monthly report.
pub fn write_summary_file(
    path: &Path,
    months: &[MoldRiskEntry],
    year: i32,
    autumn: &SeasonArrival,
    winter: &SeasonArrival,
) -> Result<(), AppError> {
    let contents = format_summary_file(months, year, autumn, winter);
    std::fs::write(path, contents).map_err(|e| {
        AppError::usage(format!(
            "Failed to write summary file '{}': {e}",
            path.display()
        ))
    })
}

/// Append only the season lines to the summary file (created if missing).
pub fn append_season_lines(
    path: &Path,
    year: i32,
    autumn: &SeasonArrival,
    winter: &SeasonArrival,
) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::usage(format!(
                "Failed to open summary file '{}' for append: {e}",
                path.display()
            ))
        })?;

    file.write_all(format_season_lines(year, autumn, winter).as_bytes())
        .map_err(|e| {
            AppError::usage(format!(
                "Failed to append to summary file '{}': {e}",
                path.display()
            ))
        })
}

/// Write per-month averages and risks to a CSV file.
///
/// The export is meant to be easy to consume in spreadsheets or downstream
/// scripts; absent means/risks become empty cells.
pub fn write_monthly_csv(path: &Path, months: &[MoldRiskEntry]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(
        file,
        "month,mean_temp_outside,mean_temp_inside,mean_hum_outside,mean_hum_inside,risk_outside,risk_inside"
    )
    .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for month in months {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            month.period.format("%Y-%m"),
            csv_opt(month.mean_temp_outside),
            csv_opt(month.mean_temp_inside),
            csv_opt(month.mean_hum_outside),
            csv_opt(month.mean_hum_inside),
            csv_opt_risk(month.risk_outside),
            csv_opt_risk(month.risk_inside),
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn csv_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn csv_opt_risk(risk: Option<u8>) -> String {
    risk.map(|r| r.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_render_absent_values_empty() {
        assert_eq!(csv_opt(Some(12.345)), "12.35");
        assert_eq!(csv_opt(None), "");
        assert_eq!(csv_opt_risk(Some(70)), "70");
        assert_eq!(csv_opt_risk(None), "");
    }

    #[test]
    fn unwritable_paths_surface_as_usage_errors() {
        let err = write_monthly_csv(Path::new("/no/such/dir/out.csv"), &[]).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let empty = SeasonArrival {
            arrival: None,
            longest_run_len: 0,
            longest_run_start: None,
        };
        let err =
            append_season_lines(Path::new("/no/such/dir/out.txt"), 2016, &empty, &empty)
                .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
