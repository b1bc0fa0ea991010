//! Shared "stats pipeline" logic used by every subcommand front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> day/month grouping -> mold scoring -> season detection
//!
//! The front-ends can then focus on presentation (printing vs files).

use chrono::Datelike;

use crate::domain::{
    DailyMean, DaySummary, MoldRiskEntry, MonthSummary, SeasonArrival, StatsConfig, SummaryFile,
};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_readings};
use crate::stats::{
    daily_outside_means, day_risk_entries, detect_autumn, detect_winter, group_by_day,
    group_by_month, month_risk_entries,
};

/// All computed outputs of a single stats run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub days: Vec<DaySummary>,
    pub months: Vec<MonthSummary>,
    pub mold_by_day: Vec<MoldRiskEntry>,
    pub mold_by_month: Vec<MoldRiskEntry>,
    pub daily_series: Vec<DailyMean>,
    pub season_year: i32,
    pub autumn: SeasonArrival,
    pub winter: SeasonArrival,
}

impl RunOutput {
    /// The portable JSON representation of this run.
    pub fn to_summary_file(&self) -> SummaryFile {
        SummaryFile {
            tool: "wstats".to_string(),
            season_year: self.season_year,
            days: self.days.clone(),
            months: self.mold_by_month.clone(),
            autumn: self.autumn,
            winter: self.winter,
        }
    }
}

/// Execute the full statistics pipeline over the configured log file.
pub fn run_stats(config: &StatsConfig) -> Result<RunOutput, AppError> {
    let ingest = load_readings(&config.input, &config.exclude_months)?;
    run_with_readings(config, ingest)
}

/// Execute the pipeline over pre-ingested readings.
///
/// This is useful for callers that already hold the data (tests, future
/// service front-ends) and want to recompute without re-reading the file.
pub fn run_with_readings(
    config: &StatsConfig,
    ingest: IngestedData,
) -> Result<RunOutput, AppError> {
    if ingest.readings.is_empty() {
        return Err(AppError::no_data(format!(
            "No usable readings in '{}' ({} malformed rows).",
            config.input.display(),
            ingest.row_errors.len()
        )));
    }

    let days = group_by_day(&ingest.readings);
    let months = group_by_month(&ingest.readings);
    let mold_by_day = day_risk_entries(&days);
    let mold_by_month = month_risk_entries(&months);
    let daily_series = daily_outside_means(&ingest.readings);

    let season_year = resolve_season_year(config, &ingest);
    let autumn = detect_autumn(&daily_series, season_year);
    let winter = detect_winter(&daily_series, season_year);

    Ok(RunOutput {
        ingest,
        days,
        months,
        mold_by_day,
        mold_by_month,
        daily_series,
        season_year,
        autumn,
        winter,
    })
}

/// `--year` when given, otherwise the year of the earliest reading.
fn resolve_season_year(config: &StatsConfig, ingest: &IngestedData) -> i32 {
    config
        .year
        .or_else(|| ingest.stats.first_date.map(|date| date.year()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::io::ingest::ingest_reader;

    fn config() -> StatsConfig {
        StatsConfig {
            input: PathBuf::from("test.log"),
            year: None,
            exclude_months: Vec::new(),
            top: 0,
            summary_file: PathBuf::from("monthly_averages.txt"),
            export_csv: None,
            export_summary: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
        }
    }

    #[test]
    fn empty_ingest_is_a_no_data_error() {
        let ingest = ingest_reader("garbage line\n".as_bytes(), &[]).unwrap();
        let err = run_with_readings(&config(), ingest).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn season_year_is_inferred_from_earliest_reading() {
        let text = "2016-09-02 06:00:00, Ute, 8.0, 60\n\
                    2015-12-30 06:00:00, Ute, -2.0, 85\n";
        let ingest = ingest_reader(text.as_bytes(), &[]).unwrap();
        let run = run_with_readings(&config(), ingest).unwrap();
        assert_eq!(run.season_year, 2015);
    }

    #[test]
    fn explicit_year_overrides_inference() {
        let text = "2016-09-02 06:00:00, Ute, 8.0, 60\n";
        let ingest = ingest_reader(text.as_bytes(), &[]).unwrap();
        let mut cfg = config();
        cfg.year = Some(2014);
        let run = run_with_readings(&cfg, ingest).unwrap();
        assert_eq!(run.season_year, 2014);
    }

    #[test]
    fn full_run_produces_every_aggregate() {
        let text = "2016-09-01 06:00:00, Ute, 8.0, 75\n\
                    2016-09-01 06:05:00, Inne, 21.0, 40\n\
                    2016-10-02 06:00:00, Ute, 4.0, 88\n";
        let ingest = ingest_reader(text.as_bytes(), &[]).unwrap();
        let run = run_with_readings(&config(), ingest).unwrap();

        assert_eq!(run.days.len(), 2);
        assert_eq!(run.months.len(), 2);
        assert_eq!(run.mold_by_day.len(), 2);
        assert_eq!(run.mold_by_month.len(), 2);
        assert_eq!(run.daily_series.len(), 2);
        assert_eq!(run.season_year, 2016);

        let summary = run.to_summary_file();
        assert_eq!(summary.tool, "wstats");
        assert_eq!(summary.days.len(), 2);
        assert_eq!(summary.months.len(), 2);
    }
}
