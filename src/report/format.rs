//! All user-facing text output.
//!
//! Every function here is pure: it takes computed aggregates and returns a
//! `String`. File/terminal IO lives elsewhere (`io::export`, `app`).
//!
//! Absent means (a period with no readings for one side) render as `n/a`,
//! never as a fabricated zero.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::app::pipeline::RunOutput;
use crate::domain::{DaySummary, MoldRiskEntry, MonthSummary, SeasonArrival, StatsConfig};
use crate::io::ingest::IngestedData;

/// How many row errors the run summary lists before truncating.
const MAX_ROW_ERRORS_SHOWN: usize = 3;

/// Format the run header: input stats, date range, season year.
pub fn format_run_summary(output: &RunOutput, config: &StatsConfig) -> String {
    let mut out = String::new();
    let ingest = &output.ingest;

    out.push_str("=== wstats - Weather Log Statistics ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Rows: read={} used={} rejected={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Readings: outside={} inside={} unclassified={}\n",
        ingest.stats.n_outside, ingest.stats.n_inside, ingest.stats.n_unknown
    ));
    if let (Some(first), Some(last)) = (ingest.stats.first_date, ingest.stats.last_date) {
        out.push_str(&format!("Dates: {first} .. {last}\n"));
    }
    out.push_str(&format!("Season year: {}\n", output.season_year));

    for err in ingest.row_errors.iter().take(MAX_ROW_ERRORS_SHOWN) {
        out.push_str(&format!("  (line {}) {}\n", err.line, err.message));
    }
    if ingest.row_errors.len() > MAX_ROW_ERRORS_SHOWN {
        out.push_str(&format!(
            "  ... and {} more rejected rows\n",
            ingest.row_errors.len() - MAX_ROW_ERRORS_SHOWN
        ));
    }

    out
}

/// Format the single-date lookup, or the "no data" diagnostics.
pub fn format_day_lookup(
    date: NaiveDate,
    summary: Option<&DaySummary>,
    ingest: &IngestedData,
) -> String {
    let Some(summary) = summary else {
        let mut out = String::new();
        out.push_str(&format!("No data found for {date}.\n"));
        out.push_str(&format!("Loaded readings: {}\n", ingest.stats.n_readings()));
        if let (Some(first), Some(last)) = (ingest.stats.first_date, ingest.stats.last_date) {
            out.push_str(&format!("Data range: {first} .. {last}\n"));
        }
        return out;
    };

    let mut out = String::new();
    out.push_str(&format!("Date: {date}\n"));
    out.push_str(&format!(
        "Average temperature outside: {}\n",
        fmt_temp(summary.mean_temp_outside)
    ));
    out.push_str(&format!(
        "Average temperature inside : {}\n",
        fmt_temp(summary.mean_temp_inside)
    ));
    out.push_str(&format!(
        "Average humidity outside   : {}\n",
        fmt_pct(summary.mean_hum_outside)
    ));
    out.push_str(&format!(
        "Average humidity inside    : {}\n",
        fmt_pct(summary.mean_hum_inside)
    ));
    out
}

/// Format the temperature rankings: warmest days/months, driest months.
pub fn format_temperature_report(
    days: &[DaySummary],
    months: &[MonthSummary],
    top: usize,
) -> String {
    let mut out = String::new();

    out.push_str("Warmest days (outside first):\n");
    for day in ranked(days, top, |d: &DaySummary| d.mean_temp_outside, Order::Desc) {
        out.push_str(&format!(
            "{} - outside: {}, inside: {}\n",
            day.date,
            fmt_temp(day.mean_temp_outside),
            fmt_temp(day.mean_temp_inside)
        ));
    }

    out.push_str("\nWarmest days (inside first):\n");
    for day in ranked(days, top, |d: &DaySummary| d.mean_temp_inside, Order::Desc) {
        out.push_str(&format!(
            "{} - inside: {}, outside: {}\n",
            day.date,
            fmt_temp(day.mean_temp_inside),
            fmt_temp(day.mean_temp_outside)
        ));
    }

    out.push_str("\nWarmest months (outside first):\n");
    for month in ranked(months, top, |m: &MonthSummary| m.mean_temp_outside, Order::Desc) {
        out.push_str(&format!(
            "{} - outside: {}, inside: {}\n",
            month_label(month.month),
            fmt_temp(month.mean_temp_outside),
            fmt_temp(month.mean_temp_inside)
        ));
    }

    out.push_str("\nWarmest months (inside first):\n");
    for month in ranked(months, top, |m: &MonthSummary| m.mean_temp_inside, Order::Desc) {
        out.push_str(&format!(
            "{} - inside: {}, outside: {}\n",
            month_label(month.month),
            fmt_temp(month.mean_temp_inside),
            fmt_temp(month.mean_temp_outside)
        ));
    }

    out.push_str("\nDriest months (outside first):\n");
    for month in ranked(months, top, |m: &MonthSummary| m.mean_hum_outside, Order::Asc) {
        out.push_str(&format!(
            "{} - outside: {}, inside: {}\n",
            month_label(month.month),
            fmt_pct(month.mean_hum_outside),
            fmt_pct(month.mean_hum_inside)
        ));
    }

    out
}

/// Format the mold-risk rankings per day and month.
pub fn format_mold_report(
    by_day: &[MoldRiskEntry],
    by_month: &[MoldRiskEntry],
    top: usize,
) -> String {
    let mut out = String::new();

    out.push_str("Mold risk per day (outside highest first):\n");
    for entry in ranked(by_day, top, |e: &MoldRiskEntry| opt_risk(e.risk_outside), Order::Desc) {
        out.push_str(&mold_line(&entry, entry.period.to_string(), SideFirst::Outside));
    }

    out.push_str("\nMold risk per day (inside highest first):\n");
    for entry in ranked(by_day, top, |e: &MoldRiskEntry| opt_risk(e.risk_inside), Order::Desc) {
        out.push_str(&mold_line(&entry, entry.period.to_string(), SideFirst::Inside));
    }

    out.push_str("\nMold risk per month (outside highest first):\n");
    for entry in ranked(by_month, top, |e: &MoldRiskEntry| opt_risk(e.risk_outside), Order::Desc) {
        out.push_str(&mold_line(&entry, month_label(entry.period), SideFirst::Outside));
    }

    out.push_str("\nMold risk per month (inside highest first):\n");
    for entry in ranked(by_month, top, |e: &MoldRiskEntry| opt_risk(e.risk_inside), Order::Desc) {
        out.push_str(&mold_line(&entry, month_label(entry.period), SideFirst::Inside));
    }

    out
}

/// Format the season-arrival summary.
pub fn format_season_summary(year: i32, autumn: &SeasonArrival, winter: &SeasonArrival) -> String {
    let mut out = String::new();
    out.push_str("Season dates (meteorological rules):\n");
    out.push_str(&season_line("autumn", &autumn_label(year), autumn));
    out.push_str(&season_line("winter", &winter_label(year), winter));
    out
}

/// The block appended to the summary file by season-only runs.
pub fn format_season_lines(year: i32, autumn: &SeasonArrival, winter: &SeasonArrival) -> String {
    let mut out = format_season_summary(year, autumn, winter);
    out.push('\n');
    out
}

/// Full contents of the plain-text summary file: monthly means + risk,
/// season dates, and a short description of the scoring algorithm.
pub fn format_summary_file(
    months: &[MoldRiskEntry],
    year: i32,
    autumn: &SeasonArrival,
    winter: &SeasonArrival,
) -> String {
    let mut out = String::new();

    out.push_str("Monthly averages (outside / inside) + mold risk\n");
    out.push_str("==============================================\n");
    for month in months {
        out.push_str(&format!("{}\n", month_label(month.period)));
        out.push_str(&format!("  Avg temp outside: {}\n", fmt_temp(month.mean_temp_outside)));
        out.push_str(&format!("  Avg temp inside : {}\n", fmt_temp(month.mean_temp_inside)));
        out.push_str(&format!("  Avg hum outside : {}\n", fmt_pct(month.mean_hum_outside)));
        out.push_str(&format!("  Avg hum inside  : {}\n", fmt_pct(month.mean_hum_inside)));
        out.push_str(&format!("  Mold risk outside: {}\n", fmt_risk(month.risk_outside)));
        out.push_str(&format!("  Mold risk inside : {}\n", fmt_risk(month.risk_inside)));
        out.push('\n');
    }

    out.push_str(&format_season_summary(year, autumn, winter));

    out.push('\n');
    out.push_str("Mold risk algorithm (summary):\n");
    out.push_str("  - Humidity score (0..70):\n");
    out.push_str("      <70% => 0, 70-74 => 10, 75-79 => 30, 80-84 => 50, 85-89 => 60, >=90 => 70\n");
    out.push_str("  - Temperature score (0..30):\n");
    out.push_str("      <0\u{b0}C => 0, 0-9 => 10, 10-19 => 20, 20-30 => 30, 31-40 => 15, >40 => 5\n");
    out.push_str("  - Final mold risk = humidity score + temperature score (0..100)\n");
    out.push('\n');

    out
}

fn season_line(season: &str, label: &str, result: &SeasonArrival) -> String {
    if let Some(arrival) = result.arrival {
        return format!("  Meteorological {label} arrival: {arrival}\n");
    }
    match result.longest_run_start {
        Some(start) if result.longest_run_len > 0 => format!(
            "  No full {season} arrival found; longest {season}-like run started {start} with length {} days (needs 5).\n",
            result.longest_run_len
        ),
        _ => format!("  No {season}-like data available to determine arrival.\n"),
    }
}

fn autumn_label(year: i32) -> String {
    format!("autumn {year}")
}

fn winter_label(year: i32) -> String {
    format!("winter {}/{:02}", year, (year + 1).rem_euclid(100))
}

#[derive(Clone, Copy)]
enum SideFirst {
    Outside,
    Inside,
}

fn mold_line(entry: &MoldRiskEntry, period: String, first: SideFirst) -> String {
    let outside = format!(
        "outside: {} (T: {}, H: {})",
        fmt_risk(entry.risk_outside),
        fmt_temp(entry.mean_temp_outside),
        fmt_pct(entry.mean_hum_outside)
    );
    let inside = format!(
        "inside: {} (T: {}, H: {})",
        fmt_risk(entry.risk_inside),
        fmt_temp(entry.mean_temp_inside),
        fmt_pct(entry.mean_hum_inside)
    );
    match first {
        SideFirst::Outside => format!("{period} - {outside} - {inside}\n"),
        SideFirst::Inside => format!("{period} - {inside} - {outside}\n"),
    }
}

#[derive(Clone, Copy)]
enum Order {
    Asc,
    Desc,
}

/// Clone and sort by an optional key; `None` sorts last either way.
/// `top = 0` means "all rows".
fn ranked<T: Clone>(
    rows: &[T],
    top: usize,
    key: impl Fn(&T) -> Option<f64>,
    order: Order,
) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| cmp_opt(key(a), key(b), order));
    let limit = if top == 0 { sorted.len() } else { top };
    sorted.truncate(limit);
    sorted
}

fn cmp_opt(a: Option<f64>, b: Option<f64>, order: Order) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let cmp = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                Order::Asc => cmp,
                Order::Desc => cmp.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn opt_risk(risk: Option<u8>) -> Option<f64> {
    risk.map(f64::from)
}

fn fmt_temp(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}\u{b0}C"),
        None => "n/a".to_string(),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}

fn fmt_risk(risk: Option<u8>) -> String {
    match risk {
        Some(r) => format!("{r} (0-100)"),
        None => "n/a".to_string(),
    }
}

fn month_label(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn day(d: &str, temp_out: Option<f64>, temp_in: Option<f64>) -> DaySummary {
        DaySummary {
            date: date(d),
            mean_temp_outside: temp_out,
            mean_temp_inside: temp_in,
            mean_hum_outside: temp_out.map(|_| 70.0),
            mean_hum_inside: temp_in.map(|_| 40.0),
        }
    }

    #[test]
    fn warmest_days_rank_descending_with_missing_last() {
        let days = vec![
            day("2016-09-01", Some(10.0), None),
            day("2016-09-02", None, Some(21.0)),
            day("2016-09-03", Some(14.0), None),
        ];

        let out = format_temperature_report(&days, &[], 0);
        let first = out.lines().nth(1).unwrap();
        let second = out.lines().nth(2).unwrap();
        let third = out.lines().nth(3).unwrap();
        assert!(first.starts_with("2016-09-03"));
        assert!(second.starts_with("2016-09-01"));
        assert!(third.starts_with("2016-09-02"));
        assert!(third.contains("outside: n/a"));
    }

    #[test]
    fn top_limits_each_table() {
        let days = vec![
            day("2016-09-01", Some(10.0), Some(20.0)),
            day("2016-09-02", Some(11.0), Some(21.0)),
            day("2016-09-03", Some(12.0), Some(22.0)),
        ];

        let out = format_temperature_report(&days, &[], 1);
        let warmest: Vec<&str> = out
            .lines()
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        assert_eq!(warmest, vec!["2016-09-03 - outside: 12.00\u{b0}C, inside: 22.00\u{b0}C"]);
    }

    #[test]
    fn day_lookup_renders_absent_sides_as_na() {
        let ingest = crate::io::ingest::ingest_reader(
            "2016-09-01 06:00:00, Ute, 12.0, 62\n".as_bytes(),
            &[],
        )
        .unwrap();
        let summary = crate::stats::day_summary_for(&ingest.readings, date("2016-09-01"));

        let out = format_day_lookup(date("2016-09-01"), summary.as_ref(), &ingest);
        assert!(out.contains("Average temperature outside: 12.00\u{b0}C"));
        assert!(out.contains("Average temperature inside : n/a"));
    }

    #[test]
    fn day_lookup_miss_reports_range() {
        let ingest = crate::io::ingest::ingest_reader(
            "2016-09-01 06:00:00, Ute, 12.0, 62\n".as_bytes(),
            &[],
        )
        .unwrap();

        let out = format_day_lookup(date("2016-10-01"), None, &ingest);
        assert!(out.contains("No data found for 2016-10-01."));
        assert!(out.contains("Loaded readings: 1"));
        assert!(out.contains("Data range: 2016-09-01 .. 2016-09-01"));
    }

    #[test]
    fn season_summary_wording_per_outcome() {
        let arrived = SeasonArrival {
            arrival: Some(date("2016-09-12")),
            longest_run_len: 5,
            longest_run_start: Some(date("2016-09-12")),
        };
        let fallback = SeasonArrival {
            arrival: None,
            longest_run_len: 3,
            longest_run_start: Some(date("2016-12-20")),
        };
        let empty = SeasonArrival {
            arrival: None,
            longest_run_len: 0,
            longest_run_start: None,
        };

        let out = format_season_summary(2016, &arrived, &fallback);
        assert!(out.contains("Meteorological autumn 2016 arrival: 2016-09-12"));
        assert!(out.contains(
            "No full winter arrival found; longest winter-like run started 2016-12-20 with length 3 days (needs 5)."
        ));

        let out = format_season_summary(2016, &empty, &empty);
        assert!(out.contains("No autumn-like data available to determine arrival."));
        assert!(out.contains("No winter-like data available to determine arrival."));
    }

    #[test]
    fn winter_label_spans_the_year_boundary() {
        assert_eq!(winter_label(2016), "winter 2016/17");
        assert_eq!(winter_label(1999), "winter 1999/00");
    }

    #[test]
    fn summary_file_lists_months_and_algorithm() {
        let month = MoldRiskEntry {
            period: date("2016-10-01"),
            mean_temp_outside: Some(5.0),
            mean_temp_inside: None,
            mean_hum_outside: Some(88.0),
            mean_hum_inside: None,
            risk_outside: Some(70),
            risk_inside: None,
        };
        let empty = SeasonArrival {
            arrival: None,
            longest_run_len: 0,
            longest_run_start: None,
        };

        let out = format_summary_file(&[month], 2016, &empty, &empty);
        assert!(out.starts_with("Monthly averages"));
        assert!(out.contains("2016-10\n"));
        assert!(out.contains("  Mold risk outside: 70 (0-100)"));
        assert!(out.contains("  Mold risk inside : n/a"));
        assert!(out.contains("Mold risk algorithm (summary):"));
    }

    #[test]
    fn mold_report_orders_by_requested_side() {
        let entries = vec![
            MoldRiskEntry {
                period: date("2016-09-01"),
                mean_temp_outside: Some(8.0),
                mean_temp_inside: Some(21.0),
                mean_hum_outside: Some(75.0),
                mean_hum_inside: Some(40.0),
                risk_outside: Some(40),
                risk_inside: Some(30),
            },
            MoldRiskEntry {
                period: date("2016-09-02"),
                mean_temp_outside: Some(5.0),
                mean_temp_inside: Some(21.0),
                mean_hum_outside: Some(90.0),
                mean_hum_inside: Some(75.0),
                risk_outside: Some(80),
                risk_inside: Some(60),
            },
        ];

        let out = format_mold_report(&entries, &[], 0);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("2016-09-02 - outside: 80 (0-100)"));
        assert!(lines[2].starts_with("2016-09-01 - outside: 40 (0-100)"));
    }
}
