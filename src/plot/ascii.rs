//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily mean outside temperature: `o`
//! - autumn/winter arrival days: `A` / `W` (overlaying the point)
//! - 0 °C guide line: `-` (drawn when the y-range spans zero)

use chrono::NaiveDate;

use crate::domain::{DailyMean, SeasonArrival, SummaryFile};

/// Render the daily outside-mean series with season-arrival markers.
pub fn render_temp_plot(
    series: &[DailyMean],
    autumn: &SeasonArrival,
    winter: &SeasonArrival,
    width: usize,
    height: usize,
) -> String {
    let points: Vec<(NaiveDate, f64)> = series
        .iter()
        .filter_map(|entry| entry.mean_outside.map(|mean| (entry.date, mean)))
        .collect();

    let Some((d_min, d_max)) = date_range(&points) else {
        return "No outside data to plot.\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = value_range(&points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Guide line first (so points can overlay).
    if y_min < 0.0 && y_max > 0.0 {
        let row = map_y(0.0, y_min, y_max, height);
        for cell in &mut grid[row] {
            *cell = '-';
        }
    }

    for &(date, value) in &points {
        let x = map_x(date, d_min, d_max, width);
        let y = map_y(value, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    for (result, marker) in [(autumn, 'A'), (winter, 'W')] {
        let Some(arrival) = result.arrival else { continue };
        let Some(&(date, value)) = points.iter().find(|(date, _)| *date == arrival) else {
            continue;
        };
        let x = map_x(date, d_min, d_max, width);
        let y = map_y(value, y_min, y_max, height);
        grid[y][x] = marker;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {d_min} .. {d_max} | mean outside temp=[{y_min:.2}, {y_max:.2}]\u{b0}C\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render from a saved summary JSON (no recomputation).
pub fn render_temp_plot_from_summary(summary: &SummaryFile, width: usize, height: usize) -> String {
    let series: Vec<DailyMean> = summary
        .days
        .iter()
        .map(|day| DailyMean {
            date: day.date,
            mean_outside: day.mean_temp_outside,
        })
        .collect();

    render_temp_plot(&series, &summary.autumn, &summary.winter, width, height)
}

fn date_range(points: &[(NaiveDate, f64)]) -> Option<(NaiveDate, NaiveDate)> {
    let first = points.first()?.0;
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), &(date, _)| {
            (min.min(date), max.max(date))
        });
    Some((min, max))
}

fn value_range(points: &[(NaiveDate, f64)]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(_, value) in points {
        min = min.min(value);
        max = max.max(value);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min - span * frac, max + span * frac)
}

fn map_x(date: NaiveDate, d_min: NaiveDate, d_max: NaiveDate, width: usize) -> usize {
    let span = (d_max - d_min).num_days().max(1) as f64;
    let offset = (date - d_min).num_days() as f64;
    let frac = (offset / span).clamp(0.0, 1.0);
    ((frac * (width as f64 - 1.0)).round() as usize).min(width - 1)
}

fn map_y(value: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let frac = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    let row = (frac * (height as f64 - 1.0)).round() as usize;
    (height - 1).saturating_sub(row)
}
