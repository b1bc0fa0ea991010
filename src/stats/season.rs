//! Season-arrival detection over the daily outside-temperature series.
//!
//! A season "arrives" on the first day starting a run of five consecutive
//! calendar days whose daily mean outside temperature satisfies the season's
//! threshold. When no such run exists inside the search window, the fallback
//! statistic is the longest qualifying run anywhere in the series.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::domain::{DailyMean, SeasonArrival, SeasonWindow};

/// Consecutive qualifying days required for an arrival.
pub const ARRIVAL_RUN_DAYS: usize = 5;

/// A day counts toward autumn when its mean is strictly below this (°C).
pub const AUTUMN_MAX_MEAN: f64 = 10.0;

/// A day counts toward winter when its mean is at or below this (°C).
pub const WINTER_MAX_MEAN: f64 = 0.0;

/// Autumn arrival for a base year (window Aug 1 -> Feb 14).
pub fn detect_autumn(series: &[DailyMean], year: i32) -> SeasonArrival {
    find_arrival(series, &SeasonWindow::autumn(year), |mean| {
        mean < AUTUMN_MAX_MEAN
    })
}

/// Winter arrival for a base year (window Dec 1 -> Feb 14).
pub fn detect_winter(series: &[DailyMean], year: i32) -> SeasonArrival {
    find_arrival(series, &SeasonWindow::winter(year), |mean| {
        mean <= WINTER_MAX_MEAN
    })
}

/// Two-phase arrival search.
///
/// Phase 1 scans candidate start days from `window.search_start` through
/// `window.search_end - 4` inclusive; a candidate qualifies when all five
/// consecutive calendar days exist in the series with a defined outside mean
/// satisfying `predicate`. The first match wins.
///
/// Phase 2 (no match) scans the whole series, not bounded by the window,
/// for the longest run of consecutive-in-sequence qualifying entries. The
/// caller supplies the series date-ordered; days without an outside mean
/// break any run in progress. Ties keep the earlier run.
pub fn find_arrival(
    series: &[DailyMean],
    window: &SeasonWindow,
    predicate: impl Fn(f64) -> bool,
) -> SeasonArrival {
    let by_date: HashMap<NaiveDate, f64> = series
        .iter()
        .filter_map(|entry| entry.mean_outside.map(|mean| (entry.date, mean)))
        .collect();

    let last_start = window
        .search_end
        .checked_sub_signed(Duration::days(ARRIVAL_RUN_DAYS as i64 - 1));
    if let Some(last_start) = last_start {
        let mut day = window.search_start;
        while day <= last_start {
            if window_qualifies(&by_date, day, &predicate) {
                return SeasonArrival {
                    arrival: Some(day),
                    longest_run_len: ARRIVAL_RUN_DAYS,
                    longest_run_start: Some(day),
                };
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    longest_run(series, &predicate)
}

fn window_qualifies(
    by_date: &HashMap<NaiveDate, f64>,
    start: NaiveDate,
    predicate: &impl Fn(f64) -> bool,
) -> bool {
    for offset in 0..ARRIVAL_RUN_DAYS {
        let Some(day) = start.checked_add_signed(Duration::days(offset as i64)) else {
            return false;
        };
        match by_date.get(&day) {
            Some(&mean) if predicate(mean) => {}
            _ => return false,
        }
    }
    true
}

#[derive(Debug, Clone, Copy, Default)]
struct RunState {
    current_start: Option<NaiveDate>,
    current_len: usize,
    best_start: Option<NaiveDate>,
    best_len: usize,
}

impl RunState {
    fn close_current(mut self) -> Self {
        // Strict comparison: an equal-length later run never displaces the first.
        if self.current_len > self.best_len {
            self.best_len = self.current_len;
            self.best_start = self.current_start;
        }
        self.current_start = None;
        self.current_len = 0;
        self
    }
}

/// Longest maximal run of qualifying entries, as a single pure fold.
fn longest_run(series: &[DailyMean], predicate: &impl Fn(f64) -> bool) -> SeasonArrival {
    let state = series.iter().fold(RunState::default(), |mut state, entry| {
        match entry.mean_outside {
            Some(mean) if predicate(mean) => {
                if state.current_len == 0 {
                    state.current_start = Some(entry.date);
                }
                state.current_len += 1;
                state
            }
            _ => state.close_current(),
        }
    });
    let state = state.close_current();

    SeasonArrival {
        arrival: None,
        longest_run_len: state.best_len,
        longest_run_start: state.best_start,
    }
}
