//! Day/month aggregation over classified readings.
//!
//! Means are computed per side, only over the readings that side actually
//! contributed. A period with no readings for a side yields `None` for that
//! side's means; averaging in zeros from the unused side would silently turn
//! "no data" into "recorded zero".

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::{DailyMean, DaySummary, MonthSummary, Reading};

/// Running sums for one side of one group.
#[derive(Debug, Clone, Copy, Default)]
struct SideAccum {
    temp_sum: f64,
    hum_sum: f64,
    n: u32,
}

impl SideAccum {
    fn add(&mut self, temperature: f64, humidity: i32) {
        self.temp_sum += temperature;
        self.hum_sum += f64::from(humidity);
        self.n += 1;
    }

    fn mean_temp(&self) -> Option<f64> {
        (self.n > 0).then(|| self.temp_sum / f64::from(self.n))
    }

    fn mean_hum(&self) -> Option<f64> {
        (self.n > 0).then(|| self.hum_sum / f64::from(self.n))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct GroupAccum {
    outside: SideAccum,
    inside: SideAccum,
}

impl GroupAccum {
    fn add(&mut self, reading: &Reading) {
        if reading.side.counts_as_outside() {
            self.outside.add(reading.temperature, reading.humidity);
        } else {
            self.inside.add(reading.temperature, reading.humidity);
        }
    }
}

/// Group readings by calendar date (time-of-day discarded).
///
/// Output is ascending by date via the grouping keys' natural order; callers
/// re-sort for descending display.
pub fn group_by_day(readings: &[Reading]) -> Vec<DaySummary> {
    let mut groups: BTreeMap<NaiveDate, GroupAccum> = BTreeMap::new();
    for reading in readings {
        groups.entry(reading.timestamp.date()).or_default().add(reading);
    }

    groups
        .into_iter()
        .map(|(date, acc)| DaySummary {
            date,
            mean_temp_outside: acc.outside.mean_temp(),
            mean_temp_inside: acc.inside.mean_temp(),
            mean_hum_outside: acc.outside.mean_hum(),
            mean_hum_inside: acc.inside.mean_hum(),
        })
        .collect()
}

/// Group readings by (year, month), keyed by the month's first day.
///
/// Output is ascending by month.
pub fn group_by_month(readings: &[Reading]) -> Vec<MonthSummary> {
    let mut groups: BTreeMap<NaiveDate, GroupAccum> = BTreeMap::new();
    for reading in readings {
        groups
            .entry(first_of_month(reading.timestamp.date()))
            .or_default()
            .add(reading);
    }

    groups
        .into_iter()
        .map(|(month, acc)| MonthSummary {
            month,
            mean_temp_outside: acc.outside.mean_temp(),
            mean_temp_inside: acc.inside.mean_temp(),
            mean_hum_outside: acc.outside.mean_hum(),
            mean_hum_inside: acc.inside.mean_hum(),
        })
        .collect()
}

/// Summary for a single date, or `None` if no readings fall on it.
pub fn day_summary_for(readings: &[Reading], date: NaiveDate) -> Option<DaySummary> {
    let mut acc = GroupAccum::default();
    let mut seen = false;
    for reading in readings {
        if reading.timestamp.date() == date {
            acc.add(reading);
            seen = true;
        }
    }

    seen.then(|| DaySummary {
        date,
        mean_temp_outside: acc.outside.mean_temp(),
        mean_temp_inside: acc.inside.mean_temp(),
        mean_hum_outside: acc.outside.mean_hum(),
        mean_hum_inside: acc.inside.mean_hum(),
    })
}

/// The date-ordered daily outside-mean series fed to the season detector.
pub fn daily_outside_means(readings: &[Reading]) -> Vec<DailyMean> {
    group_by_day(readings)
        .into_iter()
        .map(|day| DailyMean {
            date: day.date,
            mean_outside: day.mean_temp_outside,
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::Side;

    fn reading(ts: &str, side: Side, temperature: f64, humidity: i32) -> Reading {
        Reading {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            location: match side {
                Side::Outside => "Ute".to_string(),
                Side::Inside => "Inne".to_string(),
                Side::Unknown => "garage".to_string(),
            },
            side,
            temperature,
            humidity,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn groups_two_days_with_per_day_means() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 60),
            reading("2016-09-01 18:00:00", Side::Outside, 14.0, 70),
            reading("2016-09-02 06:00:00", Side::Outside, 8.0, 80),
        ];

        let days = group_by_day(&readings);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date("2016-09-01"));
        assert_eq!(days[0].mean_temp_outside, Some(12.0));
        assert_eq!(days[0].mean_hum_outside, Some(65.0));
        assert_eq!(days[1].date, date("2016-09-02"));
        assert_eq!(days[1].mean_temp_outside, Some(8.0));
    }

    #[test]
    fn time_of_day_is_discarded_in_day_keys() {
        let readings = vec![
            reading("2016-09-01 00:00:01", Side::Outside, 4.0, 50),
            reading("2016-09-01 23:59:59", Side::Outside, 6.0, 50),
        ];

        let days = group_by_day(&readings);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].mean_temp_outside, Some(5.0));
    }

    #[test]
    fn missing_side_is_none_not_zero() {
        let readings = vec![reading("2016-09-01 12:00:00", Side::Outside, 8.0, 60)];

        let days = group_by_day(&readings);
        assert_eq!(days[0].mean_temp_outside, Some(8.0));
        assert_eq!(days[0].mean_temp_inside, None);
        assert_eq!(days[0].mean_hum_inside, None);
    }

    #[test]
    fn sides_average_independently() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 80),
            reading("2016-09-01 06:05:00", Side::Inside, 21.0, 40),
            reading("2016-09-01 18:00:00", Side::Outside, 12.0, 90),
            reading("2016-09-01 18:05:00", Side::Inside, 23.0, 44),
        ];

        let days = group_by_day(&readings);
        assert_eq!(days[0].mean_temp_outside, Some(11.0));
        assert_eq!(days[0].mean_temp_inside, Some(22.0));
        assert_eq!(days[0].mean_hum_outside, Some(85.0));
        assert_eq!(days[0].mean_hum_inside, Some(42.0));
    }

    #[test]
    fn unknown_side_feeds_outside_aggregates() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 60),
            reading("2016-09-01 18:00:00", Side::Unknown, 14.0, 70),
        ];

        let days = group_by_day(&readings);
        assert_eq!(days[0].mean_temp_outside, Some(12.0));
        assert_eq!(days[0].mean_temp_inside, None);
    }

    #[test]
    fn months_keyed_by_first_day_ascending() {
        let readings = vec![
            reading("2016-10-15 12:00:00", Side::Outside, 5.0, 80),
            reading("2016-09-03 12:00:00", Side::Outside, 15.0, 60),
            reading("2016-10-20 12:00:00", Side::Outside, 7.0, 82),
        ];

        let months = group_by_month(&readings);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, date("2016-09-01"));
        assert_eq!(months[0].mean_temp_outside, Some(15.0));
        assert_eq!(months[1].month, date("2016-10-01"));
        assert_eq!(months[1].mean_temp_outside, Some(6.0));
        assert_eq!(months[1].mean_hum_outside, Some(81.0));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 60),
            reading("2016-09-02 06:00:00", Side::Inside, 21.0, 40),
        ];

        assert_eq!(group_by_day(&readings), group_by_day(&readings));
        assert_eq!(group_by_month(&readings), group_by_month(&readings));
    }

    #[test]
    fn day_lookup_hits_and_misses() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 60),
            reading("2016-09-01 18:00:00", Side::Outside, 14.0, 64),
        ];

        let hit = day_summary_for(&readings, date("2016-09-01")).unwrap();
        assert_eq!(hit.mean_temp_outside, Some(12.0));
        assert_eq!(hit.mean_hum_outside, Some(62.0));

        assert!(day_summary_for(&readings, date("2016-09-02")).is_none());
    }

    #[test]
    fn daily_series_carries_missing_days_as_none() {
        let readings = vec![
            reading("2016-09-01 06:00:00", Side::Outside, 10.0, 60),
            reading("2016-09-02 06:00:00", Side::Inside, 21.0, 40),
        ];

        let series = daily_outside_means(&readings);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].mean_outside, Some(10.0));
        assert_eq!(series[1].mean_outside, None);
    }
}
