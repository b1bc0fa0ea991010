//! Mold-risk scoring.
//!
//! The score is a heuristic in `[0, 100]`: a humidity component (0-70) plus a
//! temperature component (0-30), each a step function over fixed brackets.

use crate::domain::{DaySummary, MoldRiskEntry, MonthSummary};

/// Score mold risk for a (temperature, humidity) pair.
///
/// Pure and total: every finite input maps to a score through the open-ended
/// end brackets. Above 30 °C the temperature component drops again: extreme
/// heat suppresses mold growth.
pub fn mold_risk(temperature: f64, humidity: f64) -> u8 {
    let humidity_score: u8 = if humidity < 70.0 {
        0
    } else if humidity < 75.0 {
        10
    } else if humidity < 80.0 {
        30
    } else if humidity < 85.0 {
        50
    } else if humidity < 90.0 {
        60
    } else {
        70
    };

    let temperature_score: u8 = if temperature < 0.0 {
        0
    } else if temperature < 10.0 {
        10
    } else if temperature < 20.0 {
        20
    } else if temperature <= 30.0 {
        30
    } else if temperature <= 40.0 {
        15
    } else {
        5
    };

    humidity_score + temperature_score
}

/// Risk entries for each day summary.
pub fn day_risk_entries(days: &[DaySummary]) -> Vec<MoldRiskEntry> {
    days.iter()
        .map(|day| {
            risk_entry(
                day.date,
                day.mean_temp_outside,
                day.mean_temp_inside,
                day.mean_hum_outside,
                day.mean_hum_inside,
            )
        })
        .collect()
}

/// Risk entries for each month summary.
pub fn month_risk_entries(months: &[MonthSummary]) -> Vec<MoldRiskEntry> {
    months
        .iter()
        .map(|month| {
            risk_entry(
                month.month,
                month.mean_temp_outside,
                month.mean_temp_inside,
                month.mean_hum_outside,
                month.mean_hum_inside,
            )
        })
        .collect()
}

fn risk_entry(
    period: chrono::NaiveDate,
    mean_temp_outside: Option<f64>,
    mean_temp_inside: Option<f64>,
    mean_hum_outside: Option<f64>,
    mean_hum_inside: Option<f64>,
) -> MoldRiskEntry {
    MoldRiskEntry {
        period,
        mean_temp_outside,
        mean_temp_inside,
        mean_hum_outside,
        mean_hum_inside,
        risk_outside: side_risk(mean_temp_outside, mean_hum_outside),
        risk_inside: side_risk(mean_temp_inside, mean_hum_inside),
    }
}

/// Score one side's means; a side with no data scores `None`, never a
/// placeholder value.
fn side_risk(mean_temp: Option<f64>, mean_hum: Option<f64>) -> Option<u8> {
    match (mean_temp, mean_hum) {
        (Some(temp), Some(hum)) => Some(mold_risk(temp, hum)),
        _ => None,
    }
}
