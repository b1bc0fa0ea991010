//! Synthetic weather log generation.
//!
//! Produces a log in the ingest format with a seasonal outside-temperature
//! baseline, a stable indoor climate, and (optionally) a fraction of
//! deliberately malformed lines so the ingest error path can be exercised.
//!
//! Generation is fully deterministic for a given configuration: the RNG is
//! seeded from `seed` alone.

use std::f64::consts::TAU;
use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Fraction of well-formed lines written with a decimal-comma temperature,
/// the way some logger firmwares export values.
const DECIMAL_COMMA_RATE: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out: PathBuf,
    pub start: NaiveDate,
    pub days: usize,
    /// Observation slots per day (each slot writes one outside and one
    /// inside line).
    pub per_day: usize,
    pub seed: u64,
    /// Probability that a line is corrupted before writing.
    pub error_rate: f64,
}

/// Generate the log text.
pub fn generate_sample_text(config: &SampleConfig) -> Result<String, AppError> {
    if config.days == 0 {
        return Err(AppError::usage("Sample day count must be > 0."));
    }
    if config.per_day == 0 || config.per_day > 24 {
        return Err(AppError::usage("Sample readings per day must be in 1..=24."));
    }
    if !config.error_rate.is_finite() || !(0.0..1.0).contains(&config.error_rate) {
        return Err(AppError::usage("Sample error rate must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let outside_noise = Normal::new(0.0, 2.0)
        .map_err(|e| AppError::internal(format!("Noise distribution error: {e}")))?;
    let inside_noise: Normal<f64> = Normal::new(0.0, 0.8)
        .map_err(|e| AppError::internal(format!("Noise distribution error: {e}")))?;

    let mut out = String::new();

    for day_offset in 0..config.days {
        let Some(date) = config
            .start
            .checked_add_signed(Duration::days(day_offset as i64))
        else {
            return Err(AppError::usage("Sample date range overflows the calendar."));
        };

        let phase = TAU * (f64::from(date.ordinal()) - 15.0) / 365.25;
        let temp_baseline = 8.0 - 14.0 * phase.cos();
        let hum_baseline = 72.0 + 14.0 * phase.cos();

        for slot in 0..config.per_day {
            let hour = (slot * 24 / config.per_day) as u32;

            let outside_temp = temp_baseline + outside_noise.sample(&mut rng);
            let outside_hum =
                (hum_baseline + 5.0 * outside_noise.sample(&mut rng)).clamp(20.0, 100.0) as i32;
            let inside_temp = 21.0 + inside_noise.sample(&mut rng);
            let inside_hum =
                (40.0 + 3.0 * inside_noise.sample(&mut rng)).clamp(20.0, 70.0) as i32;

            emit_line(
                &mut out,
                &mut rng,
                config.error_rate,
                format!("{date} {hour:02}:00:00, Ute, {outside_temp:.1}, {outside_hum}"),
            );
            emit_line(
                &mut out,
                &mut rng,
                config.error_rate,
                format!("{date} {hour:02}:00:00, Inne, {inside_temp:.1}, {inside_hum}"),
            );
        }
    }

    Ok(out)
}

/// Generate and write the log file; returns the number of lines written.
pub fn write_sample_log(config: &SampleConfig) -> Result<usize, AppError> {
    let text = generate_sample_text(config)?;
    std::fs::write(&config.out, &text).map_err(|e| {
        AppError::usage(format!(
            "Failed to write sample log '{}': {e}",
            config.out.display()
        ))
    })?;
    Ok(text.lines().count())
}

/// Write one line, possibly corrupted, possibly with a decimal comma.
///
/// `line` is a well-formed dot-decimal record; its only `.` is the
/// temperature's decimal point. Corruption always starts from the dot form
/// so a dropped field cannot leave a still-parseable comma-temperature line.
fn emit_line(out: &mut String, rng: &mut StdRng, error_rate: f64, line: String) {
    if error_rate > 0.0 && rng.gen_bool(error_rate) {
        let fields: Vec<&str> = line.split(", ").collect();
        let corrupted = match rng.gen_range(0..3) {
            0 => fields[..fields.len() - 1].join(", "),
            1 => {
                let mut fields = fields;
                fields[2] = "error";
                fields.join(", ")
            }
            _ => format!("bad-date, {}", fields[1..].join(", ")),
        };
        out.push_str(&corrupted);
        out.push('\n');
        return;
    }

    if rng.gen_bool(DECIMAL_COMMA_RATE) {
        out.push_str(&line.replacen('.', ",", 1));
    } else {
        out.push_str(&line);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::ingest_reader;

    fn config(days: usize, per_day: usize, seed: u64, error_rate: f64) -> SampleConfig {
        SampleConfig {
            out: PathBuf::from("sample.txt"),
            start: "2016-06-01".parse().unwrap(),
            days,
            per_day,
            seed,
            error_rate,
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate_sample_text(&config(30, 3, 42, 0.05)).unwrap();
        let b = generate_sample_text(&config(30, 3, 42, 0.05)).unwrap();
        assert_eq!(a, b);

        let c = generate_sample_text(&config(30, 3, 43, 0.05)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn clean_samples_fully_ingest() {
        let text = generate_sample_text(&config(10, 3, 42, 0.0)).unwrap();
        assert_eq!(text.lines().count(), 10 * 3 * 2);

        let data = ingest_reader(text.as_bytes(), &[]).unwrap();
        assert!(data.row_errors.is_empty());
        assert_eq!(data.rows_used, 10 * 3 * 2);
        assert_eq!(data.stats.n_outside, 10 * 3);
        assert_eq!(data.stats.n_inside, 10 * 3);
    }

    #[test]
    fn error_rate_produces_rejected_rows() {
        let text = generate_sample_text(&config(10, 3, 42, 0.5)).unwrap();
        let data = ingest_reader(text.as_bytes(), &[]).unwrap();
        assert!(!data.row_errors.is_empty());
        assert!(data.rows_used < 10 * 3 * 2);
    }

    #[test]
    fn invalid_arguments_are_usage_errors() {
        assert_eq!(
            generate_sample_text(&config(0, 3, 42, 0.0)).unwrap_err().exit_code(),
            2
        );
        assert_eq!(
            generate_sample_text(&config(10, 0, 42, 0.0)).unwrap_err().exit_code(),
            2
        );
        assert_eq!(
            generate_sample_text(&config(10, 3, 42, 1.0)).unwrap_err().exit_code(),
            2
        );
    }
}
