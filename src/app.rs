//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the statistics pipeline
//! - prints reports/plots
//! - maintains the plain-text summary file and optional exports

use clap::Parser;

use crate::cli::{Command, DayArgs, PlotArgs, SampleArgs, StatsArgs};
use crate::data::sample::SampleConfig;
use crate::domain::StatsConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wstats` binary.
pub fn run() -> Result<(), AppError> {
    // We want `wstats` and `wstats -i data.txt` to behave like
    // `wstats report ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_stats(args, OutputMode::Full),
        Command::Temps(args) => handle_stats(args, OutputMode::Temps),
        Command::Mold(args) => handle_stats(args, OutputMode::Mold),
        Command::Seasons(args) => handle_stats(args, OutputMode::Seasons),
        Command::Day(args) => handle_day(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    Temps,
    Mold,
    Seasons,
}

fn handle_stats(args: StatsArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = stats_config_from_args(&args);
    let run = pipeline::run_stats(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run, &config));
            println!(
                "{}",
                crate::report::format_temperature_report(&run.days, &run.months, config.top)
            );
            println!(
                "{}",
                crate::report::format_mold_report(&run.mold_by_day, &run.mold_by_month, config.top)
            );
            println!(
                "{}",
                crate::report::format_season_summary(run.season_year, &run.autumn, &run.winter)
            );

            if config.plot {
                let plot = crate::plot::render_temp_plot(
                    &run.daily_series,
                    &run.autumn,
                    &run.winter,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }

            warn_on_failure(crate::io::export::write_summary_file(
                &config.summary_file,
                &run.mold_by_month,
                run.season_year,
                &run.autumn,
                &run.winter,
            ));
        }
        OutputMode::Temps => {
            println!(
                "{}",
                crate::report::format_temperature_report(&run.days, &run.months, config.top)
            );
            println!(
                "{}",
                crate::report::format_season_summary(run.season_year, &run.autumn, &run.winter)
            );

            warn_on_failure(crate::io::export::append_season_lines(
                &config.summary_file,
                run.season_year,
                &run.autumn,
                &run.winter,
            ));
        }
        OutputMode::Mold => {
            println!(
                "{}",
                crate::report::format_mold_report(&run.mold_by_day, &run.mold_by_month, config.top)
            );

            warn_on_failure(crate::io::export::write_summary_file(
                &config.summary_file,
                &run.mold_by_month,
                run.season_year,
                &run.autumn,
                &run.winter,
            ));
        }
        OutputMode::Seasons => {
            println!(
                "{}",
                crate::report::format_season_summary(run.season_year, &run.autumn, &run.winter)
            );
        }
    }

    // Optional exports, available in every mode.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_monthly_csv(path, &run.mold_by_month)?;
    }
    if let Some(path) = &config.export_summary {
        crate::io::summary::write_summary_json(path, &run.to_summary_file())?;
    }

    Ok(())
}

fn handle_day(args: DayArgs) -> Result<(), AppError> {
    let ingest = crate::io::ingest::load_readings(&args.input, &args.exclude_months)?;
    let summary = crate::stats::day_summary_for(&ingest.readings, args.date);

    println!(
        "{}",
        crate::report::format_day_lookup(args.date, summary.as_ref(), &ingest)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let summary = crate::io::summary::read_summary_json(&args.summary)?;

    let plot = crate::plot::render_temp_plot_from_summary(&summary, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        out: args.out,
        start: args.start,
        days: args.days,
        per_day: args.per_day,
        seed: args.seed,
        error_rate: args.error_rate,
    };
    let lines = crate::data::sample::write_sample_log(&config)?;

    println!(
        "Wrote {lines} lines of synthetic weather data to '{}'.",
        config.out.display()
    );
    Ok(())
}

/// Report a failed summary-file write without aborting the batch.
fn warn_on_failure(result: Result<(), AppError>) {
    if let Err(err) = result {
        eprintln!("warning: {err}");
    }
}

pub fn stats_config_from_args(args: &StatsArgs) -> StatsConfig {
    StatsConfig {
        input: args.input.clone(),
        year: args.year,
        exclude_months: args.exclude_months.clone(),
        top: args.top,
        summary_file: args.summary_file.clone(),
        export_csv: args.export.clone(),
        export_summary: args.export_summary.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `wstats` defaults to `wstats report`.
///
/// Rules:
/// - `wstats`                      -> `wstats report`
/// - `wstats -i data.txt ...`      -> `wstats report -i data.txt ...`
/// - `wstats --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "report" | "temps" | "mold" | "seasons" | "day" | "plot" | "sample"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
