//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the models
//! - prints text or JSON output

use clap::Parser;
use serde::Serialize;

use crate::cli::{Command, PredictArgs, ProfileArgs, SimulateArgs, SweepArgs};
use crate::domain::{OutputFormat, SimConfig};
use crate::error::{AppError, ErrorKind};

pub mod pipeline;

/// Entry point for the `dsp` binary.
pub fn run() -> Result<(), AppError> {
    // Environment overrides (DSP_VARIANT, DSP_FORMAT, RUST_LOG) may live in .env.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // We want `dsp` and `dsp -u 40` to behave like `dsp simulate ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Simulate(args) => handle_simulate(args),
        Command::Predict(args) => handle_predict(args),
        Command::Profile(args) => handle_profile(args),
        Command::Sweep(args) => handle_sweep(args),
    }
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = sim_config_from_args(&args);
    let report = pipeline::run_simulation(&config)?;

    if config.format == OutputFormat::Json {
        return print_json(&report);
    }

    println!("{}", crate::report::format_run_summary(&report, &config));
    if config.plot {
        println!(
            "{}",
            crate::plot::render_profile_plots(&report.profiles, config.plot_width, config.plot_height)
        );
    }
    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let state = args.params.state();
    pipeline::warn_out_of_range(&state);
    let predictions = crate::models::predict_all(&state);

    match (args.params.format, args.metric) {
        (OutputFormat::Json, Some(metric)) => print_json(&serde_json::json!({
            "metric": metric,
            "value": predictions.get(metric),
        })),
        (OutputFormat::Json, None) => print_json(&predictions),
        (OutputFormat::Text, Some(metric)) => {
            println!("{:.6}", predictions.get(metric));
            Ok(())
        }
        (OutputFormat::Text, None) => {
            print!("{}", crate::report::format_predictions(&predictions));
            Ok(())
        }
    }
}

fn handle_profile(args: ProfileArgs) -> Result<(), AppError> {
    let state = args.params.state();
    pipeline::warn_out_of_range(&state);
    let variant = args.params.variant;

    if args.radial {
        let samples = crate::profile::radial_profile(variant, args.shape, state.upper, state.lower, args.segments)?;
        return match args.params.format {
            OutputFormat::Json => print_json(&samples),
            OutputFormat::Text => {
                println!("{:>8} {:>12}", "radius", "thickness");
                for s in &samples {
                    println!("{:>8.3} {:>12.4}", s.radius, s.thickness);
                }
                Ok(())
            }
        };
    }

    let profile = crate::profile::cross_section(variant, args.shape, &state, args.segments)?;
    match args.params.format {
        OutputFormat::Json => print_json(&profile),
        OutputFormat::Text => {
            print!("{}", crate::report::format_profile_table(&profile));
            Ok(())
        }
    }
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let state = args.params.state();
    pipeline::warn_out_of_range(&state);
    let cells = crate::models::sweep(
        args.metric,
        state.lower_weight,
        state.upper_weight,
        args.upper_steps,
        args.lower_steps,
    )?;

    match args.params.format {
        OutputFormat::Json => print_json(&cells),
        OutputFormat::Text => {
            println!("Metric {} (weights: UPAC {:.1}x, LPAC {:.1}x)", args.metric, state.upper_weight, state.lower_weight);
            print!("{}", crate::report::format_sweep(&cells, args.lower_steps));
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(ErrorKind::Output, format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

pub fn sim_config_from_args(args: &SimulateArgs) -> SimConfig {
    SimConfig {
        params: args.params.state(),
        variant: args.params.variant,
        format: args.params.format,
        plot: !args.no_plot,
        color: !args.no_color,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `dsp` defaults to `dsp simulate`.
///
/// Rules:
/// - `dsp`                      -> `dsp simulate`
/// - `dsp -u 40 ...`            -> `dsp simulate -u 40 ...`
/// - `dsp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("simulate".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "simulate" | "predict" | "profile" | "sweep");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "simulate flags".
    if arg1.starts_with('-') {
        argv.insert(1, "simulate".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
