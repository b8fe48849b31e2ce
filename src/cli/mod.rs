//! Command-line parsing for the UPAC/LPAC simulator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! model code. Selector flags (`--metric`, `--shape`, `--variant`) are parsed
//! into enums here, so an unknown name is rejected before any model runs.

use clap::{Args, Parser, Subcommand};

use crate::domain::{Metric, OutputFormat, ParameterState, ShapeClass, ThicknessVariant};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dsp", version, about = "DSP UPAC/LPAC simulator: metric predictions and wafer thickness profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full report: predictions, heatmap, plate shapes and the three wafer profiles.
    Simulate(SimulateArgs),
    /// Print the five metric predictions (or a single one).
    Predict(PredictArgs),
    /// Tabulate the thickness profile of one shape class.
    Profile(ProfileArgs),
    /// Evaluate one metric over a grid of UPAC/LPAC values.
    Sweep(SweepArgs),
}

/// Process parameters shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Upper pressure (UPAC), nominally 0..60.
    #[arg(short = 'u', long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub upper: f64,

    /// Lower pressure (LPAC), nominally 0.3..1.0.
    #[arg(short = 'l', long, default_value_t = 0.7, allow_negative_numbers = true)]
    pub lower: f64,

    /// UPAC sensitivity weight, nominally 0.1..2.0.
    #[arg(long, default_value_t = 1.1, allow_negative_numbers = true)]
    pub upper_weight: f64,

    /// LPAC sensitivity weight, nominally 0.1..2.0.
    #[arg(long, default_value_t = 1.1, allow_negative_numbers = true)]
    pub lower_weight: f64,

    /// Thickness model used for wafer profiles.
    #[arg(long, value_enum, env = "DSP_VARIANT", default_value_t = ThicknessVariant::ShapePreserving)]
    pub variant: ThicknessVariant,

    /// Output format.
    #[arg(long, value_enum, env = "DSP_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ParamArgs {
    pub fn state(&self) -> ParameterState {
        ParameterState {
            upper: self.upper,
            lower: self.lower,
            upper_weight: self.upper_weight,
            lower_weight: self.lower_weight,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Skip the ASCII profile plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Print the heatmap without ANSI colors.
    #[arg(long)]
    pub no_color: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 51)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Only print this metric.
    #[arg(short = 'm', long, value_enum)]
    pub metric: Option<Metric>,
}

#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Shape class to evaluate.
    #[arg(short = 's', long, value_enum)]
    pub shape: ShapeClass,

    /// Number of segments across the profile.
    #[arg(long, default_value_t = crate::profile::PROFILE_SEGMENTS)]
    pub segments: usize,

    /// Sample radius 0..1 (center to edge) instead of the full diameter.
    #[arg(long)]
    pub radial: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Metric to sweep.
    #[arg(short = 'm', long, value_enum, default_value_t = Metric::A)]
    pub metric: Metric,

    /// Grid points along UPAC (0..60).
    #[arg(long, default_value_t = 13)]
    pub upper_steps: usize,

    /// Grid points along LPAC (0.3..1.0).
    #[arg(long, default_value_t = 8)]
    pub lower_steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_start_up_state() {
        let cli = Cli::try_parse_from(["dsp", "predict"]).unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.params.state(), ParameterState::default());
        assert!(args.metric.is_none());
    }

    #[test]
    fn parses_profile_flags() {
        let cli = Cli::try_parse_from([
            "dsp", "profile", "--shape", "concave", "--variant", "additive", "-u", "40", "-l", "0.9",
        ])
        .unwrap();
        let Command::Profile(args) = cli.command else {
            panic!("expected profile");
        };
        assert_eq!(args.shape, ShapeClass::Concave);
        assert_eq!(args.params.variant, ThicknessVariant::Additive);
        assert_eq!(args.params.upper, 40.0);
        assert_eq!(args.params.lower, 0.9);
        assert_eq!(args.segments, 50);
    }

    #[test]
    fn rejects_unknown_selectors() {
        assert!(Cli::try_parse_from(["dsp", "predict", "--metric", "z"]).is_err());
        assert!(Cli::try_parse_from(["dsp", "profile", "--shape", "saddle"]).is_err());
    }
}
