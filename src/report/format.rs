//! Plain-text formatting for terminal output.
//!
//! Everything here returns a `String`; printing is left to the caller so output
//! stays easy to snapshot in tests.

use crossterm::style::{Color, Stylize};

use crate::domain::{HeatCell, PlateShapes, PredictionResult, ShapeProfile, SimConfig, SimulationReport, SweepCell};
use crate::models::PREDICTION_BOUNDS;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format the full run summary (parameters + predictions + heatmap + plates).
pub fn format_run_summary(report: &SimulationReport, config: &SimConfig) -> String {
    let mut out = String::new();

    out.push_str("=== dsp - UPAC/LPAC simulator ===\n");
    out.push_str(&format_parameters(report));
    out.push('\n');

    out.push_str("Predictions:\n");
    out.push_str(&format_predictions(&report.predictions));
    out.push('\n');

    out.push_str("Heatmap:\n");
    out.push_str(&format_heatmap(&report.heatmap, config.color));
    out.push('\n');

    out.push_str(&format_plates(&report.plates));

    out
}

pub fn format_parameters(report: &SimulationReport) -> String {
    let p = &report.params;
    format!(
        "UPAC: {:.0} (weight {:.1}x) | LPAC: {:.2} (weight {:.1}x) | thickness model: {}\n",
        p.upper,
        p.upper_weight,
        p.lower,
        p.lower_weight,
        report.variant.display_name()
    )
}

/// One line per metric.
pub fn format_predictions(predictions: &PredictionResult) -> String {
    let mut out = String::new();
    for (metric, value) in predictions.iter() {
        out.push_str(&format!("  {metric}: {value:.3}\n"));
    }
    out
}

/// One colored block per heatmap cell, followed by the group labels.
pub fn format_heatmap(cells: &[HeatCell], color: bool) -> String {
    let mut strip = String::from("  ");
    let mut labels = String::from("  ");

    for cell in cells {
        if color {
            let c = Color::Rgb {
                r: cell.color.r,
                g: cell.color.g,
                b: cell.color.b,
            };
            strip.push_str(&format!("{}", "█".with(c)));
        } else {
            strip.push(spark(cell.value));
        }
        // Label the first cell of each group.
        if cell.name.ends_with('1') && cell.name.len() == 2 {
            labels.push_str(cell.metric.display_name());
        } else {
            labels.push(' ');
        }
    }

    format!("{strip}\n{}\n", labels.trim_end())
}

/// Sparklines for the upper and lower plate series.
pub fn format_plates(plates: &PlateShapes) -> String {
    let line = |values: &[f64]| values.iter().map(|&v| spark(v)).collect::<String>();
    format!(
        "Upper plate shape (UPAC): {}\nLower plate shape (LPAC): {}\n",
        line(&plates.upper),
        line(&plates.lower)
    )
}

/// Tabulate one cross-section.
pub fn format_profile_table(profile: &ShapeProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} reference shape\n", profile.shape.display_name()));
    out.push_str(
        format!(
            "{:>8} {:>8} {:>12} {:>12} {:>10}\n",
            "position", "radius", "reference", "modified", "delta"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<8} {:-<8} {:-<12} {:-<12} {:-<10}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for p in &profile.points {
        out.push_str(
            format!(
                "{:>8.3} {:>8.3} {:>12.4} {:>12.4} {:>10.4}\n",
                p.position,
                p.radius,
                p.reference,
                p.modified,
                p.modified - p.reference
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Grid of sweep values: rows are upper values, columns lower values.
pub fn format_sweep(cells: &[SweepCell], lower_steps: usize) -> String {
    let mut out = String::new();
    if cells.is_empty() || lower_steps == 0 {
        return out;
    }

    out.push_str(&format!("{:>8}", "up\\low"));
    for c in cells.iter().take(lower_steps) {
        out.push_str(&format!(" {:>6.2}", c.lower));
    }
    out.push('\n');

    for row in cells.chunks(lower_steps) {
        out.push_str(&format!("{:>8.1}", row[0].upper));
        for c in row {
            out.push_str(&format!(" {:>6.3}", c.value));
        }
        out.push('\n');
    }
    out
}

/// Map a value in `[1, 3]` to a block character.
fn spark(value: f64) -> char {
    let span = PREDICTION_BOUNDS.max - PREDICTION_BOUNDS.min;
    let t = ((value - PREDICTION_BOUNDS.min) / span).clamp(0.0, 1.0);
    let idx = (t * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
    SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
}
