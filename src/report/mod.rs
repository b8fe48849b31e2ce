//! Reporting utilities: heatmap cells, color gradient, plate shapes and
//! formatted terminal output.
//!
//! These are the presentation helpers built on top of the models. Keeping them
//! here means the model code stays free of display concerns.

use crate::domain::{HeatCell, LOWER_BOUNDS, Metric, PlateShapes, PredictionResult, Rgb, UPPER_BOUNDS};
use crate::models::PREDICTION_BOUNDS;

pub mod format;

pub use format::*;

/// Heatmap cells generated per metric.
pub const CELLS_PER_METRIC: usize = 10;

/// Positions in each plate-shape series.
pub const PLATE_POSITIONS: usize = 30;

const CELL_VARIATION: f64 = 0.25;
const CELL_PHASE_STEP: f64 = 0.3;

const GRADIENT_LOW: Rgb = Rgb { r: 255, g: 255, b: 255 };
const GRADIENT_HIGH: Rgb = Rgb { r: 220, g: 20, b: 60 };

/// Normalized parameter band in which a plate is drawn flat.
const NEUTRAL_BAND: (f64, f64) = (0.4, 0.6);

/// Plate-shape value at rest.
const PLATE_LEVEL: f64 = 2.0;

/// Map a prediction in `[1, 3]` onto the white-to-crimson gradient.
pub fn gradient_color(value: f64) -> Rgb {
    let span = PREDICTION_BOUNDS.max - PREDICTION_BOUNDS.min;
    let t = ((value - PREDICTION_BOUNDS.min) / span).clamp(0.0, 1.0);
    let t = if t.is_nan() { 0.0 } else { t };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb {
        r: lerp(GRADIENT_LOW.r, GRADIENT_HIGH.r),
        g: lerp(GRADIENT_LOW.g, GRADIENT_HIGH.g),
        b: lerp(GRADIENT_LOW.b, GRADIENT_HIGH.b),
    }
}

/// Expand five predictions into the 50-cell heatmap strip.
///
/// Each metric gets `CELLS_PER_METRIC` cells with a small sinusoidal variation
/// so neighbouring groups read as a continuous band.
pub fn heatmap_cells(predictions: &PredictionResult) -> Vec<HeatCell> {
    let mut out = Vec::with_capacity(Metric::ALL.len() * CELLS_PER_METRIC);
    for (metric, base) in predictions.iter() {
        for i in 0..CELLS_PER_METRIC {
            let phase = (metric.index() * CELLS_PER_METRIC + i) as f64 * CELL_PHASE_STEP;
            let value = (base + phase.sin() * CELL_VARIATION).clamp(PREDICTION_BOUNDS.min, PREDICTION_BOUNDS.max);
            out.push(HeatCell {
                name: format!("{}{}", metric.display_name(), i + 1),
                metric,
                value,
                color: gradient_color(value),
            });
        }
    }
    out
}

/// Upper and lower plate shape series for the current parameters.
pub fn plate_shapes(upper: f64, lower: f64) -> PlateShapes {
    let upper_norm = (upper - UPPER_BOUNDS.min) / (UPPER_BOUNDS.max - UPPER_BOUNDS.min);
    let lower_norm = (lower - LOWER_BOUNDS.min) / (LOWER_BOUNDS.max - LOWER_BOUNDS.min);
    let (lo, hi) = NEUTRAL_BAND;

    let positions = (0..PLATE_POSITIONS).map(|i| i as f64 / (PLATE_POSITIONS - 1) as f64);

    // Upper plate tilts: one side rises as the other falls.
    let upper_series = positions
        .clone()
        .map(|p| {
            if (lo..=hi).contains(&upper_norm) {
                PLATE_LEVEL
            } else if upper_norm < lo {
                PLATE_LEVEL + (lo - upper_norm) / lo * (1.0 - 2.0 * p)
            } else {
                PLATE_LEVEL + (upper_norm - hi) / (1.0 - hi) * (2.0 * p - 1.0)
            }
        })
        .collect();

    // Lower plate bows: edges move relative to the middle.
    let lower_series = positions
        .map(|p| {
            let bow = 4.0 * (p - 0.5) * (p - 0.5);
            if (lo..=hi).contains(&lower_norm) {
                PLATE_LEVEL
            } else if lower_norm < lo {
                PLATE_LEVEL + (lo - lower_norm) / lo * bow
            } else {
                PLATE_LEVEL - (lower_norm - hi) / (1.0 - hi) * bow
            }
        })
        .collect();

    PlateShapes {
        upper: upper_series,
        lower: lower_series,
    }
}
