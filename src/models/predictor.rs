//! Linear-regression predictor for the five output metrics.
//!
//! ```text
//! y = clamp(b0 + b1 · lower · lower_weight + b2 · upper · upper_weight, 1, 3)
//! ```
//!
//! The clamp is hard: inputs are never validated, but the output always lies
//! in `[1, 3]`.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{LOWER_BOUNDS, Metric, ParameterState, PredictionResult, SweepCell, UPPER_BOUNDS};
use crate::error::{AppError, ErrorKind};
use crate::math::solve_least_squares;
use crate::models::coefficients::{Coefficients, PREDICTION_BOUNDS, PREDICTOR_COEFFICIENTS, RegressionCoefficients};

impl Coefficients {
    /// Unclamped linear response.
    pub fn raw(&self, lower: f64, upper: f64, lower_weight: f64, upper_weight: f64) -> f64 {
        self.intercept + self.lower * lower * lower_weight + self.upper * upper * upper_weight
    }
}

impl RegressionCoefficients {
    pub fn predict(
        &self,
        lower: f64,
        upper: f64,
        lower_weight: f64,
        upper_weight: f64,
        metric: Metric,
    ) -> f64 {
        let raw = self.get(metric).raw(lower, upper, lower_weight, upper_weight);
        // Not f64::clamp: that passes NaN through, min/max never leave the bounds.
        PREDICTION_BOUNDS.max.min(raw).max(PREDICTION_BOUNDS.min)
    }

    pub fn predict_all(&self, state: &ParameterState) -> PredictionResult {
        let p = |metric| {
            self.predict(
                state.lower,
                state.upper,
                state.lower_weight,
                state.upper_weight,
                metric,
            )
        };
        PredictionResult {
            a: p(Metric::A),
            b: p(Metric::B),
            c: p(Metric::C),
            d: p(Metric::D),
            e: p(Metric::E),
        }
    }
}

/// Predict one metric with the built-in coefficient table.
pub fn predict(lower: f64, upper: f64, lower_weight: f64, upper_weight: f64, metric: Metric) -> f64 {
    PREDICTOR_COEFFICIENTS.predict(lower, upper, lower_weight, upper_weight, metric)
}

/// Predict a metric selected by name (`"a"`..`"e"`).
///
/// Unknown names fail with [`ErrorKind::InvalidMetric`].
pub fn predict_named(
    lower: f64,
    upper: f64,
    lower_weight: f64,
    upper_weight: f64,
    metric: &str,
) -> Result<f64, AppError> {
    let metric: Metric = metric.parse()?;
    Ok(predict(lower, upper, lower_weight, upper_weight, metric))
}

/// Predict all five metrics with the built-in coefficient table.
pub fn predict_all(state: &ParameterState) -> PredictionResult {
    PREDICTOR_COEFFICIENTS.predict_all(state)
}

/// A measured response used for recalibration.
///
/// `lower` and `upper` are the raw (unweighted) parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub lower: f64,
    pub upper: f64,
    pub value: f64,
}

/// Re-estimate one metric's coefficients by least squares.
pub fn calibrate(observations: &[Observation]) -> Result<Coefficients, AppError> {
    if observations.len() < 3 {
        return Err(AppError::new(
            ErrorKind::Calibration,
            format!(
                "Need at least 3 observations to calibrate, got {}.",
                observations.len()
            ),
        ));
    }
    if observations
        .iter()
        .any(|o| !(o.lower.is_finite() && o.upper.is_finite() && o.value.is_finite()))
    {
        return Err(AppError::new(
            ErrorKind::Calibration,
            "Calibration observations must be finite.",
        ));
    }

    let n = observations.len();
    let x = DMatrix::from_fn(n, 3, |i, j| match j {
        0 => 1.0,
        1 => observations[i].lower,
        _ => observations[i].upper,
    });
    let y = DVector::from_iterator(n, observations.iter().map(|o| o.value));

    let beta = solve_least_squares(&x, &y).ok_or_else(|| {
        AppError::new(
            ErrorKind::Calibration,
            "Calibration design is singular (vary both lower and upper).",
        )
    })?;

    log::debug!(
        "calibrated coefficients from {n} observations: [{:.6}, {:.6}, {:.6}]",
        beta[0],
        beta[1],
        beta[2]
    );

    Ok(Coefficients::new(beta[0], beta[1], beta[2]))
}

/// Evaluate `metric` over an evenly spaced grid of the documented ranges.
///
/// Cells are row-major: one row per upper value, lower varying fastest.
pub fn sweep(
    metric: Metric,
    lower_weight: f64,
    upper_weight: f64,
    upper_steps: usize,
    lower_steps: usize,
) -> Result<Vec<SweepCell>, AppError> {
    if upper_steps < 2 || lower_steps < 2 {
        return Err(AppError::new(
            ErrorKind::InvalidInput,
            "Sweep steps must be >= 2 on both axes.",
        ));
    }

    let uppers = UPPER_BOUNDS.linspace(upper_steps);
    let lowers = LOWER_BOUNDS.linspace(lower_steps);

    let rows: Vec<Vec<SweepCell>> = uppers
        .par_iter()
        .map(|&upper| {
            lowers
                .iter()
                .map(|&lower| SweepCell {
                    upper,
                    lower,
                    value: predict(lower, upper, lower_weight, upper_weight, metric),
                })
                .collect()
        })
        .collect();

    Ok(rows.into_iter().flatten().collect())
}
