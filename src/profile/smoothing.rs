//! Display smoothing for cross-section curves.
//!
//! Presentation only: the model functions never see smoothed values. Input is
//! a full-diameter profile (see `sampling`), so index `len / 2` is the center.

use crate::domain::ProfilePoint;

/// Radius below which the Gaussian pass applies.
const GAUSSIAN_RADIUS: f64 = 0.3;

/// Radius below which values are averaged with their mirror sample.
const SYMMETRY_RADIUS: f64 = 0.2;

const GAUSSIAN_SIGMA: f64 = 0.5;
const GAUSSIAN_HALF_WIDTH: usize = 2;

/// Gaussian-weighted average over ±2 samples for points near the center.
pub fn gaussian_core(values: &[f64], radii: &[f64]) -> Vec<f64> {
    let n = values.len();
    (0..n)
        .map(|i| {
            if radii[i] >= GAUSSIAN_RADIUS {
                return values[i];
            }
            let lo = i.saturating_sub(GAUSSIAN_HALF_WIDTH);
            let hi = (i + GAUSSIAN_HALF_WIDTH).min(n - 1);
            let (mut sum, mut total) = (0.0, 0.0);
            for (j, v) in values.iter().enumerate().take(hi + 1).skip(lo) {
                let d = j.abs_diff(i) as f64;
                let w = (-d * d / (2.0 * GAUSSIAN_SIGMA * GAUSSIAN_SIGMA)).exp();
                sum += v * w;
                total += w;
            }
            sum / total
        })
        .collect()
}

/// Average each near-center sample with its mirror across the center index.
pub fn symmetrize_core(values: &[f64], radii: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let center = (n - 1) / 2;
    (0..n)
        .map(|i| {
            if radii[i] >= SYMMETRY_RADIUS || i == center {
                return values[i];
            }
            let mirror = 2 * center as isize - i as isize;
            if mirror >= 0 && (mirror as usize) < n {
                (values[i] + values[mirror as usize]) / 2.0
            } else {
                values[i]
            }
        })
        .collect()
}

/// `[1, 2, 1] / 4` moving average; end points are kept.
pub fn moving_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    (0..n)
        .map(|i| {
            if i == 0 || i + 1 == n {
                values[i]
            } else {
                (values[i - 1] + 2.0 * values[i] + values[i + 1]) / 4.0
            }
        })
        .collect()
}

/// Smoothed reference curve (Gaussian core only).
pub fn smooth_reference(points: &[ProfilePoint]) -> Vec<f64> {
    let values: Vec<f64> = points.iter().map(|p| p.reference).collect();
    let radii: Vec<f64> = points.iter().map(|p| p.radius).collect();
    gaussian_core(&values, &radii)
}

/// Smoothed modified curve (Gaussian core, symmetrized core, moving average).
pub fn smooth_modified(points: &[ProfilePoint]) -> Vec<f64> {
    let values: Vec<f64> = points.iter().map(|p| p.modified).collect();
    let radii: Vec<f64> = points.iter().map(|p| p.radius).collect();
    let g = gaussian_core(&values, &radii);
    let s = symmetrize_core(&g, &radii);
    moving_average(&s)
}
