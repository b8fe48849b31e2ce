//! Least squares solver.
//!
//! Recalibrating the predictor means solving a small linear regression:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2,   x_i = [1, lower_i, upper_i]
//! ```
//!
//! We use SVD rather than QR because the design matrix is tall (many
//! observations, three columns) and nalgebra's `QR::solve` only handles square
//! systems.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() < x.ncols() || x.nrows() != y.len() {
        return None;
    }

    let svd = x.clone().svd(true, true);

    // A rank-deficient design (e.g. every observation at the same upper value)
    // would otherwise come back as a minimum-norm solution that looks valid.
    let max_sv = svd.singular_values.max();
    let min_sv = svd.singular_values.min();
    if !(max_sv > 0.0) || min_sv / max_sv < 1e-10 {
        return None;
    }

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
