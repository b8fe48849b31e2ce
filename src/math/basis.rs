//! Radial weighting functions and polynomial features for the thickness model.
//!
//! Every function takes a normalized radius `r` (0 = center, 1 = edge):
//!
//! - `center_decay(r, k) = exp(-k r²)` concentrates an effect near the center
//! - `edge_ramp(r) = r²` concentrates an effect near the edge
//! - the flat-shape components are smooth sin/cos modes over the radius
//!
//! The polynomial features are the full quadratic expansion of two normalized
//! inputs: `[1, u, l, u², u·l, l²]`.

use std::f64::consts::PI;

use nalgebra::SVector;

/// Number of quadratic polynomial features for two inputs.
pub const POLY_FEATURES: usize = 6;

/// Center-concentrated weight `exp(-k r²)`; equals 1 at the center.
pub fn center_decay(r: f64, k: f64) -> f64 {
    (-k * r * r).exp()
}

/// Edge-concentrated weight `r²`; equals 0 at the center and 1 at the edge.
pub fn edge_ramp(r: f64) -> f64 {
    r * r
}

/// Complement of [`edge_ramp`]: 1 at the center, 0 at the edge.
pub fn center_ramp(r: f64) -> f64 {
    1.0 - r * r
}

/// Edge weight for the convex shape, softened mid-radius.
pub fn convex_edge_weight(r: f64) -> f64 {
    edge_ramp(r) * (1.0 - 0.3 * (r * PI).sin())
}

/// Edge weight for the concave shape, boosted near the center of the ramp.
pub fn concave_edge_weight(r: f64) -> f64 {
    edge_ramp(r) * (1.0 + 0.2 * (r * PI).cos())
}

/// First flat-shape mode: a half-period bump with a small tilt.
pub fn flat_mode_pc2(r: f64) -> f64 {
    0.25 * (r * PI).sin() + 0.05 * (r - 0.5)
}

/// Second flat-shape mode: a full-period ripple on top of a slight edge rise.
pub fn flat_mode_pc3(r: f64) -> f64 {
    0.18 * (r * PI * 2.0).cos() + 0.1 * r * r
}

/// Quadratic feature vector `[1, u, l, u², u·l, l²]`.
pub fn quadratic_features(u: f64, l: f64) -> SVector<f64, POLY_FEATURES> {
    SVector::<f64, POLY_FEATURES>::from([1.0, u, l, u * u, u * l, l * l])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_at_center_and_edge() {
        assert_eq!(center_decay(0.0, 2.0), 1.0);
        assert!((center_decay(1.0, 2.0) - (-2.0f64).exp()).abs() < 1e-15);
        assert_eq!(edge_ramp(0.0), 0.0);
        assert_eq!(edge_ramp(1.0), 1.0);
        assert_eq!(center_ramp(0.0), 1.0);
        assert_eq!(center_ramp(1.0), 0.0);
    }

    #[test]
    fn shaped_edge_weights_vanish_at_center() {
        assert_eq!(convex_edge_weight(0.0), 0.0);
        assert_eq!(concave_edge_weight(0.0), 0.0);
        // sin(π) ~ 0 and cos(π) = -1 at the edge.
        assert!((convex_edge_weight(1.0) - 1.0).abs() < 1e-12);
        assert!((concave_edge_weight(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn flat_modes_are_finite_over_the_radius() {
        for i in 0..=50 {
            let r = i as f64 / 50.0;
            assert!(flat_mode_pc2(r).is_finite());
            assert!(flat_mode_pc3(r).is_finite());
        }
        assert!((flat_mode_pc2(0.0) + 0.025).abs() < 1e-12);
        assert!((flat_mode_pc3(0.0) - 0.18).abs() < 1e-12);
    }

    #[test]
    fn quadratic_features_layout() {
        let phi = quadratic_features(2.0, -3.0);
        assert_eq!(phi.as_slice(), &[1.0, 2.0, -3.0, 4.0, -6.0, 9.0]);
    }
}
