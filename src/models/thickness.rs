//! Wafer thickness as a function of normalized radius.
//!
//! Two strategies are provided and selected with [`ThicknessVariant`]:
//!
//! - [`Additive`]: base curve + `(upper - 33)(1 - r²)` center term +
//!   `(lower - 0.85) r²` edge term. Unclamped.
//! - [`ShapePreserving`]: base curve + a PC2/PC3 polynomial perturbation
//!   weighted by shape-specific radial modes, followed by guards that keep a
//!   convex profile convex and a concave profile concave.
//!
//! Both are pure and total over finite inputs. Radius is not validated.

use nalgebra::SMatrix;

use crate::domain::{ShapeClass, ThicknessVariant};
use crate::math::{
    POLY_FEATURES, center_decay, center_ramp, concave_edge_weight, convex_edge_weight, edge_ramp,
    flat_mode_pc2, flat_mode_pc3, quadratic_features,
};
use crate::models::coefficients::{
    GUARD_LIMITS, LOWER_NORM, PreservingShape, REFERENCE_LOWER, REFERENCE_UPPER, UPPER_NORM,
    additive_shape, preserving_shape,
};

/// A thickness strategy.
pub trait ThicknessModel: Send + Sync {
    /// Thickness (µm) at the reference parameters.
    fn base(&self, radius: f64, shape: ShapeClass) -> f64;

    /// Thickness (µm) at `radius` for the given parameters.
    fn thickness(&self, radius: f64, shape: ShapeClass, upper: f64, lower: f64) -> f64;
}

/// Linear, center/edge weighted perturbation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

impl ThicknessModel for Additive {
    fn base(&self, radius: f64, shape: ShapeClass) -> f64 {
        additive_shape(shape).base.at(radius)
    }

    fn thickness(&self, radius: f64, shape: ShapeClass, upper: f64, lower: f64) -> f64 {
        let p = additive_shape(shape);
        let center_delta = p.center_scale * (upper - REFERENCE_UPPER) * center_ramp(radius);
        let edge_delta = p.edge_scale * (lower - REFERENCE_LOWER) * edge_ramp(radius);
        p.base.at(radius) + center_delta + edge_delta
    }
}

/// Polynomial perturbation with shape-consistency guards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapePreserving;

impl ShapePreserving {
    /// `(PC2, PC3)` for the given shape and raw parameters.
    pub fn components(shape: ShapeClass, upper: f64, lower: f64) -> (f64, f64) {
        let p = preserving_shape(shape);
        let u = (upper - REFERENCE_UPPER) / UPPER_NORM;
        let l = (lower - REFERENCE_LOWER) / LOWER_NORM;

        let rows = SMatrix::<f64, 2, POLY_FEATURES>::from_fn(|i, j| if i == 0 { p.pc2[j] } else { p.pc3[j] });
        let pcs = rows * quadratic_features(u, l);
        (pcs[0], pcs[1])
    }

    /// Radial reconstruction of the perturbation, before scaling.
    ///
    /// For convex/concave the result is already bounded on the side that
    /// would invert the shape.
    fn reconstruct(shape: ShapeClass, p: &PreservingShape, r: f64, pc2: f64, pc3: f64) -> f64 {
        let g = GUARD_LIMITS;
        match shape {
            ShapeClass::Convex => {
                let rec = p.pc2_gain * pc2 * center_decay(r, p.center_decay)
                    + p.pc3_gain * pc3 * convex_edge_weight(r);
                if r < g.core_radius {
                    rec.max(-g.reconstruction_bound)
                } else {
                    rec.min(g.reconstruction_bound)
                }
            }
            ShapeClass::Flat => pc2 * flat_mode_pc2(r) + pc3 * flat_mode_pc3(r),
            ShapeClass::Concave => {
                let rec = p.pc2_gain * pc2 * center_decay(r, p.center_decay)
                    + p.pc3_gain * pc3 * concave_edge_weight(r);
                if r < g.core_radius {
                    rec.min(g.reconstruction_bound)
                } else {
                    rec.max(-g.reconstruction_bound)
                }
            }
        }
    }

    /// Final clip of `thickness` relative to `base`.
    fn guard(shape: ShapeClass, r: f64, base: f64, thickness: f64) -> f64 {
        let g = GUARD_LIMITS;
        let delta = thickness - base;
        match shape {
            ShapeClass::Flat if r > g.flat_band.0 && r < g.flat_band.1 => {
                if delta > g.flat_bound {
                    base + g.flat_bound
                } else if delta < -g.flat_bound {
                    base - g.flat_bound
                } else {
                    thickness
                }
            }
            ShapeClass::Convex if r < g.final_radius && delta < -g.final_bound => base - g.final_bound,
            ShapeClass::Concave if r < g.final_radius && delta > g.final_bound => base + g.final_bound,
            _ => thickness,
        }
    }
}

impl ThicknessModel for ShapePreserving {
    fn base(&self, radius: f64, shape: ShapeClass) -> f64 {
        preserving_shape(shape).base.at(radius)
    }

    fn thickness(&self, radius: f64, shape: ShapeClass, upper: f64, lower: f64) -> f64 {
        let p = preserving_shape(shape);
        let base = p.base.at(radius);
        let (pc2, pc3) = Self::components(shape, upper, lower);
        let delta = Self::reconstruct(shape, p, radius, pc2, pc3) * p.scale;
        Self::guard(shape, radius, base, base + delta)
    }
}

impl ThicknessVariant {
    pub fn model(self) -> &'static dyn ThicknessModel {
        match self {
            ThicknessVariant::Additive => &Additive,
            ThicknessVariant::ShapePreserving => &ShapePreserving,
        }
    }

    pub fn thickness(self, radius: f64, shape: ShapeClass, upper: f64, lower: f64) -> f64 {
        self.model().thickness(radius, shape, upper, lower)
    }

    pub fn base(self, radius: f64, shape: ShapeClass) -> f64 {
        self.model().base(radius, shape)
    }
}

/// Thickness with the default (shape-preserving) strategy.
pub fn thickness(radius: f64, shape: ShapeClass, upper: f64, lower: f64) -> f64 {
    ThicknessVariant::default().thickness(radius, shape, upper, lower)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const VARIANTS: [ThicknessVariant; 2] = [ThicknessVariant::Additive, ThicknessVariant::ShapePreserving];

    fn radii() -> impl Iterator<Item = f64> {
        (0..=50).map(|i| i as f64 / 50.0)
    }

    #[test]
    fn additive_flat_center_at_reference_is_exact() {
        let t = ThicknessVariant::Additive.thickness(0.0, ShapeClass::Flat, 33.0, 0.85);
        assert_eq!(t, 774.0);
    }

    #[test]
    fn reference_inputs_give_base_curve() {
        for variant in VARIANTS {
            for shape in ShapeClass::ALL {
                for r in radii() {
                    let t = variant.thickness(r, shape, REFERENCE_UPPER, REFERENCE_LOWER);
                    assert!((t - variant.base(r, shape)).abs() < 1e-12, "{variant:?} {shape} r={r}");
                }
            }
        }
    }

    #[test]
    fn convex_is_non_increasing_at_reference() {
        for variant in VARIANTS {
            let mut prev = f64::INFINITY;
            for r in radii() {
                let t = variant.thickness(r, ShapeClass::Convex, 33.0, 0.85);
                assert!(t <= prev, "{variant:?}: t({r})={t} > {prev}");
                prev = t;
            }
        }
    }

    #[test]
    fn base_curves_match_shape_families() {
        let a = ThicknessVariant::Additive;
        assert_eq!(a.base(0.0, ShapeClass::Convex), 774.2);
        assert!((a.base(1.0, ShapeClass::Convex) - 773.7).abs() < 1e-12);
        assert!((a.base(1.0, ShapeClass::Concave) - 774.3).abs() < 1e-12);

        let b = ThicknessVariant::ShapePreserving;
        assert_eq!(b.base(0.0, ShapeClass::Convex), 774.5);
        assert!((b.base(1.0, ShapeClass::Convex) - 773.7).abs() < 1e-12);
        assert_eq!(b.base(0.0, ShapeClass::Concave), 773.5);
        assert_eq!(b.base(0.7, ShapeClass::Flat), 774.0);
    }

    #[test]
    fn additive_upper_acts_at_center_lower_at_edge() {
        let a = ThicknessVariant::Additive;
        let shape = ShapeClass::Convex;
        // Upper only moves the center.
        let center_shift = a.thickness(0.0, shape, 43.0, 0.85) - a.base(0.0, shape);
        let edge_shift = a.thickness(1.0, shape, 43.0, 0.85) - a.base(1.0, shape);
        assert!((center_shift - 0.2).abs() < 1e-9);
        assert!(edge_shift.abs() < 1e-12);
        // Lower only moves the edge.
        let center_shift = a.thickness(0.0, shape, 33.0, 0.95) - a.base(0.0, shape);
        let edge_shift = a.thickness(1.0, shape, 33.0, 0.95) - a.base(1.0, shape);
        assert!(center_shift.abs() < 1e-12);
        assert!((edge_shift - 0.2).abs() < 1e-9);
    }

    #[test]
    fn additive_is_unclamped() {
        let t = ThicknessVariant::Additive.thickness(0.0, ShapeClass::Convex, 1_000.0, 0.85);
        assert!(t > 774.2 + 19.0);
    }

    #[test]
    fn components_vanish_at_reference() {
        for shape in ShapeClass::ALL {
            let (pc2, pc3) = ShapePreserving::components(shape, 33.0, 0.85);
            assert_eq!(pc2, 0.0);
            assert_eq!(pc3, 0.0);
        }
    }

    #[test]
    fn components_follow_polynomial_rows() {
        // u = 1, l = 1 => φ = [1, 1, 1, 1, 1, 1], so PC = row sum.
        let (pc2, pc3) = ShapePreserving::components(ShapeClass::Convex, 48.0, 1.1);
        assert!((pc2 - 0.6).abs() < 1e-12);
        assert!((pc3 - 0.03).abs() < 1e-12);
    }

    #[test]
    fn shape_preserving_convex_center_never_below_edge() {
        let mut rng = StdRng::seed_from_u64(11);
        let v = ThicknessVariant::ShapePreserving;
        for _ in 0..5_000 {
            let upper = rng.gen_range(-200.0..260.0);
            let lower = rng.gen_range(-5.0..5.0);
            let center = v.thickness(0.0, ShapeClass::Convex, upper, lower);
            let edge = v.thickness(1.0, ShapeClass::Convex, upper, lower);
            assert!(center >= edge, "upper={upper} lower={lower}: {center} < {edge}");
        }
    }

    #[test]
    fn shape_preserving_concave_center_never_above_edge() {
        let mut rng = StdRng::seed_from_u64(13);
        let v = ThicknessVariant::ShapePreserving;
        for _ in 0..5_000 {
            let upper = rng.gen_range(-200.0..260.0);
            let lower = rng.gen_range(-5.0..5.0);
            let center = v.thickness(0.0, ShapeClass::Concave, upper, lower);
            let edge = v.thickness(1.0, ShapeClass::Concave, upper, lower);
            assert!(center <= edge, "upper={upper} lower={lower}: {center} > {edge}");
        }
    }

    #[test]
    fn shape_preserving_convex_extremes_within_slider_ranges() {
        let v = ThicknessVariant::ShapePreserving;
        for &upper in &[0.0, 15.0, 33.0, 45.0, 60.0] {
            for &lower in &[0.3, 0.5, 0.85, 1.0] {
                let center = v.thickness(0.0, ShapeClass::Convex, upper, lower);
                let edge = v.thickness(1.0, ShapeClass::Convex, upper, lower);
                assert!(center >= edge);
            }
        }
    }

    #[test]
    fn flat_delta_is_clipped_in_middle_band() {
        let v = ThicknessVariant::ShapePreserving;
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..2_000 {
            let upper = rng.gen_range(-100.0..160.0);
            let lower = rng.gen_range(-2.0..3.0);
            let r = rng.gen_range(0.301..0.599);
            let t = v.thickness(r, ShapeClass::Flat, upper, lower);
            assert!((t - 774.0).abs() <= 0.25 + 1e-9, "r={r} t={t}");
        }
    }

    #[test]
    fn convex_core_floor_holds() {
        let v = ThicknessVariant::ShapePreserving;
        for (upper, lower) in [(0.0, 0.3), (3.0, 0.35), (60.0, -1.5), (-150.0, 0.85)] {
            for r in [0.0, 0.1, 0.2, 0.29, 0.35] {
                let t = v.thickness(r, ShapeClass::Convex, upper, lower);
                assert!(t - v.base(r, ShapeClass::Convex) >= -0.3 - 1e-9, "r={r} upper={upper}");
            }
        }
    }

    #[test]
    fn concave_core_ceiling_holds() {
        let v = ThicknessVariant::ShapePreserving;
        for (upper, lower) in [(60.0, 1.0), (200.0, 2.0), (0.0, 3.0), (-80.0, 0.3)] {
            for r in [0.0, 0.1, 0.2, 0.29, 0.35] {
                let t = v.thickness(r, ShapeClass::Concave, upper, lower);
                assert!(t - v.base(r, ShapeClass::Concave) <= 0.3 + 1e-9, "r={r} upper={upper}");
            }
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        for variant in VARIANTS {
            for shape in ShapeClass::ALL {
                let a = variant.thickness(0.37, shape, 51.0, 0.42);
                let b = variant.thickness(0.37, shape, 51.0, 0.42);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn finite_for_finite_inputs() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..2_000 {
            let r = rng.gen_range(-1.0..2.0);
            let upper = rng.gen_range(-1e4..1e4);
            let lower = rng.gen_range(-1e2..1e2);
            for variant in VARIANTS {
                for shape in ShapeClass::ALL {
                    assert!(variant.thickness(r, shape, upper, lower).is_finite());
                }
            }
        }
    }

    #[test]
    fn free_function_uses_shape_preserving() {
        let t = thickness(0.5, ShapeClass::Concave, 20.0, 0.6);
        assert_eq!(t, ShapePreserving.thickness(0.5, ShapeClass::Concave, 20.0, 0.6));
    }
}
