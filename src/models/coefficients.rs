//! Empirically derived constants for the predictor and thickness models.
//!
//! All tables are read-only and keyed by `Metric` / `ShapeClass` so the model
//! code never embeds a raw number. Recalibrating a model means replacing a
//! table here, not editing control flow.

use serde::{Deserialize, Serialize};

use crate::domain::{Bounds, Metric, ShapeClass};
use crate::math::POLY_FEATURES;

/// Upper pressure at which the thickness perturbation vanishes.
pub const REFERENCE_UPPER: f64 = 33.0;

/// Lower pressure at which the thickness perturbation vanishes.
pub const REFERENCE_LOWER: f64 = 0.85;

/// Every prediction is hard-clamped into this interval.
pub const PREDICTION_BOUNDS: Bounds = Bounds { min: 1.0, max: 3.0 };

/// `(intercept, lower_coef, upper_coef)` for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Coefficients {
    pub const fn new(intercept: f64, lower: f64, upper: f64) -> Self {
        Self {
            intercept,
            lower,
            upper,
        }
    }
}

/// Linear regression coefficients for all five metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    rows: [Coefficients; 5],
}

impl RegressionCoefficients {
    /// Rows are in `Metric::ALL` order.
    pub const fn from_rows(rows: [Coefficients; 5]) -> Self {
        Self { rows }
    }

    pub fn get(&self, metric: Metric) -> Coefficients {
        self.rows[metric.index()]
    }

    /// Copy of this table with one metric's row replaced.
    pub fn with(mut self, metric: Metric, coefficients: Coefficients) -> Self {
        self.rows[metric.index()] = coefficients;
        self
    }
}

impl Default for RegressionCoefficients {
    fn default() -> Self {
        PREDICTOR_COEFFICIENTS
    }
}

pub const PREDICTOR_COEFFICIENTS: RegressionCoefficients = RegressionCoefficients::from_rows([
    Coefficients::new(2.965, -2.962, 0.044),
    Coefficients::new(2.242, -0.586, 0.016),
    Coefficients::new(-0.091, 2.967, -0.005),
    Coefficients::new(2.831, -0.199, -0.021),
    Coefficients::new(4.143, -2.187, -0.030),
]);

/// Unperturbed thickness `center + curvature · r²` (µm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseCurve {
    pub center: f64,
    pub curvature: f64,
}

impl BaseCurve {
    pub fn at(self, r: f64) -> f64 {
        self.center + self.curvature * r * r
    }
}

/// Per-shape constants for the additive thickness model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdditiveShape {
    pub base: BaseCurve,
    /// µm per unit of `upper - REFERENCE_UPPER` at the center.
    pub center_scale: f64,
    /// µm per unit of `lower - REFERENCE_LOWER` at the edge.
    pub edge_scale: f64,
}

const ADDITIVE_CONVEX: AdditiveShape = AdditiveShape {
    base: BaseCurve { center: 774.2, curvature: -0.5 },
    center_scale: 0.02,
    edge_scale: 2.0,
};

const ADDITIVE_FLAT: AdditiveShape = AdditiveShape {
    base: BaseCurve { center: 774.0, curvature: 0.0 },
    center_scale: 0.01,
    edge_scale: 1.0,
};

const ADDITIVE_CONCAVE: AdditiveShape = AdditiveShape {
    base: BaseCurve { center: 773.8, curvature: 0.5 },
    center_scale: 0.02,
    edge_scale: 2.0,
};

pub fn additive_shape(shape: ShapeClass) -> &'static AdditiveShape {
    match shape {
        ShapeClass::Convex => &ADDITIVE_CONVEX,
        ShapeClass::Flat => &ADDITIVE_FLAT,
        ShapeClass::Concave => &ADDITIVE_CONCAVE,
    }
}

/// Divisor turning `upper - REFERENCE_UPPER` into the regression input `u`.
pub const UPPER_NORM: f64 = 15.0;

/// Divisor turning `lower - REFERENCE_LOWER` into the regression input `l`.
pub const LOWER_NORM: f64 = 0.25;

/// Per-shape constants for the shape-preserving thickness model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreservingShape {
    pub base: BaseCurve,
    /// PC2 regression row over `[1, u, l, u², u·l, l²]`.
    pub pc2: [f64; POLY_FEATURES],
    /// PC3 regression row over `[1, u, l, u², u·l, l²]`.
    pub pc3: [f64; POLY_FEATURES],
    /// Gain on the PC2 spatial term (unused by the flat modes).
    pub pc2_gain: f64,
    /// Gain on the PC3 spatial term (unused by the flat modes).
    pub pc3_gain: f64,
    /// Exponent `k` of the `exp(-k r²)` center weight.
    pub center_decay: f64,
    /// Final multiplier on the reconstructed perturbation.
    pub scale: f64,
}

const PRESERVING_CONVEX: PreservingShape = PreservingShape {
    base: BaseCurve { center: 774.5, curvature: -0.8 },
    pc2: [0.0, 0.3, 0.15, 0.05, 0.08, 0.02],
    pc3: [0.0, 0.2, -0.3, -0.01, 0.1, 0.04],
    pc2_gain: 0.3,
    pc3_gain: 0.2,
    center_decay: 2.0,
    scale: 3.0,
};

const PRESERVING_FLAT: PreservingShape = PreservingShape {
    base: BaseCurve { center: 774.0, curvature: 0.0 },
    pc2: [0.0, 0.35, 0.3, 0.05, 0.1, 0.02],
    pc3: [0.0, 0.2, -0.35, -0.03, 0.08, 0.05],
    pc2_gain: 1.0,
    pc3_gain: 1.0,
    center_decay: 0.0,
    scale: 1.0,
};

const PRESERVING_CONCAVE: PreservingShape = PreservingShape {
    base: BaseCurve { center: 773.5, curvature: 0.8 },
    pc2: [0.0, 0.2, 0.25, 0.01, 0.06, 0.03],
    pc3: [0.0, 0.1, -0.2, -0.005, 0.04, 0.06],
    pc2_gain: 0.25,
    pc3_gain: 0.3,
    center_decay: 1.5,
    scale: 3.0,
};

pub fn preserving_shape(shape: ShapeClass) -> &'static PreservingShape {
    match shape {
        ShapeClass::Convex => &PRESERVING_CONVEX,
        ShapeClass::Flat => &PRESERVING_FLAT,
        ShapeClass::Concave => &PRESERVING_CONCAVE,
    }
}

/// Limits applied by the shape-consistency guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardLimits {
    /// Radius splitting the "center" and "edge" regions of the first guard.
    pub core_radius: f64,
    /// Bound on the reconstructed perturbation (before scaling).
    pub reconstruction_bound: f64,
    /// Radius below which the final convex/concave guard applies.
    pub final_radius: f64,
    /// Bound on the final thickness delta for convex/concave.
    pub final_bound: f64,
    /// Band `(lo, hi)` in which the flat delta is clipped.
    pub flat_band: (f64, f64),
    /// Bound on the flat delta inside `flat_band`.
    pub flat_bound: f64,
}

pub const GUARD_LIMITS: GuardLimits = GuardLimits {
    core_radius: 0.3,
    reconstruction_bound: 0.1,
    final_radius: 0.4,
    final_bound: 0.3,
    flat_band: (0.3, 0.6),
    flat_bound: 0.25,
};
