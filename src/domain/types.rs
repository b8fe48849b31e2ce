//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed by value into the pure model functions
//! - printed as text reports or JSON
//! - selected directly from CLI flags (`ValueEnum`)

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Closed interval used to document parameter ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Evenly spaced points from `min` to `max` inclusive.
    pub fn linspace(self, steps: usize) -> Vec<f64> {
        if steps < 2 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (steps as f64 - 1.0);
        (0..steps).map(|i| self.min + step * i as f64).collect()
    }
}

/// Upper pressure (UPAC) slider range.
pub const UPPER_BOUNDS: Bounds = Bounds { min: 0.0, max: 60.0 };

/// Lower pressure (LPAC) slider range.
pub const LOWER_BOUNDS: Bounds = Bounds { min: 0.3, max: 1.0 };

/// Range shared by both sensitivity weights.
pub const WEIGHT_BOUNDS: Bounds = Bounds { min: 0.1, max: 2.0 };

/// One of the five predicted output metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    A,
    B,
    C,
    D,
    E,
}

impl Metric {
    pub const ALL: [Metric; 5] = [Metric::A, Metric::B, Metric::C, Metric::D, Metric::E];

    /// Position in [`Metric::ALL`].
    pub fn index(self) -> usize {
        match self {
            Metric::A => 0,
            Metric::B => 1,
            Metric::C => 2,
            Metric::D => 3,
            Metric::E => 4,
        }
    }

    /// Upper-case label used for heatmap cells.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::A => "A",
            Metric::B => "B",
            Metric::C => "C",
            Metric::D => "D",
            Metric::E => "E",
        }
    }
}

impl FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Metric::A),
            "b" => Ok(Metric::B),
            "c" => Ok(Metric::C),
            "d" => Ok(Metric::D),
            "e" => Ok(Metric::E),
            _ => Err(AppError::unknown_metric(s)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Qualitative cross-section family of the wafer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    /// Thick center, thin edge.
    Convex,
    Flat,
    /// Thin center, thick edge.
    Concave,
}

impl ShapeClass {
    pub const ALL: [ShapeClass; 3] = [ShapeClass::Convex, ShapeClass::Flat, ShapeClass::Concave];

    pub fn display_name(self) -> &'static str {
        match self {
            ShapeClass::Convex => "Convex",
            ShapeClass::Flat => "Flat",
            ShapeClass::Concave => "Concave",
        }
    }
}

impl FromStr for ShapeClass {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "convex" => Ok(ShapeClass::Convex),
            "flat" => Ok(ShapeClass::Flat),
            "concave" => Ok(ShapeClass::Concave),
            _ => Err(AppError::unknown_shape(s)),
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which thickness model to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ThicknessVariant {
    /// Base curve plus center/edge weighted linear deltas, unclamped.
    Additive,
    /// Polynomial PC2/PC3 perturbation with shape-consistency guards.
    #[default]
    ShapePreserving,
}

impl ThicknessVariant {
    pub fn display_name(self) -> &'static str {
        match self {
            ThicknessVariant::Additive => "additive",
            ThicknessVariant::ShapePreserving => "shape-preserving",
        }
    }
}

/// Output format for the `dsp` binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Snapshot of the two process parameters and their weights.
///
/// The model functions never mutate this; they read copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    pub upper: f64,
    pub lower: f64,
    pub upper_weight: f64,
    pub lower_weight: f64,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            upper: 25.0,
            lower: 0.7,
            upper_weight: 1.1,
            lower_weight: 1.1,
        }
    }
}

impl ParameterState {
    /// Values outside the documented ranges.
    ///
    /// Out-of-range values are still evaluated; this list is advisory only.
    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        let checks = [
            ("upper", self.upper, UPPER_BOUNDS),
            ("lower", self.lower, LOWER_BOUNDS),
            ("upper_weight", self.upper_weight, WEIGHT_BOUNDS),
            ("lower_weight", self.lower_weight, WEIGHT_BOUNDS),
        ];
        checks
            .into_iter()
            .filter(|(_, value, bounds)| !bounds.contains(*value))
            .map(|(name, value, bounds)| RangeWarning { name, value, bounds })
            .collect()
    }
}

/// A parameter outside its documented range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeWarning {
    pub name: &'static str,
    pub value: f64,
    pub bounds: Bounds,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} is outside [{}, {}]; result is numerically defined but not physically meaningful",
            self.name, self.value, self.bounds.min, self.bounds.max
        )
    }
}

/// Clamped predictions for all five metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl PredictionResult {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::A => self.a,
            Metric::B => self.b,
            Metric::C => self.c,
            Metric::D => self.d,
            Metric::E => self.e,
        }
    }

    /// `(metric, value)` pairs in `Metric::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// A single point on a thickness profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessSample {
    /// Normalized distance from center (0) to edge (1).
    pub radius: f64,
    /// Thickness in µm.
    pub thickness: f64,
}

/// A point on a full-diameter cross-section.
///
/// `reference` is evaluated at the reference parameters (33.0, 0.85) and
/// `modified` at the current ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Position along the diameter, 0 = left edge, 1 = right edge.
    pub position: f64,
    pub radius: f64,
    pub reference: f64,
    pub modified: f64,
}

/// Reference and modified cross-section for one shape class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeProfile {
    pub shape: ShapeClass,
    pub points: Vec<ProfilePoint>,
}

/// One cell of the extended heatmap strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub name: String,
    pub metric: Metric,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Upper and lower plate shape series (30 positions each).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateShapes {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// One cell of a predictor sensitivity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    pub upper: f64,
    pub lower: f64,
    pub value: f64,
}

/// A run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub params: ParameterState,
    pub variant: ThicknessVariant,
    pub format: OutputFormat,
    pub plot: bool,
    pub color: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            params: ParameterState::default(),
            variant: ThicknessVariant::default(),
            format: OutputFormat::default(),
            plot: true,
            color: true,
            plot_width: 51,
            plot_height: 12,
        }
    }
}

/// Everything computed for a single `dsp simulate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub params: ParameterState,
    pub variant: ThicknessVariant,
    pub predictions: PredictionResult,
    pub heatmap: Vec<HeatCell>,
    pub plates: PlateShapes,
    pub profiles: Vec<ShapeProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn metric_parse_is_case_insensitive() {
        assert_eq!("A".parse::<Metric>().unwrap(), Metric::A);
        assert_eq!(" e ".parse::<Metric>().unwrap(), Metric::E);
    }

    #[test]
    fn unknown_metric_fails_fast() {
        let err = "f".parse::<Metric>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMetric);
    }

    #[test]
    fn unknown_shape_fails_fast() {
        let err = "saddle".parse::<ShapeClass>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShapeClass);
        assert_eq!("Concave".parse::<ShapeClass>().unwrap(), ShapeClass::Concave);
    }

    #[test]
    fn default_state_is_in_range() {
        assert!(ParameterState::default().range_warnings().is_empty());
    }

    #[test]
    fn range_warnings_flag_each_offender() {
        let state = ParameterState {
            upper: 75.0,
            lower: 0.85,
            upper_weight: 1.0,
            lower_weight: 0.0,
        };
        let names: Vec<&str> = state.range_warnings().iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["upper", "lower_weight"]);
    }

    #[test]
    fn linspace_includes_endpoints() {
        let v = LOWER_BOUNDS.linspace(8);
        assert_eq!(v.len(), 8);
        assert!((v[0] - 0.3).abs() < 1e-12);
        assert!((v[7] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prediction_result_iterates_in_metric_order() {
        let p = PredictionResult { a: 1.0, b: 1.5, c: 2.0, d: 2.5, e: 3.0 };
        let values: Vec<f64> = p.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }
}
