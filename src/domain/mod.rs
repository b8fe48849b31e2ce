//! Domain types used throughout the simulator.
//!
//! This module defines:
//!
//! - selector enums (`Metric`, `ShapeClass`, `ThicknessVariant`, `OutputFormat`)
//! - the parameter snapshot (`ParameterState`) and its documented ranges
//! - model outputs (`PredictionResult`, `ThicknessSample`, `ShapeProfile`, etc.)

pub mod types;

pub use types::*;
