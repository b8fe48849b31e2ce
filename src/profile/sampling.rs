//! Fixed-resolution sampling of thickness profiles.
//!
//! A cross-section runs across the full diameter: position `i / segments` for
//! `i = 0..=segments`, mapped to radius `|position - 0.5| · 2`. With the default
//! 50 segments, sample 25 is the center and samples 0 and 50 are the edges.

use rayon::prelude::*;

use crate::domain::{ParameterState, ProfilePoint, ShapeClass, ShapeProfile, ThicknessSample, ThicknessVariant};
use crate::error::{AppError, ErrorKind};
use crate::models::{REFERENCE_LOWER, REFERENCE_UPPER};

/// Default number of segments per profile.
pub const PROFILE_SEGMENTS: usize = 50;

fn check_segments(segments: usize) -> Result<(), AppError> {
    if segments < 2 {
        return Err(AppError::new(
            ErrorKind::InvalidInput,
            "Profile resolution must be >= 2 segments.",
        ));
    }
    Ok(())
}

/// Radius for a position along the diameter.
pub fn position_to_radius(position: f64) -> f64 {
    (position - 0.5).abs() * 2.0
}

/// Thickness at `r = i / segments` for `i = 0..=segments` (center to edge).
pub fn radial_profile(
    variant: ThicknessVariant,
    shape: ShapeClass,
    upper: f64,
    lower: f64,
    segments: usize,
) -> Result<Vec<ThicknessSample>, AppError> {
    check_segments(segments)?;
    Ok((0..=segments)
        .map(|i| {
            let radius = i as f64 / segments as f64;
            ThicknessSample {
                radius,
                thickness: variant.thickness(radius, shape, upper, lower),
            }
        })
        .collect())
}

/// Reference and modified thickness across the full diameter.
pub fn cross_section(
    variant: ThicknessVariant,
    shape: ShapeClass,
    params: &ParameterState,
    segments: usize,
) -> Result<ShapeProfile, AppError> {
    check_segments(segments)?;
    let points = (0..=segments)
        .map(|i| {
            let position = i as f64 / segments as f64;
            let radius = position_to_radius(position);
            ProfilePoint {
                position,
                radius,
                reference: variant.thickness(radius, shape, REFERENCE_UPPER, REFERENCE_LOWER),
                modified: variant.thickness(radius, shape, params.upper, params.lower),
            }
        })
        .collect();
    Ok(ShapeProfile { shape, points })
}

/// Cross-sections for all three shape classes, in `ShapeClass::ALL` order.
pub fn all_cross_sections(
    variant: ThicknessVariant,
    params: &ParameterState,
    segments: usize,
) -> Result<Vec<ShapeProfile>, AppError> {
    ShapeClass::ALL
        .par_iter()
        .map(|&shape| cross_section(variant, shape, params, segments))
        .collect()
}
