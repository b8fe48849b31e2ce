//! Shared "simulate" pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parameters -> predictions -> heatmap -> plate shapes -> wafer profiles
//!
//! Output formatting lives in `report` and `plot`.

use crate::domain::{ParameterState, SimConfig, SimulationReport};
use crate::error::AppError;
use crate::models::predict_all;
use crate::profile::{PROFILE_SEGMENTS, all_cross_sections};
use crate::report::{heatmap_cells, plate_shapes};

/// Log advisory warnings for parameters outside their documented ranges.
pub fn warn_out_of_range(params: &ParameterState) {
    for warning in params.range_warnings() {
        log::warn!("{warning}");
    }
}

/// Execute the full simulation and return the computed outputs.
pub fn run_simulation(config: &SimConfig) -> Result<SimulationReport, AppError> {
    let params = config.params;
    warn_out_of_range(&params);

    let predictions = predict_all(&params);
    log::debug!("predictions: {predictions:?}");

    let heatmap = heatmap_cells(&predictions);
    let plates = plate_shapes(params.upper, params.lower);

    let profiles = all_cross_sections(config.variant, &params, PROFILE_SEGMENTS)?;
    log::debug!(
        "sampled {} profiles with the {} model",
        profiles.len(),
        config.variant.display_name()
    );

    Ok(SimulationReport {
        params,
        variant: config.variant,
        predictions,
        heatmap,
        plates,
        profiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Metric, ShapeClass, ThicknessVariant};

    #[test]
    fn simulation_collects_every_view() {
        let report = run_simulation(&SimConfig::default()).unwrap();
        assert_eq!(report.heatmap.len(), 50);
        assert_eq!(report.plates.upper.len(), 30);
        assert_eq!(report.profiles.len(), 3);
        assert_eq!(report.profiles[2].shape, ShapeClass::Concave);
        assert_eq!(report.profiles[0].points.len(), PROFILE_SEGMENTS + 1);
        assert_eq!(report.variant, ThicknessVariant::ShapePreserving);
        assert!((report.predictions.get(Metric::A) - 1.89426).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_parameters_still_simulate() {
        let config = SimConfig {
            params: ParameterState {
                upper: 120.0,
                lower: -1.0,
                upper_weight: 5.0,
                lower_weight: 0.0,
            },
            ..SimConfig::default()
        };
        let report = run_simulation(&config).unwrap();
        for (_, v) in report.predictions.iter() {
            assert!((1.0..=3.0).contains(&v));
        }
    }

    #[test]
    fn report_serializes_to_json() {
        let report = run_simulation(&SimConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "shape-preserving");
        assert_eq!(json["profiles"][0]["shape"], "convex");
        assert_eq!(json["heatmap"][0]["name"], "A1");
        assert!(json["predictions"]["e"].is_number());
    }
}
