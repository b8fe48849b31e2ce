//! ASCII plotting of wafer cross-sections for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of the three shape classes
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - modified profile (current parameters): `*`
//! - reference profile (33.0 / 0.85): `.`, only where `*` is not drawn

use crate::domain::ShapeProfile;
use crate::profile::{smooth_modified, smooth_reference};

/// Render one cross-section with its reference curve.
pub fn render_profile_plot(profile: &ShapeProfile, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let positions: Vec<f64> = profile.points.iter().map(|p| p.position).collect();
    let reference: Vec<(f64, f64)> = positions.iter().copied().zip(smooth_reference(&profile.points)).collect();
    let modified: Vec<(f64, f64)> = positions.iter().copied().zip(smooth_modified(&profile.points)).collect();

    let (y_min, y_max) = y_range(&[&reference, &modified]);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Modified first so the reference only fills the gaps.
    draw_curve(&mut grid, &modified, y_min, y_max, '*');
    draw_curve(&mut grid, &reference, y_min, y_max, '.');

    let mut out = String::new();
    out.push_str(&format!(
        "{} reference shape: thickness=[{y_min:.2}, {y_max:.2}] µm\n",
        profile.shape.display_name()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Render all profiles one after another.
pub fn render_profile_plots(profiles: &[ShapeProfile], width: usize, height: usize) -> String {
    profiles
        .iter()
        .map(|p| render_profile_plot(p, width, height))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Y-range over all curves; a flat curve gets a ±0.5 window around its level.
fn y_range(curves: &[&[(f64, f64)]]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for curve in curves {
        for &(_, y) in curve.iter() {
            if y.is_finite() {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return (0.0, 1.0);
    }
    if max_y - min_y < 1e-9 {
        let mid = 0.5 * (min_y + max_y);
        return (mid - 0.5, mid + 0.5);
    }
    (min_y, max_y)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = x.clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], y_min: f64, y_max: f64, ch: char) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let xx = map_x(x, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, ch);
        } else if grid[yy][xx] == ' ' {
            grid[yy][xx] = ch;
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParameterState, ShapeClass, ThicknessVariant};
    use crate::models::{REFERENCE_LOWER, REFERENCE_UPPER};
    use crate::profile::cross_section;

    #[test]
    fn plot_golden_snapshot_flat_reference() {
        let params = ParameterState {
            upper: REFERENCE_UPPER,
            lower: REFERENCE_LOWER,
            ..ParameterState::default()
        };
        let profile = cross_section(ThicknessVariant::Additive, ShapeClass::Flat, &params, 10).unwrap();

        let txt = render_profile_plot(&profile, 10, 5);
        let expected = concat!(
            "Flat reference shape: thickness=[773.45, 774.55] µm\n",
            "          \n",
            "          \n",
            "**********\n",
            "          \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn convex_profile_peaks_in_the_middle() {
        let profile = cross_section(
            ThicknessVariant::ShapePreserving,
            ShapeClass::Convex,
            &ParameterState::default(),
            50,
        )
        .unwrap();
        let txt = render_profile_plot(&profile, 51, 12);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        let top = rows.iter().position(|r| r.contains('*')).unwrap();
        let bottom = rows.iter().rposition(|r| r.contains('*')).unwrap();
        let top_cols: Vec<usize> = rows[top].char_indices().filter(|(_, c)| *c == '*').map(|(i, _)| i).collect();
        // The highest cells sit around the center column, the edges are lower.
        assert!(top_cols.iter().all(|&c| (15..=35).contains(&c)), "{top_cols:?}");
        assert!(rows[bottom].starts_with('*') || rows[bottom].ends_with('*'));
    }

    #[test]
    fn all_plots_joined() {
        let profiles = crate::profile::all_cross_sections(ThicknessVariant::default(), &ParameterState::default(), 20).unwrap();
        let txt = render_profile_plots(&profiles, 30, 6);
        assert!(txt.contains("Convex reference shape"));
        assert!(txt.contains("Flat reference shape"));
        assert!(txt.contains("Concave reference shape"));
    }
}
