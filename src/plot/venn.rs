//! Proportional two-set Venn diagram
//!
//! Circle areas are proportional to the two set sizes; the center distance
//! is solved by bisection so the lens area matches the intersection size.

use std::f64::consts::PI;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{Result, VizError};
use crate::plot::style::{DOWN_COLOR, UP_COLOR};
use crate::sets::GeneOverlap;

const WIDTH: u32 = 820;
const HEIGHT: u32 = 560;
const TITLE_HEIGHT: i32 = 55;
const MARGIN: i32 = 40;
const FILL_OPACITY: f64 = 0.45;

/// Render the proportional Venn diagram of two gene sets.
///
/// `label_a` and `label_b` name the experiments; region counts come from
/// the overlap itself.
pub fn render_venn<P: AsRef<Path>>(
    overlap: &GeneOverlap,
    label_a: &str,
    label_b: &str,
    title: &str,
    path: P,
) -> Result<()> {
    let (common, a_unique, b_unique) = overlap.sizes();
    let size_a = common + a_unique;
    let size_b = common + b_unique;
    if size_a == 0 && size_b == 0 {
        return Err(VizError::EmptyData {
            reason: "Both gene sets are empty".to_string(),
        });
    }

    // Areas in abstract units equal the set cardinalities
    let r1 = (size_a.max(1) as f64 / PI).sqrt();
    let r2 = (size_b.max(1) as f64 / PI).sqrt();
    let d = solve_center_distance(r1, r2, common as f64);

    // Fit the layout into the canvas
    let layout_w = d + r1 + r2;
    let layout_h = 2.0 * r1.max(r2);
    let avail_w = (WIDTH as i32 - 2 * MARGIN) as f64;
    let avail_h = (HEIGHT as i32 - TITLE_HEIGHT - 2 * MARGIN) as f64;
    let scale = (avail_w / layout_w).min(avail_h / layout_h);

    let cy = TITLE_HEIGHT + MARGIN + (avail_h / 2.0) as i32;
    let offset_x = MARGIN as f64 + (avail_w - layout_w * scale) / 2.0;
    let c1x = (offset_x + r1 * scale) as i32;
    let c2x = (offset_x + (r1 + d) * scale) as i32;

    let root = SVGBackend::new(path.as_ref(), (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::plot)?;

    root.draw(&Text::new(
        title,
        (WIDTH as i32 / 2 - 120, TITLE_HEIGHT / 2),
        ("sans-serif", 22).into_font().color(&BLACK),
    ))
    .map_err(VizError::plot)?;

    for (cx, r, color) in [(c1x, r1, UP_COLOR), (c2x, r2, DOWN_COLOR)] {
        let px_r = (r * scale) as i32;
        root.draw(&Circle::new((cx, cy), px_r, color.mix(FILL_OPACITY).filled()))
            .map_err(VizError::plot)?;
        root.draw(&Circle::new((cx, cy), px_r, color.stroke_width(2)))
            .map_err(VizError::plot)?;
    }

    // Set labels above the circles
    let label_font = ("sans-serif", 17).into_font().color(&BLACK);
    root.draw(&Text::new(
        format!("{} ({})", label_a, size_a),
        (c1x - 60, cy - (r1 * scale) as i32 - 22),
        label_font.clone(),
    ))
    .map_err(VizError::plot)?;
    root.draw(&Text::new(
        format!("{} ({})", label_b, size_b),
        (c2x - 60, cy - (r2 * scale) as i32 - 22),
        label_font,
    ))
    .map_err(VizError::plot)?;

    // Region counts: A-only, intersection, B-only
    let left_a = c1x - (r1 * scale) as i32;
    let right_a = c1x + (r1 * scale) as i32;
    let left_b = c2x - (r2 * scale) as i32;
    let right_b = c2x + (r2 * scale) as i32;
    let count_font = ("sans-serif", 19).into_font().color(&BLACK);

    root.draw(&Text::new(
        a_unique.to_string(),
        ((left_a + left_b.min(right_a)) / 2, cy),
        count_font.clone(),
    ))
    .map_err(VizError::plot)?;
    root.draw(&Text::new(
        b_unique.to_string(),
        ((right_b + right_a.max(left_b)) / 2, cy),
        count_font.clone(),
    ))
    .map_err(VizError::plot)?;
    if common > 0 {
        root.draw(&Text::new(
            common.to_string(),
            ((left_b + right_a) / 2, cy),
            count_font,
        ))
        .map_err(VizError::plot)?;
    }

    root.present().map_err(VizError::plot)?;
    log::info!(
        "Venn diagram (|A|={}, |B|={}, common={}) written to {}",
        size_a,
        size_b,
        common,
        path.as_ref().display()
    );
    Ok(())
}

/// Area of the lens formed by two circles at center distance `d`
fn lens_area(d: f64, r1: f64, r2: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        return PI * r1.min(r2).powi(2);
    }
    let d2 = d * d;
    let a1 = r1 * r1 * (((d2 + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0)).acos();
    let a2 = r2 * r2 * (((d2 + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0)).acos();
    let triangle = 0.5
        * ((-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2))
            .max(0.0)
            .sqrt();
    a1 + a2 - triangle
}

/// Center distance whose lens area equals `target` (bisection).
///
/// The lens area decreases monotonically in d, from the full smaller
/// circle at full containment down to zero at tangency. A zero target
/// separates the circles with a small gap so they read as disjoint.
fn solve_center_distance(r1: f64, r2: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return (r1 + r2) * 1.1;
    }
    let max_lens = PI * r1.min(r2).powi(2);
    if target >= max_lens {
        return (r1 - r2).abs();
    }

    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        if lens_area(mid, r1, r2) > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::compare;
    use tempfile::tempdir;

    #[test]
    fn test_lens_area_bounds() {
        assert_eq!(lens_area(3.0, 1.0, 1.0), 0.0);
        let full = lens_area(0.0, 1.0, 2.0);
        assert!((full - PI).abs() < 1e-9, "contained circle lens should be its area");
    }

    #[test]
    fn test_solved_distance_reproduces_target() {
        let r1 = (184.0f64 / PI).sqrt();
        let r2 = (187.0f64 / PI).sqrt();
        let target = 65.0;
        let d = solve_center_distance(r1, r2, target);
        assert!((lens_area(d, r1, r2) - target).abs() < 1e-6);
    }

    #[test]
    fn test_venn_renders_svg() {
        let a: Vec<String> = (0..20).map(|i| format!("a{}", i)).collect();
        let b: Vec<String> = (10..35).map(|i| format!("a{}", i)).collect();
        let overlap = compare(a, b);

        let dir = tempdir().unwrap();
        let out = dir.path().join("venn.svg");
        render_venn(&overlap, "exp1", "exp2", "shared upregulated genes", &out).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("exp1"));
    }

    #[test]
    fn test_disjoint_sets_render() {
        let overlap = compare(
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        );
        let dir = tempdir().unwrap();
        let out = dir.path().join("venn.svg");
        render_venn(&overlap, "x", "y", "t", &out).unwrap();
    }

    #[test]
    fn test_both_empty_is_error() {
        let overlap = compare(Vec::<String>::new(), Vec::<String>::new());
        let dir = tempdir().unwrap();
        let out = dir.path().join("venn.svg");
        assert!(render_venn(&overlap, "x", "y", "t", &out).is_err());
    }
}
