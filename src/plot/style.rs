//! Shared style constants and color ramps for the presenters

use plotters::style::RGBColor;

/// Upregulated points / left Venn circle
pub const UP_COLOR: RGBColor = RGBColor(214, 39, 40);
/// Downregulated points / right Venn circle
pub const DOWN_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Not-significant points
pub const NS_COLOR: RGBColor = RGBColor(160, 160, 160);
/// Sentinel for NaN heatmap cells (zero-variance genes)
pub const NAN_COLOR: RGBColor = RGBColor(120, 120, 120);

/// Diverging blue-white-red ramp for z-scores, clamped to [-limit, limit]
pub fn diverging_color(z: f64, limit: f64) -> RGBColor {
    if !z.is_finite() {
        return NAN_COLOR;
    }
    let t = (z / limit).clamp(-1.0, 1.0);
    if t < 0.0 {
        // Blue toward white
        let u = 1.0 + t;
        RGBColor(
            (DOWN_COLOR.0 as f64 + (255.0 - DOWN_COLOR.0 as f64) * u) as u8,
            (DOWN_COLOR.1 as f64 + (255.0 - DOWN_COLOR.1 as f64) * u) as u8,
            (DOWN_COLOR.2 as f64 + (255.0 - DOWN_COLOR.2 as f64) * u) as u8,
        )
    } else {
        // White toward red
        let u = 1.0 - t;
        RGBColor(
            (UP_COLOR.0 as f64 + (255.0 - UP_COLOR.0 as f64) * u) as u8,
            (UP_COLOR.1 as f64 + (255.0 - UP_COLOR.1 as f64) * u) as u8,
            (UP_COLOR.2 as f64 + (255.0 - UP_COLOR.2 as f64) * u) as u8,
        )
    }
}

/// Red (significant) to blue (marginal) ramp for dot plot adjusted p-values.
///
/// `t` is padj rescaled to [0, 1] over the displayed range.
pub fn padj_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    RGBColor(
        (UP_COLOR.0 as f64 + (DOWN_COLOR.0 as f64 - UP_COLOR.0 as f64) * t) as u8,
        (UP_COLOR.1 as f64 + (DOWN_COLOR.1 as f64 - UP_COLOR.1 as f64) * t) as u8,
        (UP_COLOR.2 as f64 + (DOWN_COLOR.2 as f64 - UP_COLOR.2 as f64) * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_endpoints() {
        assert_eq!(diverging_color(-2.0, 2.0), DOWN_COLOR);
        assert_eq!(diverging_color(2.0, 2.0), UP_COLOR);
        assert_eq!(diverging_color(0.0, 2.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_diverging_clamps_and_nan() {
        assert_eq!(diverging_color(-100.0, 2.0), DOWN_COLOR);
        assert_eq!(diverging_color(f64::NAN, 2.0), NAN_COLOR);
    }

    #[test]
    fn test_padj_ramp_endpoints() {
        assert_eq!(padj_color(0.0), UP_COLOR);
        assert_eq!(padj_color(1.0), DOWN_COLOR);
    }
}
