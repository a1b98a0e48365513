//! GSEA dot plot: NES per pathway, dot size by GeneRatio, color by padj

use std::path::Path;

use plotters::prelude::*;

use crate::enrich::EnrichmentRow;
use crate::error::{Result, VizError};
use crate::plot::style::padj_color;

const WIDTH: u32 = 980;
const ROW_HEIGHT: u32 = 42;
const BASE_HEIGHT: u32 = 160;
const PATHWAY_LABEL_WIDTH: i32 = 360;
const MIN_DOT_RADIUS: f64 = 4.0;
const MAX_DOT_RADIUS: f64 = 13.0;

/// Render the enrichment dot plot.
///
/// Expects rows already shaped for display (nonzero NES, sorted descending,
/// top/bottom selection applied). Rows are drawn top-down in input order.
pub fn render_dotplot<P: AsRef<Path>>(rows: &[EnrichmentRow], title: &str, path: P) -> Result<()> {
    if rows.is_empty() {
        return Err(VizError::EmptyData {
            reason: "No enrichment rows to draw".to_string(),
        });
    }

    let n = rows.len();
    let height = BASE_HEIGHT + ROW_HEIGHT * n as u32;

    let nes_extent = rows.iter().map(|r| r.nes.abs()).fold(1.0, f64::max) * 1.15;
    let (ratio_min, ratio_max) = rows.iter().fold((f64::INFINITY, 0.0f64), |(lo, hi), r| {
        (lo.min(r.gene_ratio()), hi.max(r.gene_ratio()))
    });
    let (padj_min, padj_max) = rows.iter().fold((f64::INFINITY, 0.0f64), |(lo, hi), r| {
        (lo.min(r.padj), hi.max(r.padj))
    });

    let root = SVGBackend::new(path.as_ref(), (WIDTH, height)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::plot)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(PATHWAY_LABEL_WIDTH)
        .build_cartesian_2d(-nes_extent..nes_extent, -0.5..(n as f64 - 0.5))
        .map_err(VizError::plot)?;

    // Pathway names as y tick labels, top row first
    let names: Vec<String> = rows.iter().map(|r| r.pathway.clone()).collect();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("normalized enrichment score")
        .y_labels(n)
        .y_label_formatter(&|y: &f64| {
            let idx = y.round() as isize;
            if (y - idx as f64).abs() < 0.01 && idx >= 0 && (idx as usize) < n {
                names[n - 1 - idx as usize].clone()
            } else {
                String::new()
            }
        })
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(VizError::plot)?;

    // Zero reference line
    chart
        .draw_series(LineSeries::new(
            [(0.0, -0.5), (0.0, n as f64 - 0.5)],
            BLACK.stroke_width(1),
        ))
        .map_err(VizError::plot)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, r)| {
            let y = (n - 1 - i) as f64;
            let radius = if ratio_max > ratio_min {
                MIN_DOT_RADIUS
                    + (MAX_DOT_RADIUS - MIN_DOT_RADIUS) * (r.gene_ratio() - ratio_min)
                        / (ratio_max - ratio_min)
            } else {
                (MIN_DOT_RADIUS + MAX_DOT_RADIUS) / 2.0
            };
            let t = if padj_max > padj_min {
                (r.padj - padj_min) / (padj_max - padj_min)
            } else {
                0.0
            };
            Circle::new((r.nes, y), radius as i32, padj_color(t).filled())
        }))
        .map_err(VizError::plot)?;

    root.present().map_err(VizError::plot)?;
    log::info!("Dot plot ({} pathways) written to {}", n, path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(pathway: &str, nes: f64, padj: f64) -> EnrichmentRow {
        EnrichmentRow {
            pathway: pathway.to_string(),
            nes,
            padj,
            enriched_count: 20,
            set_size: 100,
        }
    }

    #[test]
    fn test_dotplot_renders_svg() {
        let rows = vec![
            row("HALLMARK_E2F_TARGETS", 2.2, 0.001),
            row("HALLMARK_MYC_TARGETS_V1", 1.8, 0.01),
            row("HALLMARK_HYPOXIA", -1.5, 0.03),
        ];

        let dir = tempdir().unwrap();
        let out = dir.path().join("dotplot.svg");
        render_dotplot(&rows, "GSEA", &out).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("normalized enrichment score"));
    }

    #[test]
    fn test_empty_rows_is_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dotplot.svg");
        let err = render_dotplot(&[], "GSEA", &out).unwrap_err();
        assert!(matches!(err, VizError::EmptyData { .. }));
    }
}
