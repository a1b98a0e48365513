//! Clustered heatmap of row-wise z-scored expression

use std::path::Path;

use plotters::prelude::*;

use crate::cluster::cluster_row_order;
use crate::error::{Result, VizError};
use crate::plot::style::diverging_color;
use crate::reshape::ExpressionMatrix;

const WIDTH: u32 = 760;
const TITLE_HEIGHT: i32 = 50;
const LABEL_WIDTH: i32 = 110;
const FOOTER_HEIGHT: i32 = 40;
const COLORBAR_WIDTH: i32 = 22;
const COLORBAR_MARGIN: i32 = 55;
const MARGIN: i32 = 15;
const MIN_CELL_HEIGHT: f64 = 4.0;
/// Z-score clamp for the diverging color ramp
const Z_LIMIT: f64 = 2.0;
/// Label every row when the matrix is at most this tall
const MAX_LABELED_ROWS: usize = 60;

/// Render the clustered heatmap for one experiment.
///
/// Rows are reordered by hierarchical clustering before drawing. All rows
/// get a label when the matrix is small; otherwise only curated genes are
/// labeled. NaN rows (zero-variance genes) are drawn in the sentinel grey.
pub fn render_heatmap<P: AsRef<Path>>(
    matrix: &ExpressionMatrix,
    curated: &[String],
    title: &str,
    path: P,
) -> Result<()> {
    let order = cluster_row_order(matrix.values());
    let matrix = matrix.reorder_rows(&order)?;

    let n_genes = matrix.n_genes();
    let n_samples = matrix.samples().len();

    let plot_height = (n_genes as f64 * MIN_CELL_HEIGHT).max(320.0);
    let total_height = (TITLE_HEIGHT + FOOTER_HEIGHT + 2 * MARGIN) as u32 + plot_height as u32;
    let plot_width = WIDTH as i32 - LABEL_WIDTH - COLORBAR_WIDTH - COLORBAR_MARGIN - 2 * MARGIN;
    let cell_width = plot_width as f64 / n_samples as f64;
    let cell_height = plot_height / n_genes as f64;

    let root = SVGBackend::new(path.as_ref(), (WIDTH, total_height)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::plot)?;

    root.draw(&Text::new(
        title,
        (WIDTH as i32 / 2 - 100, TITLE_HEIGHT / 2),
        ("sans-serif", 22).into_font().color(&BLACK),
    ))
    .map_err(VizError::plot)?;

    let x0 = LABEL_WIDTH + MARGIN;
    let y0 = TITLE_HEIGHT + MARGIN;

    // Cells
    for (row_idx, row) in matrix.values().outer_iter().enumerate() {
        for (col_idx, &z) in row.iter().enumerate() {
            let x_start = x0 as f64 + col_idx as f64 * cell_width;
            let y_start = y0 as f64 + row_idx as f64 * cell_height;
            root.draw(&Rectangle::new(
                [
                    (x_start as i32, y_start as i32),
                    ((x_start + cell_width) as i32, (y_start + cell_height).ceil() as i32),
                ],
                diverging_color(z, Z_LIMIT).filled(),
            ))
            .map_err(VizError::plot)?;
        }
    }

    // Row labels: every gene when small, curated genes otherwise
    let labeled: Vec<(usize, String)> = if n_genes <= MAX_LABELED_ROWS {
        matrix
            .genes()
            .iter()
            .enumerate()
            .map(|(i, g)| (i, g.clone()))
            .collect()
    } else {
        matrix.locate_genes(curated)
    };
    for (row_idx, gene) in &labeled {
        let y = y0 as f64 + (*row_idx as f64 + 0.5) * cell_height;
        root.draw(&Text::new(
            gene.clone(),
            (MARGIN, y as i32),
            ("sans-serif", 11).into_font().color(&BLACK),
        ))
        .map_err(VizError::plot)?;
    }

    // Column labels under the grid
    for (col_idx, sample) in matrix.samples().iter().enumerate() {
        let x = x0 as f64 + (col_idx as f64 + 0.15) * cell_width;
        root.draw(&Text::new(
            sample.clone(),
            (x as i32, y0 + plot_height as i32 + 12),
            ("sans-serif", 13).into_font().color(&BLACK),
        ))
        .map_err(VizError::plot)?;
    }

    draw_colorbar(&root, x0 + plot_width + 18, y0, plot_height as i32)?;

    root.present().map_err(VizError::plot)?;
    log::info!(
        "Heatmap ({} genes x {} samples) written to {}",
        n_genes,
        n_samples,
        path.as_ref().display()
    );
    Ok(())
}

fn draw_colorbar(
    root: &DrawingArea<SVGBackend, plotters::coord::Shift>,
    x: i32,
    y: i32,
    height: i32,
) -> Result<()> {
    let steps = height.max(1);
    for i in 0..steps {
        // Top of the bar is +Z_LIMIT, bottom is -Z_LIMIT
        let z = Z_LIMIT - 2.0 * Z_LIMIT * i as f64 / steps as f64;
        root.draw(&Rectangle::new(
            [(x, y + i), (x + COLORBAR_WIDTH, y + i + 1)],
            diverging_color(z, Z_LIMIT).filled(),
        ))
        .map_err(VizError::plot)?;
    }

    for (label, frac) in [("+2", 0.0), ("0", 0.5), ("-2", 1.0)] {
        root.draw(&Text::new(
            label,
            (x + COLORBAR_WIDTH + 5, y + (height as f64 * frac) as i32),
            ("sans-serif", 12).into_font().color(&BLACK),
        ))
        .map_err(VizError::plot)?;
    }
    root.draw(&Text::new(
        "z-score",
        (x - 4, y - 14),
        ("sans-serif", 12).into_font().color(&BLACK),
    ))
    .map_err(VizError::plot)?;
    Ok(())
}
