//! Volcano plot: log2 fold-change vs -log10 adjusted p-value

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::classify::{classify, Regulation, Thresholds};
use crate::data::DeTable;
use crate::error::{Result, VizError};
use crate::plot::style::{DOWN_COLOR, NS_COLOR, UP_COLOR};
use crate::stats::neg_log10_padj;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 700;
const POINT_SIZE: i32 = 2;
const LABEL_FONT_SIZE: i32 = 14;

/// Render the volcano plot for one experiment.
///
/// Unclassifiable genes (missing padj) have no y-coordinate and are
/// omitted from the scatter; curated genes present in the table get text
/// labels.
pub fn render_volcano<P: AsRef<Path>>(
    table: &DeTable,
    thresholds: &Thresholds,
    curated: &[String],
    title: &str,
    path: P,
) -> Result<()> {
    // (x, y, label) per drawable gene
    let points: Vec<(f64, f64, Regulation)> = table
        .records()
        .iter()
        .filter_map(|r| {
            let y = neg_log10_padj(r.padj);
            if y.is_nan() {
                None
            } else {
                Some((r.log2_fc, y, classify(r.log2_fc, r.padj, thresholds)))
            }
        })
        .collect();

    if points.is_empty() {
        return Err(VizError::EmptyData {
            reason: "No genes with an adjusted p-value to draw".to_string(),
        });
    }

    let x_extent = points
        .iter()
        .map(|(x, _, _)| x.abs())
        .fold(thresholds.log2_fc, f64::max)
        * 1.05;
    let y_max = points.iter().map(|(_, y, _)| *y).fold(0.0, f64::max) * 1.05;

    let root = SVGBackend::new(path.as_ref(), (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::plot)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(-x_extent..x_extent, 0.0..y_max)
        .map_err(VizError::plot)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("log2 fold change")
        .y_desc("-log10 adjusted p-value")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(VizError::plot)?;

    // Dashed guides at the classification thresholds
    let guide = NS_COLOR.stroke_width(1);
    let p_guide = neg_log10_padj(thresholds.padj);
    for x in [-thresholds.log2_fc, thresholds.log2_fc] {
        chart
            .draw_series(DashedLineSeries::new(
                [(x, 0.0), (x, y_max)],
                6,
                4,
                guide,
            ))
            .map_err(VizError::plot)?;
    }
    chart
        .draw_series(DashedLineSeries::new(
            [(-x_extent, p_guide), (x_extent, p_guide)],
            6,
            4,
            guide,
        ))
        .map_err(VizError::plot)?;

    for (label, color) in [
        (Regulation::NotSignificant, NS_COLOR),
        (Regulation::Upregulated, UP_COLOR),
        (Regulation::Downregulated, DOWN_COLOR),
    ] {
        let n = points.iter().filter(|(_, _, l)| *l == label).count();
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|(_, _, l)| *l == label)
                    .map(|&(x, y, _)| Circle::new((x, y), POINT_SIZE, color.filled())),
            )
            .map_err(VizError::plot)?
            .label(format!("{} ({})", label, n))
            .legend(move |(x, y)| Circle::new((x + 8, y), 4, color.filled()));
    }

    // Curated gene labels, skipped when absent from the table
    let labels: Vec<(f64, f64, String)> = curated
        .iter()
        .filter_map(|name| {
            table
                .records()
                .iter()
                .find(|r| &r.gene == name && !r.padj.is_nan())
                .map(|r| (r.log2_fc, neg_log10_padj(r.padj), name.clone()))
        })
        .collect();
    chart
        .draw_series(labels.iter().map(|(x, y, name)| {
            Text::new(
                name.clone(),
                (*x, *y),
                ("sans-serif", LABEL_FONT_SIZE).into_font().color(&BLACK),
            )
        }))
        .map_err(VizError::plot)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 15))
        .draw()
        .map_err(VizError::plot)?;

    root.present().map_err(VizError::plot)?;
    log::info!("Volcano plot written to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DeRecord;
    use tempfile::tempdir;

    #[test]
    fn test_volcano_renders_svg() {
        let records = vec![
            DeRecord { gene: "A".into(), log2_fc: 1.0, padj: 0.01, counts: [0.0; 4] },
            DeRecord { gene: "B".into(), log2_fc: -1.0, padj: 0.01, counts: [0.0; 4] },
            DeRecord { gene: "C".into(), log2_fc: 0.1, padj: 0.5, counts: [0.0; 4] },
            DeRecord { gene: "D".into(), log2_fc: 2.0, padj: f64::NAN, counts: [0.0; 4] },
        ];
        let table = DeTable::new(records, ["c1", "c2", "t1", "t2"].map(String::from)).unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("volcano.svg");
        render_volcano(&table, &Thresholds::default(), &["A".to_string()], "test", &out).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("log2 fold change"));
    }

    #[test]
    fn test_all_unclassifiable_is_error() {
        let records = vec![DeRecord {
            gene: "D".into(),
            log2_fc: 2.0,
            padj: f64::NAN,
            counts: [0.0; 4],
        }];
        let table = DeTable::new(records, ["c1", "c2", "t1", "t2"].map(String::from)).unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("volcano.svg");
        let err = render_volcano(&table, &Thresholds::default(), &[], "test", &out).unwrap_err();
        assert!(matches!(err, VizError::EmptyData { .. }));
    }
}
