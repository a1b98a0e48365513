//! Expression matrix construction for the heatmap
//!
//! Filters a DE table to significant genes, log-transforms the raw counts,
//! and z-scores each gene row across the 4 samples.

use ndarray::Array2;

use crate::classify::{classify, Regulation, Thresholds};
use crate::data::{DeTable, N_SAMPLES};
use crate::error::{Result, VizError};
use crate::stats::z_score_row;

/// Row-wise z-scored expression values for the significant genes
///
/// Rows are genes in filtered insertion order, columns are the 4 samples.
/// A zero-variance gene row is all-NaN; the heatmap draws those cells in a
/// sentinel color instead of hiding them.
#[derive(Debug, Clone)]
pub struct ExpressionMatrix {
    values: Array2<f64>,
    genes: Vec<String>,
    samples: Vec<String>,
}

impl ExpressionMatrix {
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    /// Row indices of curated genes present in the matrix.
    ///
    /// Absent genes are skipped, not an error: the curated annotation list
    /// is fixed up front and only some of it survives the significance
    /// filter.
    pub fn locate_genes(&self, curated: &[String]) -> Vec<(usize, String)> {
        curated
            .iter()
            .filter_map(|name| {
                let found = self.genes.iter().position(|g| g == name);
                if found.is_none() {
                    log::debug!("Curated gene '{}' not in the filtered matrix, skipped", name);
                }
                found.map(|idx| (idx, name.clone()))
            })
            .collect()
    }

    /// Reorder rows by a permutation (used after clustering)
    pub fn reorder_rows(&self, order: &[usize]) -> Result<Self> {
        if order.len() != self.n_genes() {
            return Err(VizError::DimensionMismatch {
                expected: format!("{} row indices", self.n_genes()),
                got: format!("{}", order.len()),
            });
        }
        let values = self.values.select(ndarray::Axis(0), order);
        let genes = order.iter().map(|&i| self.genes[i].clone()).collect();
        Ok(Self {
            values,
            genes,
            samples: self.samples.clone(),
        })
    }
}

/// Build the z-scored matrix of significant genes from a DE table.
///
/// A gene is kept when `|log2FC| >= t.log2_fc` and `padj <= t.padj`.
/// Unclassifiable genes (missing padj) never pass. Counts enter on a
/// log2(x + 1) scale before z-scoring.
pub fn significant_matrix(table: &DeTable, thresholds: &Thresholds) -> Result<ExpressionMatrix> {
    let mut genes = Vec::new();
    let mut rows: Vec<[f64; N_SAMPLES]> = Vec::new();
    let mut degenerate = 0usize;

    for record in table.records() {
        match classify(record.log2_fc, record.padj, thresholds) {
            Regulation::Upregulated | Regulation::Downregulated => {}
            _ => continue,
        }

        let mut row = record.counts.map(|c| (c + 1.0).log2());
        z_score_row(&mut row);
        if row.iter().all(|v| v.is_nan()) {
            degenerate += 1;
            log::warn!(
                "Gene '{}' has zero variance across samples; its heatmap row is NaN",
                record.gene
            );
        }
        genes.push(record.gene.clone());
        rows.push(row);
    }

    if genes.is_empty() {
        return Err(VizError::EmptyData {
            reason: "No genes pass the significance filter".to_string(),
        });
    }
    if degenerate > 0 {
        log::warn!("{} of {} significant genes are zero-variance", degenerate, genes.len());
    }

    let mut values = Array2::zeros((genes.len(), N_SAMPLES));
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            values[[i, j]] = v;
        }
    }

    Ok(ExpressionMatrix {
        values,
        genes,
        samples: table.sample_names().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DeRecord;

    fn record(gene: &str, f: f64, p: f64, counts: [f64; 4]) -> DeRecord {
        DeRecord {
            gene: gene.to_string(),
            log2_fc: f,
            padj: p,
            counts,
        }
    }

    fn table(records: Vec<DeRecord>) -> DeTable {
        DeTable::new(records, ["c1", "c2", "t1", "t2"].map(String::from)).unwrap()
    }

    #[test]
    fn test_filter_keeps_significant_only() {
        let t = table(vec![
            record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
            record("B", -1.0, 0.01, [40.0, 44.0, 10.0, 12.0]),
            record("C", 0.1, 0.5, [20.0, 21.0, 20.0, 22.0]),
        ]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        assert_eq!(matrix.genes(), &["A".to_string(), "B".to_string()]);
        assert_eq!(matrix.values().dim(), (2, 4));
    }

    #[test]
    fn test_rows_are_z_scored() {
        let t = table(vec![record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0])]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        let row: Vec<f64> = matrix.values().row(0).to_vec();
        let mean: f64 = row.iter().sum::<f64>() / row.len() as f64;
        assert!(mean.abs() < 1e-10);
    }

    #[test]
    fn test_zero_variance_row_is_nan() {
        let t = table(vec![
            record("FLAT", 1.0, 0.01, [5.0, 5.0, 5.0, 5.0]),
            record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
        ]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        assert!(matrix.values().row(0).iter().all(|v| v.is_nan()));
        assert!(matrix.values().row(1).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_unclassifiable_never_passes() {
        let t = table(vec![
            record("A", 3.0, f64::NAN, [10.0, 12.0, 40.0, 44.0]),
            record("B", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
        ]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        assert_eq!(matrix.genes(), &["B".to_string()]);
    }

    #[test]
    fn test_locate_genes_skips_absent() {
        let t = table(vec![
            record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
            record("B", -1.0, 0.01, [40.0, 44.0, 10.0, 12.0]),
        ]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        let curated = vec!["B".to_string(), "NOT_PRESENT".to_string()];
        let found = matrix.locate_genes(&curated);
        assert_eq!(found, vec![(1, "B".to_string())]);
    }

    #[test]
    fn test_reorder_rows() {
        let t = table(vec![
            record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
            record("B", -1.0, 0.01, [40.0, 44.0, 10.0, 12.0]),
        ]);
        let matrix = significant_matrix(&t, &Thresholds::default()).unwrap();
        let reordered = matrix.reorder_rows(&[1, 0]).unwrap();
        assert_eq!(reordered.genes(), &["B".to_string(), "A".to_string()]);
        assert!(matrix.reorder_rows(&[0]).is_err());
    }

    #[test]
    fn test_no_significant_genes_is_error() {
        let t = table(vec![record("C", 0.1, 0.5, [20.0, 21.0, 20.0, 22.0])]);
        assert!(significant_matrix(&t, &Thresholds::default()).is_err());
    }
}
