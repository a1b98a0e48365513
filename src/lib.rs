//! deviz: visualization of RNA-seq differential expression results
//!
//! This crate reads pre-computed differential expression tables, classifies
//! genes by fixed fold-change / significance thresholds, and renders a fixed
//! sequence of figures: volcano plot, clustered heatmaps, GSEA dot plot,
//! and a proportional two-set Venn diagram.
//!
//! # Example
//!
//! ```ignore
//! use deviz::prelude::*;
//!
//! let schema = TableSchema::default();
//! let table_a = read_de_table("arid1a_ko.tsv", &schema)?;
//! let table_b = read_de_table("arid1b_ko.tsv", &schema)?;
//!
//! let config = ReportConfig::default();
//! render_report(&table_a, &table_b, &config, "figures")?;
//! ```

pub mod classify;
pub mod cli;
pub mod cluster;
pub mod data;
pub mod enrich;
pub mod error;
pub mod io;
pub mod plot;
pub mod reshape;
pub mod rng;
pub mod sets;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classify::{classify, classify_table, Regulation, RegulationSummary, Thresholds};
    pub use crate::cluster::cluster_row_order;
    pub use crate::data::{DeRecord, DeTable, TableSchema};
    pub use crate::enrich::{
        preranked_gsea, ranked_list, shape_for_display, EnrichmentRow, GeneSet, GseaParams,
    };
    pub use crate::error::{Result, VizError};
    pub use crate::io::{read_de_table, read_enrichment_table, read_gene_sets};
    pub use crate::plot::{render_dotplot, render_heatmap, render_venn, render_volcano};
    pub use crate::reshape::{significant_matrix, ExpressionMatrix};
    pub use crate::sets::{compare, upregulated_genes, GeneOverlap};
    pub use crate::{render_report, ReportConfig};
}

use std::path::{Path, PathBuf};

use prelude::*;

/// Settings for the full figure sequence
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Curated genes to label in the volcano and the heatmaps
    pub labels: Vec<String>,
    /// Display name of the first experiment
    pub label_a: String,
    /// Display name of the second experiment
    pub label_b: String,
    pub thresholds: Thresholds,
    /// Gene sets for the dot plot; None skips the GSEA figure
    pub gene_sets: Option<Vec<GeneSet>>,
    pub gsea: GseaParams,
    /// Pathways kept on each end of the NES scale in the dot plot
    pub top_pathways: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            label_a: "experiment A".to_string(),
            label_b: "experiment B".to_string(),
            thresholds: Thresholds::default(),
            gene_sets: None,
            gsea: GseaParams::default(),
            top_pathways: 5,
        }
    }
}

/// Render the full figure sequence for a two-experiment comparison.
///
/// Produces volcano.svg (first experiment), heatmap_a.svg, heatmap_b.svg,
/// venn.svg and, when gene sets are configured, gsea_dotplot.svg. Returns
/// the written paths.
pub fn render_report<P: AsRef<Path>>(
    table_a: &DeTable,
    table_b: &DeTable,
    config: &ReportConfig,
    out_dir: P,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    for (name, table) in [(&config.label_a, table_a), (&config.label_b, table_b)] {
        let summary = RegulationSummary::from_labels(&classify_table(table, &config.thresholds));
        log::info!("{}: {}", name, summary);
    }

    let mut written = Vec::new();

    let volcano_path = out_dir.join("volcano.svg");
    render_volcano(
        table_a,
        &config.thresholds,
        &config.labels,
        &config.label_a,
        &volcano_path,
    )?;
    written.push(volcano_path);

    for (table, name, file) in [
        (table_a, &config.label_a, "heatmap_a.svg"),
        (table_b, &config.label_b, "heatmap_b.svg"),
    ] {
        let matrix = significant_matrix(table, &config.thresholds)?;
        let path = out_dir.join(file);
        render_heatmap(&matrix, &config.labels, name, &path)?;
        written.push(path);
    }

    if let Some(gene_sets) = &config.gene_sets {
        let ranked = ranked_list(table_a);
        let rows = preranked_gsea(&ranked, gene_sets, &config.gsea)?;
        let shaped = shape_for_display(rows, config.top_pathways);
        let path = out_dir.join("gsea_dotplot.svg");
        render_dotplot(&shaped, &format!("{}: gene set enrichment", config.label_a), &path)?;
        written.push(path);
    }

    let overlap = compare(
        upregulated_genes(table_a, &config.thresholds),
        upregulated_genes(table_b, &config.thresholds),
    );
    let (common, a_unique, b_unique) = overlap.sizes();
    log::info!(
        "Upregulated overlap: {} common, {} only in {}, {} only in {}",
        common,
        a_unique,
        config.label_a,
        b_unique,
        config.label_b
    );
    let venn_path = out_dir.join("venn.svg");
    render_venn(
        &overlap,
        &config.label_a,
        &config.label_b,
        "Shared upregulated genes",
        &venn_path,
    )?;
    written.push(venn_path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(gene: &str, f: f64, p: f64, counts: [f64; 4]) -> DeRecord {
        DeRecord {
            gene: gene.to_string(),
            log2_fc: f,
            padj: p,
            counts,
        }
    }

    fn samples() -> [String; 4] {
        ["c1", "c2", "t1", "t2"].map(String::from)
    }

    #[test]
    fn test_full_report_without_gsea() {
        let table_a = DeTable::new(
            vec![
                record("A", 1.0, 0.01, [10.0, 12.0, 40.0, 44.0]),
                record("B", -1.0, 0.01, [40.0, 44.0, 10.0, 12.0]),
                record("C", 0.1, 0.5, [20.0, 21.0, 20.0, 22.0]),
            ],
            samples(),
        )
        .unwrap();
        let table_b = DeTable::new(
            vec![
                record("A", 2.0, 0.001, [5.0, 6.0, 30.0, 33.0]),
                record("D", 0.9, 0.02, [8.0, 9.0, 18.0, 20.0]),
                record("B", -0.2, 0.8, [10.0, 11.0, 10.0, 12.0]),
            ],
            samples(),
        )
        .unwrap();

        let dir = tempdir().unwrap();
        let written = render_report(&table_a, &table_b, &ReportConfig::default(), dir.path()).unwrap();

        // volcano, two heatmaps, venn; no GSEA without gene sets
        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists(), "missing artifact {}", path.display());
        }

        // Classification scenario: A up, B down, C not significant
        let labels = classify_table(&table_a, &Thresholds::default());
        assert_eq!(
            labels,
            vec![
                Regulation::Upregulated,
                Regulation::Downregulated,
                Regulation::NotSignificant,
            ]
        );

        // Heatmap matrix holds A and B only, not C
        let matrix = significant_matrix(&table_a, &Thresholds::default()).unwrap();
        assert_eq!(matrix.genes(), &["A".to_string(), "B".to_string()]);

        // Upregulated overlap: A in both, D only in B
        let overlap = compare(
            upregulated_genes(&table_a, &Thresholds::default()),
            upregulated_genes(&table_b, &Thresholds::default()),
        );
        assert_eq!(overlap.sizes(), (1, 0, 1));
    }
}
