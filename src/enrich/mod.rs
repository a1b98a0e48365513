//! Gene set enrichment: ranked list construction, preranked GSEA, and
//! shaping of enrichment results for the dot plot

mod gsea;
mod ranking;
mod shape;

pub use gsea::{preranked_gsea, GseaParams};
pub use ranking::ranked_list;
pub use shape::shape_for_display;

use serde::{Deserialize, Serialize};

/// A named gene set from a GMT reference collection
#[derive(Debug, Clone)]
pub struct GeneSet {
    pub name: String,
    pub description: String,
    pub genes: Vec<String>,
}

/// One pathway's enrichment result, as displayed in the dot plot.
///
/// Field renames bind to the header names of an external enrichment table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentRow {
    /// Pathway / gene set name
    pub pathway: String,
    /// Normalized enrichment score (signed)
    #[serde(rename = "NES")]
    pub nes: f64,
    /// BH-adjusted permutation p-value
    pub padj: f64,
    /// Number of set members contributing to the enrichment peak
    #[serde(rename = "count")]
    pub enriched_count: usize,
    /// Number of set members present in the ranked universe
    #[serde(rename = "size")]
    pub set_size: usize,
}

impl EnrichmentRow {
    /// GeneRatio: fraction of the set driving the enrichment signal
    pub fn gene_ratio(&self) -> f64 {
        if self.set_size == 0 {
            0.0
        } else {
            self.enriched_count as f64 / self.set_size as f64
        }
    }
}
