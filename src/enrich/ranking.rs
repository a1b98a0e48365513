//! Ranked gene list for preranked GSEA
//!
//! Each gene is scored by -log10(padj) * sign(log2FC), so strongly
//! significant upregulated genes rank first and strongly significant
//! downregulated genes rank last.

use crate::data::DeTable;
use crate::stats::neg_log10_padj;

/// Build the descending ranked list (gene, score) from a DE table.
///
/// Genes with a missing adjusted p-value cannot be scored and are excluded.
/// A zero fold-change (including the substituted value for a missing one)
/// scores exactly 0 and lands mid-list. The sort is stable, so ties keep
/// the original table order.
pub fn ranked_list(table: &DeTable) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = table
        .records()
        .iter()
        .filter(|r| !r.padj.is_nan())
        .map(|r| {
            let sign = if r.log2_fc > 0.0 {
                1.0
            } else if r.log2_fc < 0.0 {
                -1.0
            } else {
                0.0
            };
            (r.gene.clone(), neg_log10_padj(r.padj) * sign)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let excluded = table.n_genes() - ranked.len();
    if excluded > 0 {
        log::debug!("{} genes without adjusted p-value excluded from ranking", excluded);
    }

    ranked
}
