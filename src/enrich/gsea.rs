//! Preranked gene set enrichment analysis
//!
//! Classic weighted Kolmogorov-Smirnov running sum (weight exponent 1) over
//! a descending ranked gene list, with a gene-label permutation null for
//! score normalization (NES) and significance. P-values are BH-adjusted
//! across gene sets. The enrichment computation itself is standard; nothing
//! here invents statistics.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::enrich::{EnrichmentRow, GeneSet};
use crate::error::{Result, VizError};
use crate::rng::SplitMix64;
use crate::stats::benjamini_hochberg;

/// Parameters for the permutation test
#[derive(Debug, Clone)]
pub struct GseaParams {
    /// Number of label permutations per gene set
    pub n_permutations: usize,
    /// Minimum overlap between a set and the ranked universe
    pub min_size: usize,
    /// RNG seed; each gene set derives its own stream from this
    pub seed: u64,
}

impl Default for GseaParams {
    fn default() -> Self {
        Self {
            n_permutations: 1000,
            min_size: 5,
            seed: 2024,
        }
    }
}

/// Run preranked GSEA for every gene set against a descending ranked list.
///
/// Returns one row per retained gene set, in input order. Sets overlapping
/// the ranked universe in fewer than `min_size` genes are dropped.
pub fn preranked_gsea(
    ranked: &[(String, f64)],
    gene_sets: &[GeneSet],
    params: &GseaParams,
) -> Result<Vec<EnrichmentRow>> {
    if ranked.is_empty() {
        return Err(VizError::EmptyData {
            reason: "Ranked gene list is empty".to_string(),
        });
    }

    let scores: Vec<f64> = ranked.iter().map(|(_, s)| s.abs()).collect();
    let signed: Vec<f64> = ranked.iter().map(|(_, s)| *s).collect();

    // Verify the list really is descending; a shuffled list would silently
    // produce garbage running sums.
    if signed.windows(2).any(|w| w[0] < w[1]) {
        return Err(VizError::InvalidInput {
            reason: "Ranked gene list must be sorted descending by score".to_string(),
        });
    }

    let retained: Vec<(usize, Vec<bool>, usize)> = gene_sets
        .iter()
        .enumerate()
        .filter_map(|(i, set)| {
            let members: HashSet<&str> = set.genes.iter().map(String::as_str).collect();
            let hits: Vec<bool> = ranked.iter().map(|(g, _)| members.contains(g.as_str())).collect();
            let n_hits = hits.iter().filter(|&&h| h).count();
            if n_hits < params.min_size {
                log::debug!(
                    "Gene set '{}' overlaps ranked list in {} genes (< {}), dropped",
                    set.name,
                    n_hits,
                    params.min_size
                );
                None
            } else {
                Some((i, hits, n_hits))
            }
        })
        .collect();

    if retained.is_empty() {
        return Err(VizError::EmptyData {
            reason: "No gene set overlaps the ranked list sufficiently".to_string(),
        });
    }

    let mut rows: Vec<EnrichmentRow> = retained
        .par_iter()
        .map(|&(set_idx, ref hits, n_hits)| {
            let (es, peak) = enrichment_score(&scores, hits);
            let enriched_count = leading_edge_size(hits, es, peak);

            // Permutation null: shuffle the hit labels across ranks
            let mut rng = SplitMix64::new(params.seed.wrapping_add(set_idx as u64));
            let mut null_same_sign: Vec<f64> = Vec::new();
            let mut shuffled = hits.clone();
            for _ in 0..params.n_permutations {
                rng.shuffle(&mut shuffled);
                let (null_es, _) = enrichment_score(&scores, &shuffled);
                if null_es.signum() == es.signum() {
                    null_same_sign.push(null_es.abs());
                }
            }

            let (nes, pvalue) = if null_same_sign.is_empty() {
                (0.0, 1.0)
            } else {
                let mean_null =
                    null_same_sign.iter().sum::<f64>() / null_same_sign.len() as f64;
                let nes = if mean_null > 0.0 { es / mean_null } else { 0.0 };
                let n_extreme = null_same_sign.iter().filter(|&&v| v >= es.abs()).count();
                // +1 correction keeps permutation p-values away from 0
                let p = (n_extreme + 1) as f64 / (null_same_sign.len() + 1) as f64;
                (nes, p)
            };

            EnrichmentRow {
                pathway: gene_sets[set_idx].name.clone(),
                nes,
                padj: pvalue,
                enriched_count,
                set_size: n_hits,
            }
        })
        .collect();

    // Adjust the permutation p-values across all retained sets
    let pvalues: Vec<f64> = rows.iter().map(|r| r.padj).collect();
    for (row, adj) in rows.iter_mut().zip(benjamini_hochberg(&pvalues)) {
        row.padj = adj;
    }

    log::info!(
        "Preranked GSEA: {} of {} gene sets retained ({} permutations each)",
        rows.len(),
        gene_sets.len(),
        params.n_permutations
    );
    Ok(rows)
}

/// Weighted KS running sum. Returns (ES, index of the extreme deviation).
///
/// `scores` are absolute ranking scores in list order; `hits` marks set
/// membership per rank. Hit steps are weighted by score, miss steps are
/// uniform.
fn enrichment_score(scores: &[f64], hits: &[bool]) -> (f64, usize) {
    let n = scores.len();
    let n_hits = hits.iter().filter(|&&h| h).count();
    let n_misses = n - n_hits;
    if n_hits == 0 || n_misses == 0 {
        return (0.0, 0);
    }

    let hit_norm: f64 = scores
        .iter()
        .zip(hits.iter())
        .filter(|(_, &h)| h)
        .map(|(s, _)| s)
        .sum();
    let miss_step = 1.0 / n_misses as f64;

    let mut running = 0.0f64;
    let mut extreme = 0.0f64;
    let mut extreme_idx = 0;
    for i in 0..n {
        if hits[i] {
            // All-zero hit scores degenerate to uniform hit steps
            running += if hit_norm > 0.0 {
                scores[i] / hit_norm
            } else {
                1.0 / n_hits as f64
            };
        } else {
            running -= miss_step;
        }
        if running.abs() > extreme.abs() {
            extreme = running;
            extreme_idx = i;
        }
    }

    (extreme, extreme_idx)
}

/// Leading edge: hits before (positive ES) or after (negative ES) the peak
fn leading_edge_size(hits: &[bool], es: f64, peak: usize) -> usize {
    if es >= 0.0 {
        hits[..=peak].iter().filter(|&&h| h).count()
    } else {
        hits[peak..].iter().filter(|&&h| h).count()
    }
}
