//! Display shaping of enrichment results for the dot plot

use crate::enrich::EnrichmentRow;

/// Keep the strongest results on both ends of the NES scale.
///
/// Rows with a zero enrichment score are dropped, the rest are sorted
/// descending by NES (stable, so ties keep input order), then the `top_n`
/// highest positive and `top_n` lowest negative rows are retained. The
/// output size is min(top_n, positives) + min(top_n, negatives).
pub fn shape_for_display(mut rows: Vec<EnrichmentRow>, top_n: usize) -> Vec<EnrichmentRow> {
    rows.retain(|r| r.nes != 0.0);
    rows.sort_by(|a, b| b.nes.partial_cmp(&a.nes).unwrap_or(std::cmp::Ordering::Equal));

    let n_positive = rows.iter().filter(|r| r.nes > 0.0).count();
    let n_negative = rows.len() - n_positive;

    let keep_positive = top_n.min(n_positive);
    let keep_negative = top_n.min(n_negative);

    let mut shaped = Vec::with_capacity(keep_positive + keep_negative);
    shaped.extend_from_slice(&rows[..keep_positive]);
    shaped.extend_from_slice(&rows[rows.len() - keep_negative..]);
    shaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pathway: &str, nes: f64) -> EnrichmentRow {
        EnrichmentRow {
            pathway: pathway.to_string(),
            nes,
            padj: 0.01,
            enriched_count: 10,
            set_size: 50,
        }
    }

    #[test]
    fn test_top_and_bottom_five() {
        // 7 positive, 6 negative, all nonzero
        let rows: Vec<EnrichmentRow> = (1..=7)
            .map(|i| row(&format!("up{}", i), i as f64))
            .chain((1..=6).map(|i| row(&format!("dn{}", i), -(i as f64))))
            .collect();

        let shaped = shape_for_display(rows, 5);
        assert_eq!(shaped.len(), 10);

        // Sorted descending
        for w in shaped.windows(2) {
            assert!(w[0].nes >= w[1].nes);
        }
        assert_eq!(shaped[0].pathway, "up7");
        assert_eq!(shaped[9].pathway, "dn6");
    }

    #[test]
    fn test_one_sided_results_keep_only_that_side() {
        // 12 positive rows, no negative: output is exactly 5
        let rows: Vec<EnrichmentRow> = (1..=12)
            .map(|i| row(&format!("up{}", i), i as f64))
            .collect();

        let shaped = shape_for_display(rows, 5);
        assert_eq!(shaped.len(), 5);
        assert!(shaped.iter().all(|r| r.nes > 0.0));
        assert_eq!(shaped[0].pathway, "up12");
    }

    #[test]
    fn test_zero_scores_dropped() {
        let rows = vec![row("a", 1.0), row("zero", 0.0), row("b", -1.0)];
        let shaped = shape_for_display(rows, 5);
        assert_eq!(shaped.len(), 2);
        assert!(shaped.iter().all(|r| r.pathway != "zero"));
    }

    #[test]
    fn test_fewer_rows_than_cutoff_all_kept() {
        let rows = vec![row("a", 2.0), row("b", 1.0), row("c", -0.5)];
        let shaped = shape_for_display(rows, 5);
        assert_eq!(shaped.len(), 3);
    }

    #[test]
    fn test_stable_tie_break() {
        let rows = vec![row("first", 1.0), row("second", 1.0), row("third", 1.0)];
        let shaped = shape_for_display(rows, 5);
        let names: Vec<&str> = shaped.iter().map(|r| r.pathway.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_gene_ratio() {
        let r = row("a", 1.0);
        assert!((r.gene_ratio() - 0.2).abs() < 1e-12);
    }
}
