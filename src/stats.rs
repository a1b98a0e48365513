//! Statistical utility functions shared across modules
//!
//! Row-wise z-scoring, significance transforms, and Benjamini-Hochberg
//! adjustment used by the reshaper, the volcano presenter, and the
//! enrichment module.

/// Smallest adjusted p-value admitted into -log10 transforms.
///
/// An adjusted p-value of exactly 0 would map to infinity; it is clamped
/// to this floor instead so ranking scores and volcano y-values stay finite.
pub const MIN_PADJ: f64 = 1e-300;

/// -log10 of an adjusted p-value, clamped away from zero.
///
/// Returns NaN for a NaN input (missing p-value stays missing).
pub fn neg_log10_padj(padj: f64) -> f64 {
    if padj.is_nan() {
        return f64::NAN;
    }
    -padj.max(MIN_PADJ).log10()
}

/// Z-score a slice in place: subtract the mean, divide by the sample
/// standard deviation (n - 1 denominator).
///
/// A zero-variance slice becomes all-NaN. That outcome is deliberate: a
/// degenerate row must be visible downstream, not silently zeroed.
pub fn z_score_row(values: &mut [f64]) {
    let n = values.len();
    if n < 2 {
        for v in values.iter_mut() {
            *v = f64::NAN;
        }
        return;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64;
    let sd = var.sqrt();

    for v in values.iter_mut() {
        *v = (*v - mean) / sd;
    }
}

/// Apply Benjamini-Hochberg FDR correction to p-values.
///
/// NaN entries stay NaN and do not count toward the number of tests.
/// Returns adjusted p-values that control the false discovery rate.
pub fn benjamini_hochberg(pvalues: &[f64]) -> Vec<f64> {
    let n = pvalues.len();
    if n == 0 {
        return vec![];
    }

    let mut indices: Vec<usize> = (0..n).collect();

    // Sort indices by p-value, NaN at the end
    indices.sort_by(|&a, &b| {
        let pa = pvalues[a];
        let pb = pvalues[b];
        if pa.is_nan() && pb.is_nan() {
            std::cmp::Ordering::Equal
        } else if pa.is_nan() {
            std::cmp::Ordering::Greater
        } else if pb.is_nan() {
            std::cmp::Ordering::Less
        } else {
            pa.partial_cmp(&pb).unwrap()
        }
    });

    let m = pvalues.iter().filter(|p| p.is_finite()).count();
    if m == 0 {
        return vec![f64::NAN; n];
    }

    let mut padj = vec![f64::NAN; n];
    let mut cummin = f64::INFINITY;
    let mut rank = m;

    for &i in indices.iter().rev() {
        let p = pvalues[i];
        if p.is_finite() {
            let adj = (p * m as f64 / rank as f64).min(1.0);
            cummin = cummin.min(adj);
            padj[i] = cummin;
            rank -= 1;
        }
    }

    padj
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_fixed_point() {
        let mut row = vec![1.0, 2.0, 3.0, 4.0];
        z_score_row(&mut row);

        let mean: f64 = row.iter().sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12, "z-scored mean should be 0, got {}", mean);

        // Re-applying z-scoring is a fixed point (mean 0, unit variance)
        let before = row.clone();
        z_score_row(&mut row);
        for (a, b) in before.iter().zip(row.iter()) {
            assert!((a - b).abs() < 1e-10, "z-score not idempotent: {} vs {}", a, b);
        }
    }

    #[test]
    fn test_z_score_zero_variance_is_nan() {
        let mut row = vec![5.0, 5.0, 5.0, 5.0];
        z_score_row(&mut row);
        assert!(row.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_neg_log10_clamps_zero() {
        let y = neg_log10_padj(0.0);
        assert!(y.is_finite());
        assert!((y - 300.0).abs() < 1.0);
        assert!(neg_log10_padj(f64::NAN).is_nan());
        assert!((neg_log10_padj(0.05) - 1.3010299956639813).abs() < 1e-12);
    }

    #[test]
    fn test_bh_basic() {
        let pvalues = vec![0.01, 0.04, 0.03, 0.02];
        let padj = benjamini_hochberg(&pvalues);

        for (p, adj) in pvalues.iter().zip(padj.iter()) {
            assert!(*adj >= *p);
            assert!(*adj <= 1.0);
        }
    }

    #[test]
    fn test_bh_with_nan() {
        let pvalues = vec![0.01, f64::NAN, 0.03, 0.02];
        let padj = benjamini_hochberg(&pvalues);

        assert!(padj[0].is_finite());
        assert!(padj[1].is_nan());
        assert!(padj[2].is_finite());
        assert!(padj[3].is_finite());
    }
}
