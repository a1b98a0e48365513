//! Hierarchical row ordering for the heatmap
//!
//! Average-linkage agglomerative clustering over Euclidean row distances.
//! Only the leaf order is needed for display, so no dendrogram is kept.

use ndarray::Array2;

/// Compute a display order for matrix rows via average-linkage clustering.
///
/// NaN rows (zero-variance genes) are placed after all finite rows rather
/// than entering the distance computation.
pub fn cluster_row_order(matrix: &Array2<f64>) -> Vec<usize> {
    let n = matrix.nrows();
    if n <= 1 {
        return (0..n).collect();
    }

    let finite: Vec<usize> = (0..n)
        .filter(|&i| matrix.row(i).iter().all(|v| v.is_finite()))
        .collect();
    let nan_rows: Vec<usize> = (0..n)
        .filter(|&i| matrix.row(i).iter().any(|v| !v.is_finite()))
        .collect();

    if finite.len() <= 1 {
        let mut order = finite;
        order.extend(nan_rows);
        return order;
    }

    // Pairwise Euclidean distances among finite rows
    let m = finite.len();
    let mut distances = vec![vec![0.0f64; m]; m];
    for a in 0..m {
        for b in (a + 1)..m {
            let d: f64 = matrix
                .row(finite[a])
                .iter()
                .zip(matrix.row(finite[b]).iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt();
            distances[a][b] = d;
            distances[b][a] = d;
        }
    }

    // Agglomerate with average linkage until one cluster remains
    let mut clusters: Vec<Vec<usize>> = (0..m).map(|i| vec![i]).collect();
    while clusters.len() > 1 {
        let mut min_dist = f64::INFINITY;
        let mut merge = (0, 1);
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let mut total = 0.0;
                for &a in &clusters[i] {
                    for &b in &clusters[j] {
                        total += distances[a][b];
                    }
                }
                let avg = total / (clusters[i].len() * clusters[j].len()) as f64;
                if avg < min_dist {
                    min_dist = avg;
                    merge = (i, j);
                }
            }
        }
        let absorbed = clusters.remove(merge.1);
        clusters[merge.0].extend(absorbed);
    }

    let mut order: Vec<usize> = clusters[0].iter().map(|&i| finite[i]).collect();
    order.extend(nan_rows);
    order
}
