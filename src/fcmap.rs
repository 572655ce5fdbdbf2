//! Functional connectivity maps and spatial correlation
//!
//! A neighbor's FC map is its whole-volume correlation profile: the dot
//! product of its z-scored time course with every retained voxel's z-scored
//! time course, divided by T-1. Edge weights are Pearson correlations
//! between FC-map rows, with NaN suppression and a hard threshold cutoff.

use crate::timecourse::Timecourses;

/// Compute the FC-map matrix for a list of neighbor voxels.
///
/// Row j is the profile of retained voxel `neighbors[j]` against the entire
/// retained set. Because the time courses are z-scored, the scaled dot
/// product equals the Pearson correlation of the raw series.
///
/// # Arguments
/// * `tc` - normalized time-course matrix (T x m)
/// * `neighbors` - retained-set positions of the k neighbors
///
/// # Returns
/// Row-major k x m matrix.
pub fn fc_maps(tc: &Timecourses, neighbors: &[usize]) -> Vec<f64> {
    let m = tc.n_voxels();
    let t = tc.n_timepoints();
    let scale = 1.0 / (t as f64 - 1.0);

    let mut fc = Vec::with_capacity(neighbors.len() * m);
    for &j in neighbors {
        let nb_col = tc.column(j);
        for q in 0..m {
            let col = tc.column(q);
            let dot: f64 = nb_col.iter().zip(col.iter()).map(|(&a, &b)| a * b).sum();
            fc.push(dot * scale);
        }
    }
    fc
}

/// Pearson correlation matrix among the rows of a row-major k x m matrix.
///
/// Entries involving a zero-variance row are 0 instead of NaN. The diagonal
/// is exactly 1 for rows with non-zero variance. k = 1 degenerates to a
/// single self-entry, so downstream indexing stays uniform.
pub fn corrcoef_rows(mat: &[f64], k: usize, m: usize) -> Vec<f64> {
    debug_assert_eq!(mat.len(), k * m);

    // Center each row and record its root sum of squares
    let mut centered = vec![0.0; k * m];
    let mut rss = vec![0.0; k];
    for a in 0..k {
        let row = &mat[a * m..(a + 1) * m];
        let mean = row.iter().sum::<f64>() / m as f64;
        let mut s2 = 0.0;
        for (q, &v) in row.iter().enumerate() {
            let c = v - mean;
            centered[a * m + q] = c;
            s2 += c * c;
        }
        rss[a] = s2.sqrt();
    }

    let mut r = vec![0.0; k * k];
    for a in 0..k {
        for b in 0..k {
            r[a * k + b] = if a == b {
                if rss[a] > 0.0 {
                    1.0
                } else {
                    0.0
                }
            } else if rss[a] > 0.0 && rss[b] > 0.0 {
                let dot: f64 = centered[a * m..(a + 1) * m]
                    .iter()
                    .zip(centered[b * m..(b + 1) * m].iter())
                    .map(|(&ca, &cb)| ca * cb)
                    .sum();
                (dot / (rss[a] * rss[b])).clamp(-1.0, 1.0)
            } else {
                0.0
            };
        }
    }
    r
}

/// Zero every entry strictly below `thresh`; entries at or above it pass
/// through unchanged, including entries equal to the threshold.
pub fn apply_threshold(mat: &mut [f64], thresh: f64) {
    for v in mat.iter_mut() {
        if *v < thresh {
            *v = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecourse::normalize_timecourses;

    fn toy_timecourses() -> Timecourses {
        // Three voxels, T = 4: voxel 1 tracks voxel 0, voxel 2 is anticorrelated
        let ts = vec![
            1.0, 2.0, 4.0, // t = 0
            2.0, 4.0, 3.0, // t = 1
            3.0, 6.0, 2.0, // t = 2
            4.0, 8.0, 1.0, // t = 3
        ];
        let (tc, iv) = normalize_timecourses(&ts, 4, 3, &[0, 1, 2]);
        assert_eq!(iv.len(), 3);
        tc
    }

    #[test]
    fn test_fc_maps_are_correlations() {
        let tc = toy_timecourses();
        let fc = fc_maps(&tc, &[0, 1, 2]);
        assert_eq!(fc.len(), 9);

        // Z-scored dot product / (T-1) of a voxel with itself is T/(T-1)
        let self_r = 4.0 / 3.0;
        assert!((fc[0] - self_r).abs() < 1e-12);
        // Voxel 1 is a linear function of voxel 0: same z-scores
        assert!((fc[1] - self_r).abs() < 1e-12);
        // Voxel 2 runs opposite
        assert!((fc[2] + self_r).abs() < 1e-12);
    }

    #[test]
    fn test_corrcoef_identical_rows() {
        let mat = vec![
            1.0, 2.0, 3.0, //
            1.0, 2.0, 3.0,
        ];
        let r = corrcoef_rows(&mat, 2, 3);
        for (i, &v) in r.iter().enumerate() {
            assert!((v - 1.0).abs() < 1e-12, "r[{}] = {}", i, v);
        }
    }

    #[test]
    fn test_corrcoef_anticorrelated_rows() {
        let mat = vec![
            1.0, 2.0, 3.0, //
            3.0, 2.0, 1.0,
        ];
        let r = corrcoef_rows(&mat, 2, 3);
        assert!((r[0] - 1.0).abs() < 1e-12);
        assert!((r[1] + 1.0).abs() < 1e-12);
        assert!((r[2] + 1.0).abs() < 1e-12);
        assert!((r[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corrcoef_constant_row_is_zeroed() {
        // Row 1 has zero variance: every entry touching it becomes 0, not NaN
        let mat = vec![
            1.0, 2.0, 3.0, //
            5.0, 5.0, 5.0,
        ];
        let r = corrcoef_rows(&mat, 2, 3);
        assert_eq!(r[0], 1.0);
        assert_eq!(r[1], 0.0);
        assert_eq!(r[2], 0.0);
        assert_eq!(r[3], 0.0);
        assert!(r.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_corrcoef_single_row() {
        let mat = vec![0.5, 1.5, -2.0];
        let r = corrcoef_rows(&mat, 1, 3);
        assert_eq!(r, vec![1.0]);

        let flat = vec![7.0, 7.0, 7.0];
        let r = corrcoef_rows(&flat, 1, 3);
        assert_eq!(r, vec![0.0]);
    }

    #[test]
    fn test_threshold_is_a_hard_cutoff() {
        let mut mat = vec![0.2999, 0.3, 0.30001, -0.5, 0.0, 1.0];
        apply_threshold(&mut mat, 0.3);
        assert_eq!(mat[0], 0.0, "below threshold must be zeroed");
        assert_eq!(mat[1], 0.3, "exactly at threshold must pass unchanged");
        assert_eq!(mat[2], 0.30001);
        assert_eq!(mat[3], 0.0, "negative values are below threshold");
        assert_eq!(mat[4], 0.0);
        assert_eq!(mat[5], 1.0);
    }
}
