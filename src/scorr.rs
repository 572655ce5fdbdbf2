//! Local spatial-correlation connectivity
//!
//! Builds the sparse voxel-to-voxel connectivity graph of a 4D dataset: for
//! every retained voxel, the edge weight to each of its in-mask stencil
//! neighbors is the Pearson correlation between the two voxels' whole-volume
//! functional connectivity maps, thresholded and collected as triplets.

use crate::fcmap::{apply_threshold, corrcoef_rows, fc_maps};
use crate::mask::{mask_indices, MaskIndexMap};
use crate::neighborhood::stencil_neighborhood;
use crate::timecourse::normalize_timecourses;
use crate::triplet::TripletAccumulator;

/// Construct the local connectivity triplet vector.
///
/// # Arguments
/// * `mask` - flattened mask volume; a voxel is in-mask iff non-zero
/// * `mask_dims` - mask spatial extent (sx, sy, sz)
/// * `timeseries` - t-major flattened 4D dataset, length t * sx * sy * sz
/// * `ts_dims` - dataset extent (t, sx, sy, sz)
/// * `thresh` - correlations strictly below this value are set to 0
///
/// # Returns
/// The concatenated [rows ++ cols ++ weights] vector of length 3N, where N
/// is the total number of emitted edges. Row and column entries are flat
/// voxel indices in the original mask space. An all-zero mask (or a dataset
/// whose in-mask voxels all have zero variance) yields an empty vector.
pub fn local_connectivity_scorr(
    mask: &[f64],
    mask_dims: (usize, usize, usize),
    timeseries: &[f64],
    ts_dims: (usize, usize, usize, usize),
    thresh: f64,
) -> Result<Vec<f64>, String> {
    let (sx, sy, sz) = mask_dims;
    let (nt, tx, ty, tz) = ts_dims;

    if (tx, ty, tz) != (sx, sy, sz) {
        return Err(format!(
            "mask/time-series shape mismatch: mask is {}x{}x{}, time-series is {}x{}x{}",
            sx, sy, sz, tx, ty, tz
        ));
    }
    let n_voxels = sx * sy * sz;
    if mask.len() != n_voxels {
        return Err(format!(
            "mask length {} does not match its dimensions {}x{}x{}",
            mask.len(),
            sx, sy, sz
        ));
    }
    if timeseries.len() != nt * n_voxels {
        return Err(format!(
            "time-series length {} does not match its dimensions {}x{}x{}x{}",
            timeseries.len(),
            nt, tx, ty, tz
        ));
    }

    // In-mask voxels, then the final retained set after variance pruning.
    // The index map is built from the pruned set so dropped voxels can never
    // reappear through a neighbor lookup.
    let iv0 = mask_indices(mask);
    if iv0.is_empty() {
        return Ok(Vec::new());
    }
    let (tc, iv) = normalize_timecourses(timeseries, nt, n_voxels, &iv0);
    if iv.is_empty() {
        return Ok(Vec::new());
    }
    let map = MaskIndexMap::from_retained(&iv);

    let mut acc = TripletAccumulator::new();
    for &seed in &iv {
        let nb = stencil_neighborhood(seed, mask_dims, &map)?;
        let k = nb.flat.len();

        let fc = fc_maps(&tc, &nb.compact);
        let mut r = corrcoef_rows(&fc, k, tc.n_voxels());
        apply_threshold(&mut r, thresh);

        // The seed's row of R: correlations of every neighbor against the seed
        let seed_row = &r[nb.self_pos * k..(nb.self_pos + 1) * k];
        acc.push_seed(&nb.flat, seed, seed_row);
    }

    Ok(acc.into_flat_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varied_timeseries(nt: usize, n_voxels: usize) -> Vec<f64> {
        // Deterministic, distinct, non-constant course per voxel
        let mut ts = vec![0.0; nt * n_voxels];
        for t in 0..nt {
            for v in 0..n_voxels {
                ts[t * n_voxels + v] =
                    ((t + 1) as f64 * (v as f64 * 0.7 + 1.0)).sin() + 0.05 * v as f64;
            }
        }
        ts
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let mask = vec![1.0; 8];
        let ts = vec![0.0; 5 * 27];
        let err = local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 3, 3, 3), 0.5).unwrap_err();
        assert!(err.contains("shape mismatch"), "unexpected error: {}", err);
    }

    #[test]
    fn test_wrong_buffer_lengths_are_fatal() {
        let mask = vec![1.0; 7];
        let ts = vec![0.0; 5 * 8];
        assert!(local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 2, 2, 2), 0.5).is_err());

        let mask = vec![1.0; 8];
        let ts = vec![0.0; 39];
        assert!(local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 2, 2, 2), 0.5).is_err());
    }

    #[test]
    fn test_empty_mask_yields_empty_output() {
        let mask = vec![0.0; 8];
        let ts = varied_timeseries(5, 8);
        let out = local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 2, 2, 2), 0.5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_all_degenerate_voxels_yield_empty_output() {
        let mask = vec![1.0; 8];
        let ts = vec![3.0; 5 * 8]; // every time course constant
        let out = local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 2, 2, 2), 0.5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_length_is_triple_of_edges() {
        let mask = vec![1.0; 8];
        let ts = varied_timeseries(5, 8);
        let out = local_connectivity_scorr(&mask, (2, 2, 2), &ts, (5, 2, 2, 2), -1.0).unwrap();
        assert_eq!(out.len() % 3, 0);
        // In a full 2x2x2 volume every voxel neighbors every other: 8 seeds x 8 edges
        assert_eq!(out.len() / 3, 64);
    }

    #[test]
    fn test_isolated_seed_emits_self_edge() {
        // Two retained voxels too far apart to share a stencil: each seed's
        // correlation matrix degenerates to 1x1, and each still emits
        // exactly one self-edge with weight 1
        let mut mask = vec![0.0; 125];
        mask[0] = 1.0; // (0,0,0)
        mask[124] = 1.0; // (4,4,4)
        let ts = varied_timeseries(6, 125);

        let out = local_connectivity_scorr(&mask, (5, 5, 5), &ts, (6, 5, 5, 5), 0.5).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(&out[0..2], &[0.0, 124.0], "rows");
        assert_eq!(&out[2..4], &[0.0, 124.0], "cols");
        assert_eq!(&out[4..6], &[1.0, 1.0], "self-weights");

        let out = local_connectivity_scorr(&mask, (5, 5, 5), &ts, (6, 5, 5, 5), 1.5).unwrap();
        assert_eq!(out.len(), 6, "thresholded self-edges are still emitted");
        assert_eq!(&out[4..6], &[0.0, 0.0]);
    }
}
