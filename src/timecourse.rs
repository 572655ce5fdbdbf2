//! Time-course extraction, z-scoring, and variance pruning
//!
//! The 4D dataset arrives as a t-major flat buffer: value(t, flat) =
//! `timeseries[t * n_voxels_total + flat]`. In-mask columns are z-scored per
//! voxel; voxels with zero variance are dropped from the retained set here,
//! before the index map is built, so the compact indexing stays consistent
//! across datasets that differ only in degenerate voxels.

/// Z-scored time courses for the retained voxel set, stored column-major so
/// that one voxel's time course is a contiguous slice.
#[derive(Debug, Clone)]
pub struct Timecourses {
    data: Vec<f64>,
    n_timepoints: usize,
    n_voxels: usize,
}

impl Timecourses {
    pub fn n_timepoints(&self) -> usize {
        self.n_timepoints
    }

    /// Number of retained voxels (columns).
    pub fn n_voxels(&self) -> usize {
        self.n_voxels
    }

    /// Time course of retained voxel `j` (length `n_timepoints`).
    pub fn column(&self, j: usize) -> &[f64] {
        &self.data[j * self.n_timepoints..(j + 1) * self.n_timepoints]
    }
}

/// Extract, z-score, and prune the in-mask voxel time courses.
///
/// Each column is centered and divided by its population standard deviation
/// (divide by T). Columns whose variance is zero (or not finite) would turn
/// into NaN; they are dropped from the retained set instead.
///
/// # Arguments
/// * `timeseries` - t-major flat buffer of length `n_timepoints * n_voxels_total`
/// * `iv0` - ordered flat indices of in-mask voxels
///
/// # Returns
/// The normalized T x m matrix and the final retained set `iv` (m entries),
/// column-aligned with each other.
pub fn normalize_timecourses(
    timeseries: &[f64],
    n_timepoints: usize,
    n_voxels_total: usize,
    iv0: &[usize],
) -> (Timecourses, Vec<usize>) {
    let t = n_timepoints;
    let mut data = Vec::with_capacity(t * iv0.len());
    let mut iv = Vec::with_capacity(iv0.len());
    let mut column = vec![0.0; t];

    for &flat in iv0 {
        for (ti, c) in column.iter_mut().enumerate() {
            *c = timeseries[ti * n_voxels_total + flat];
        }

        let mean = column.iter().sum::<f64>() / t as f64;
        let var = column.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / t as f64;
        if !(var > 0.0 && var.is_finite()) {
            continue;
        }

        let std = var.sqrt();
        data.extend(column.iter().map(|&v| (v - mean) / std));
        iv.push(flat);
    }

    let n_voxels = iv.len();
    (
        Timecourses {
            data,
            n_timepoints: t,
            n_voxels,
        },
        iv,
    )
}
