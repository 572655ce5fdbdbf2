//! Common test utilities for conn-core integration tests

/// Create a binary sphere mask on a 3D volume
///
/// Voxels within `radius` of the center are 1, all others 0. Uses the
/// core's flat convention: index = x*sy*sz + y*sz + z (z varies fastest).
pub fn sphere_mask(
    dims: (usize, usize, usize),
    center: (f64, f64, f64),
    radius: f64,
) -> Vec<f64> {
    let (sx, sy, sz) = dims;
    let r2 = radius * radius;
    let mut mask = vec![0.0; sx * sy * sz];

    for x in 0..sx {
        for y in 0..sy {
            for z in 0..sz {
                let dx = x as f64 - center.0;
                let dy = y as f64 - center.1;
                let dz = z as f64 - center.2;
                if dx * dx + dy * dy + dz * dz <= r2 {
                    mask[x * sy * sz + y * sz + z] = 1.0;
                }
            }
        }
    }

    mask
}

/// All-ones mask covering the whole volume
pub fn full_mask(dims: (usize, usize, usize)) -> Vec<f64> {
    vec![1.0; dims.0 * dims.1 * dims.2]
}

/// Deterministic t-major time series with a distinct non-constant course
/// per voxel
pub fn varied_timeseries(n_timepoints: usize, dims: (usize, usize, usize)) -> Vec<f64> {
    let n_voxels = dims.0 * dims.1 * dims.2;
    let mut ts = vec![0.0; n_timepoints * n_voxels];
    for t in 0..n_timepoints {
        for v in 0..n_voxels {
            ts[t * n_voxels + v] =
                ((t + 1) as f64 * (0.9 + 0.37 * v as f64)).sin() + 0.1 * (v as f64).cos();
        }
    }
    ts
}

/// Overwrite one voxel's course with a constant (zero-variance) signal
pub fn flatten_voxel(ts: &mut [f64], n_voxels: usize, voxel: usize, value: f64) {
    let n_timepoints = ts.len() / n_voxels;
    for t in 0..n_timepoints {
        ts[t * n_voxels + voxel] = value;
    }
}

/// Split a 3N output vector into (rows, cols, weights)
pub fn split_triplets(out: &[f64]) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
    assert_eq!(out.len() % 3, 0, "output length must be divisible by 3");
    let n = out.len() / 3;
    let rows = out[0..n].iter().map(|&v| v as usize).collect();
    let cols = out[n..2 * n].iter().map(|&v| v as usize).collect();
    let weights = out[2 * n..].to_vec();
    (rows, cols, weights)
}
