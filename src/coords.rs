//! Flat/3D voxel index mapping
//!
//! Volumes are stored as flat vectors with z varying fastest: for a volume
//! of shape (sx, sy, sz), flat index = x*sy*sz + y*sz + z.

/// Convert a flat voxel index to (x, y, z) coordinates.
///
/// # Arguments
/// * `idx` - Flat index, must be in `[0, sx*sy*sz)`
/// * `shape` - Volume dimensions (sx, sy, sz)
pub fn index_1d_to_3d(idx: usize, shape: (usize, usize, usize)) -> (usize, usize, usize) {
    let (sx, sy, sz) = shape;
    debug_assert!(idx < sx * sy * sz, "flat index {} out of range", idx);
    let plane = sy * sz;
    let x = idx / plane;
    let y = (idx - x * plane) / sz;
    let z = idx - x * plane - y * sz;
    (x, y, z)
}

/// Convert signed (x, y, z) coordinates to a signed flat index.
///
/// Coordinates outside the volume are not clamped: they yield a flat index
/// that is negative, past the end, or aliased into an adjacent slab. Callers
/// deciding neighborhood membership must discard out-of-volume coordinates
/// before converting.
pub fn index_3d_to_1d(coord: [i64; 3], shape: (usize, usize, usize)) -> i64 {
    let (_sx, sy, sz) = shape;
    coord[0] * (sy * sz) as i64 + coord[1] * sz as i64 + coord[2]
}

/// Batch version of [`index_3d_to_1d`] over a list of coordinate triples.
pub fn indices_3d_to_1d(coords: &[[i64; 3]], shape: (usize, usize, usize)) -> Vec<i64> {
    coords.iter().map(|&c| index_3d_to_1d(c, shape)).collect()
}
