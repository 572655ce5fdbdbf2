//! 3x3x3 stencil neighborhood assembly
//!
//! Each seed voxel is paired with the 27 stencil positions around it (self
//! included). Candidates that fall outside the volume are dropped, not
//! clamped, so border seeds silently lose part of their stencil; the
//! survivors are then filtered through the mask index map so only retained
//! voxels remain.

use crate::coords::{index_1d_to_3d, index_3d_to_1d};
use crate::mask::MaskIndexMap;

/// The 27 stencil offsets, self offset (0,0,0) included. Emission order is
/// x fastest, then y, then z; surviving neighbors keep this order.
pub const STENCIL: [[i64; 3]; 27] = [
    [-1, -1, -1], [0, -1, -1], [1, -1, -1],
    [-1, 0, -1], [0, 0, -1], [1, 0, -1],
    [-1, 1, -1], [0, 1, -1], [1, 1, -1],
    [-1, -1, 0], [0, -1, 0], [1, -1, 0],
    [-1, 0, 0], [0, 0, 0], [1, 0, 0],
    [-1, 1, 0], [0, 1, 0], [1, 1, 0],
    [-1, -1, 1], [0, -1, 1], [1, -1, 1],
    [-1, 0, 1], [0, 0, 1], [1, 0, 1],
    [-1, 1, 1], [0, 1, 1], [1, 1, 1],
];

/// Surviving stencil neighbors of one seed voxel.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    /// Flat mask-space indices of the survivors, in stencil order.
    pub flat: Vec<usize>,
    /// Retained-set positions of the survivors, aligned with `flat`.
    pub compact: Vec<usize>,
    /// Position within `flat`/`compact` that equals the seed itself.
    pub self_pos: usize,
}

/// Assemble the surviving stencil neighborhood of `seed_flat`.
///
/// Returns an error when the seed does not match itself among the survivors:
/// the seed came from the retained set, so a missing self-match means the
/// mask index map is inconsistent with the retained set.
pub fn stencil_neighborhood(
    seed_flat: usize,
    shape: (usize, usize, usize),
    map: &MaskIndexMap,
) -> Result<Neighborhood, String> {
    let (sx, sy, sz) = shape;
    let (x, y, z) = index_1d_to_3d(seed_flat, shape);

    let mut flat = Vec::with_capacity(STENCIL.len());
    let mut compact = Vec::with_capacity(STENCIL.len());
    for off in STENCIL {
        let coord = [x as i64 + off[0], y as i64 + off[1], z as i64 + off[2]];
        let inside = coord[0] >= 0
            && coord[0] < sx as i64
            && coord[1] >= 0
            && coord[1] < sy as i64
            && coord[2] >= 0
            && coord[2] < sz as i64;
        if !inside {
            continue;
        }
        let candidate = index_3d_to_1d(coord, shape);
        if let Some(pos) = map.get(candidate) {
            flat.push(candidate as usize);
            compact.push(pos);
        }
    }

    let self_pos = flat
        .iter()
        .position(|&f| f == seed_flat)
        .ok_or_else(|| {
            format!(
                "seed voxel {} is missing from its own neighborhood; mask index map is inconsistent",
                seed_flat
            )
        })?;

    Ok(Neighborhood {
        flat,
        compact,
        self_pos,
    })
}
