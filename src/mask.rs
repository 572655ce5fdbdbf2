//! Mask flattening and compact voxel indexing
//!
//! A voxel is in-mask iff its mask value is non-zero. In-mask voxels are
//! compacted into an ordered retained set; the map back from flat index to
//! retained-set position is what neighbor lookups go through.

use std::collections::HashMap;

/// Ordered flat indices of the non-zero voxels of a flattened mask.
pub fn mask_indices(mask: &[f64]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|(_, &v)| v != 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Lookup from flat voxel index to position in the retained voxel set.
///
/// Built from the final retained set (after zero-variance pruning), so a hit
/// always refers to a column of the normalized time-course matrix. Lookups
/// take a signed index: candidates that fall outside the flat index range
/// (negative or past the end) are simply absent, and position 0 is a real
/// hit, never confused with "not retained".
#[derive(Debug, Clone)]
pub struct MaskIndexMap {
    map: HashMap<usize, usize>,
}

impl MaskIndexMap {
    /// Build the map from the retained voxel set; `iv[c]` maps to position `c`.
    pub fn from_retained(iv: &[usize]) -> Self {
        let map = iv.iter().enumerate().map(|(c, &flat)| (flat, c)).collect();
        MaskIndexMap { map }
    }

    /// Retained-set position of a flat index, or `None` if not retained.
    pub fn get(&self, flat: i64) -> Option<usize> {
        if flat < 0 {
            return None;
        }
        self.map.get(&(flat as usize)).copied()
    }

    /// Number of retained voxels.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
