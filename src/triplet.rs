//! Sparse triplet accumulation
//!
//! Edge triplets (row, column, weight) are appended per seed in iteration
//! order and serialized as one concatenated vector [rows ++ cols ++ weights]
//! of length 3N. No deduplication, sorting, or symmetrization is performed.

/// Append-only collector for (row, column, weight) edge triplets.
#[derive(Debug, Default, Clone)]
pub struct TripletAccumulator {
    rows: Vec<usize>,
    cols: Vec<usize>,
    weights: Vec<f64>,
}

impl TripletAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated triplets.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one seed's edges: every neighbor becomes a row, the seed is the
    /// column for all of them, and `weights` carries the seed's correlation
    /// row (same length and order as `neighbor_flat`).
    pub fn push_seed(&mut self, neighbor_flat: &[usize], seed_flat: usize, weights: &[f64]) {
        debug_assert_eq!(neighbor_flat.len(), weights.len());
        self.rows.extend_from_slice(neighbor_flat);
        self.cols.extend(std::iter::repeat(seed_flat).take(neighbor_flat.len()));
        self.weights.extend_from_slice(weights);
    }

    /// Serialize into the concatenated output vector [rows ++ cols ++ weights].
    /// Consumers recover N as (vector length) / 3.
    pub fn into_flat_vec(self) -> Vec<f64> {
        let n = self.rows.len();
        let mut out = Vec::with_capacity(3 * n);
        out.extend(self.rows.into_iter().map(|r| r as f64));
        out.extend(self.cols.into_iter().map(|c| c as f64));
        out.extend(self.weights);
        out
    }
}
