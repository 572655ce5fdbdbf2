//! Conn-Core: local spatial-correlation connectivity for fMRI volumes
//!
//! This crate builds a sparse voxel-to-voxel connectivity graph from a 4D
//! fMRI dataset, suitable as input to spatially constrained clustering.
//! Edge weights are Pearson correlations between whole-volume functional
//! connectivity maps, restricted to 3x3x3 stencil neighbors.
//!
//! # Modules
//! - `coords`: flat/3D voxel index mapping
//! - `mask`: mask flattening and compact voxel indexing
//! - `timecourse`: time-course z-scoring and variance pruning
//! - `neighborhood`: 3x3x3 stencil neighborhood assembly
//! - `fcmap`: FC maps, spatial correlation, thresholding
//! - `triplet`: sparse triplet accumulation
//! - `scorr`: the end-to-end connectivity pipeline

// Core modules
pub mod coords;
pub mod mask;
pub mod timecourse;
pub mod neighborhood;
pub mod fcmap;
pub mod triplet;
pub mod scorr;

// I/O modules
pub mod nifti_io;
pub mod npy_io;
