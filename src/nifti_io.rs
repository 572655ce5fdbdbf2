//! NIfTI ingestion for connectivity construction
//!
//! Loads a 3D mask volume and a 4D time-series dataset from NIfTI bytes or
//! files into the flat buffers the core consumes: masks in the C-order flat
//! convention (z varies fastest), time series t-major so each timepoint is
//! one contiguous spatial volume. Gzip compression is auto-detected.

use std::io::Cursor;
use std::path::Path;

use flate2::read::GzDecoder;
use nifti::volume::ndarray::IntoNdArray;
use nifti::{InMemNiftiObject, NiftiObject};
use ndarray::{Array, IxDyn};

/// A mask volume as a flat array with its spatial extent.
pub struct MaskVolume {
    /// Flattened mask, flat index = x*sy*sz + y*sz + z
    pub data: Vec<f64>,
    /// Spatial extent (sx, sy, sz)
    pub dims: (usize, usize, usize),
}

/// A 4D time-series dataset as a t-major flat array.
pub struct TimeseriesVolume {
    /// value(t, flat) = data[t * sx*sy*sz + flat]
    pub data: Vec<f64>,
    /// Extent (t, sx, sy, sz)
    pub dims: (usize, usize, usize, usize),
}

/// Check if bytes are gzip compressed
fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

/// Parse NIfTI bytes (gzipped or plain) into an f64 ndarray
fn read_volume(bytes: &[u8]) -> Result<Array<f64, IxDyn>, String> {
    let obj: InMemNiftiObject = if is_gzip(bytes) {
        let decoder = GzDecoder::new(Cursor::new(bytes));
        InMemNiftiObject::from_reader(decoder)
            .map_err(|e| format!("Failed to read gzipped NIfTI: {}", e))?
    } else {
        InMemNiftiObject::from_reader(Cursor::new(bytes))
            .map_err(|e| format!("Failed to read NIfTI: {}", e))?
    };

    obj.into_volume()
        .into_ndarray()
        .map_err(|e| format!("Failed to convert NIfTI volume to ndarray: {}", e))
}

/// Load a mask volume from NIfTI bytes.
///
/// Accepts a 3D volume, or a 4D volume whose 4th dimension is a singleton.
pub fn load_mask(bytes: &[u8]) -> Result<MaskVolume, String> {
    let array = read_volume(bytes)?;
    let shape = array.shape().to_vec();

    let (sx, sy, sz) = match shape.as_slice() {
        [sx, sy, sz] => (*sx, *sy, *sz),
        [sx, sy, sz, 1] => (*sx, *sy, *sz),
        other => {
            return Err(format!(
                "Expected a 3D mask volume, got shape {:?}",
                other
            ));
        }
    };

    // Flatten with z varying fastest to match the core's flat convention
    let mut data = Vec::with_capacity(sx * sy * sz);
    if shape.len() == 3 {
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    data.push(array[[x, y, z]]);
                }
            }
        }
    } else {
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    data.push(array[[x, y, z, 0]]);
                }
            }
        }
    }

    Ok(MaskVolume {
        data,
        dims: (sx, sy, sz),
    })
}

/// Load a 4D time-series dataset from NIfTI bytes.
///
/// The output buffer is t-major: timepoint t occupies
/// `data[t * n_voxels..(t + 1) * n_voxels]`, each volume flattened with z
/// varying fastest, matching the mask convention.
pub fn load_timeseries(bytes: &[u8]) -> Result<TimeseriesVolume, String> {
    let array = read_volume(bytes)?;
    let shape = array.shape().to_vec();

    let (sx, sy, sz, nt) = match shape.as_slice() {
        [sx, sy, sz, nt] => (*sx, *sy, *sz, *nt),
        other => {
            return Err(format!(
                "Expected a 4D time-series volume, got shape {:?}",
                other
            ));
        }
    };

    let mut data = Vec::with_capacity(nt * sx * sy * sz);
    for t in 0..nt {
        for x in 0..sx {
            for y in 0..sy {
                for z in 0..sz {
                    data.push(array[[x, y, z, t]]);
                }
            }
        }
    }

    Ok(TimeseriesVolume {
        data,
        dims: (nt, sx, sy, sz),
    })
}

/// Read a mask volume from a .nii or .nii.gz file
pub fn read_mask_file(path: &Path) -> Result<MaskVolume, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;
    load_mask(&bytes)
}

/// Read a 4D time-series dataset from a .nii or .nii.gz file
pub fn read_timeseries_file(path: &Path) -> Result<TimeseriesVolume, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;
    load_timeseries(&bytes)
}
