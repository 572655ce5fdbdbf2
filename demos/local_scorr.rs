//! Local spatial-correlation connectivity on real NIfTI data
//!
//! Usage: cargo run --release --example local_scorr -- <infile> <maskfile> <outfile> <thresh>
//!
//! Reads a 4D fMRI dataset and a 3D mask, builds the local connectivity
//! triplet vector, and saves it as a .npy file for the downstream
//! parcellation step.

use std::path::Path;
use std::time::Instant;

use conn_core::nifti_io::{read_mask_file, read_timeseries_file};
use conn_core::npy_io::save_npy_file;
use conn_core::scorr::local_connectivity_scorr;

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        return Err(format!(
            "Usage: {} <infile.nii[.gz]> <maskfile.nii[.gz]> <outfile.npy> <thresh>",
            args[0]
        ));
    }
    let infile = Path::new(&args[1]);
    let maskfile = Path::new(&args[2]);
    let outfile = Path::new(&args[3]);
    let thresh: f64 = args[4]
        .parse()
        .map_err(|e| format!("Bad threshold '{}': {}", args[4], e))?;

    let total_start = Instant::now();

    // ========================================================================
    // Load mask and 4D dataset
    // ========================================================================
    println!("[STEP 1] Loading NIfTI data...");
    let start = Instant::now();

    let mask = read_mask_file(maskfile)?;
    let (sx, sy, sz) = mask.dims;
    let in_mask = mask.data.iter().filter(|&&v| v != 0.0).count();
    println!(
        "[INFO] Mask: {}x{}x{}, {} in-mask voxels ({:.1}%)",
        sx, sy, sz,
        in_mask,
        100.0 * in_mask as f64 / (sx * sy * sz) as f64
    );

    let ts = read_timeseries_file(infile)?;
    let (nt, tx, ty, tz) = ts.dims;
    println!("[INFO] Dataset: {}x{}x{}, {} timepoints", tx, ty, tz, nt);
    println!("[INFO] Loaded in {:.2?}", start.elapsed());

    // ========================================================================
    // Build the connectivity triplets
    // ========================================================================
    println!("\n[STEP 2] Building local connectivity (thresh = {})...", thresh);
    let start = Instant::now();

    let out = local_connectivity_scorr(&mask.data, mask.dims, &ts.data, ts.dims, thresh)?;
    let n_edges = out.len() / 3;
    let n_nonzero = out[2 * n_edges..].iter().filter(|&&w| w != 0.0).count();
    println!(
        "[INFO] {} edges ({} with non-zero weight) in {:.2?}",
        n_edges,
        n_nonzero,
        start.elapsed()
    );

    // ========================================================================
    // Save the triplet vector
    // ========================================================================
    println!("\n[STEP 3] Saving output...");
    save_npy_file(outfile, &out)?;
    println!(
        "[INFO] Saved {} ({} values)",
        outfile.display(),
        out.len()
    );

    println!("\n[INFO] Finished in {:.2?}", total_start.elapsed());
    Ok(())
}
