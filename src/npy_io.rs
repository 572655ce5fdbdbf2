//! NPY persistence for the connectivity output vector
//!
//! Writes and reads 1D f64 arrays in the NPY v1.0 format, the container the
//! downstream clustering tools consume. Only the little-endian f64, C-order,
//! one-dimensional subset is supported.

use std::path::Path;

const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Serialize a 1D f64 array as NPY v1.0 bytes.
///
/// The header dict is padded with spaces so the data payload starts on a
/// 64-byte boundary, as the format prescribes.
pub fn save_npy(data: &[f64]) -> Vec<u8> {
    let dict = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({},), }}",
        data.len()
    );

    // magic(6) + version(2) + header-len(2) + dict + padding + newline
    let unpadded = 10 + dict.len() + 1;
    let pad = (64 - unpadded % 64) % 64;

    let mut header = dict.into_bytes();
    header.extend(std::iter::repeat(b' ').take(pad));
    header.push(b'\n');

    let mut out = Vec::with_capacity(10 + header.len() + data.len() * 8);
    out.extend_from_slice(NPY_MAGIC);
    out.push(1); // major version
    out.push(0); // minor version
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(&header);
    for &v in data {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// Parse NPY v1.0 bytes holding a 1D little-endian f64 array.
pub fn load_npy(bytes: &[u8]) -> Result<Vec<f64>, String> {
    if bytes.len() < 10 || &bytes[0..6] != NPY_MAGIC {
        return Err("Not an NPY file (bad magic)".to_string());
    }
    if bytes[6] != 1 {
        return Err(format!("Unsupported NPY version {}.{}", bytes[6], bytes[7]));
    }

    let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    if bytes.len() < 10 + header_len {
        return Err("Truncated NPY header".to_string());
    }
    let header = std::str::from_utf8(&bytes[10..10 + header_len])
        .map_err(|e| format!("NPY header is not valid UTF-8: {}", e))?;

    if !header.contains("'descr': '<f8'") {
        return Err(format!("Unsupported NPY dtype in header: {}", header.trim()));
    }
    if !header.contains("'fortran_order': False") {
        return Err("Fortran-order NPY arrays are not supported".to_string());
    }

    let n = parse_1d_shape(header)?;
    let payload = &bytes[10 + header_len..];
    if payload.len() != n * 8 {
        return Err(format!(
            "NPY payload is {} bytes, expected {} for shape ({},)",
            payload.len(),
            n * 8,
            n
        ));
    }

    let mut data = Vec::with_capacity(n);
    for chunk in payload.chunks_exact(8) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        data.push(f64::from_le_bytes(buf));
    }
    Ok(data)
}

/// Extract N from a "'shape': (N,)" header entry
fn parse_1d_shape(header: &str) -> Result<usize, String> {
    let start = header
        .find("'shape':")
        .and_then(|p| header[p..].find('(').map(|q| p + q + 1))
        .ok_or_else(|| format!("NPY header has no shape entry: {}", header.trim()))?;
    let rest = &header[start..];
    let end = rest
        .find(')')
        .ok_or_else(|| "Unterminated shape entry in NPY header".to_string())?;
    let inner = rest[..end].trim().trim_end_matches(',');
    if inner.contains(',') {
        return Err(format!("Expected a 1D NPY array, got shape ({})", rest[..end].trim()));
    }
    inner
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Bad NPY shape '{}': {}", inner, e))
}

/// Save a 1D f64 array to an .npy file
pub fn save_npy_file(path: &Path, data: &[f64]) -> Result<(), String> {
    std::fs::write(path, save_npy(data))
        .map_err(|e| format!("Failed to write file '{}': {}", path.display(), e))
}

/// Load a 1D f64 array from an .npy file
pub fn load_npy_file(path: &Path) -> Result<Vec<f64>, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;
    load_npy(&bytes)
}
