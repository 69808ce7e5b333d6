//! SRTM `.hgt` grid codec.
//!
//! A tile is a flat array of big-endian i16 elevations, N×N samples, no
//! header or footer. N is 1201 for 3 arc-second tiles and 3601 for
//! 1 arc-second tiles; the caller supplies it.

use std::path::Path;

use tracing::{debug, info};

use crate::error::ReliefError;
use crate::heightfield::{cell_count, HeightField};
use crate::Result;

/// Samples per side of a 1 arc-second tile.
pub const SAMPLES_1_ARC_SECOND: usize = 3601;
/// Samples per side of a 3 arc-second tile.
pub const SAMPLES_3_ARC_SECOND: usize = 1201;

/// Decode `samples`² big-endian i16 values into a square height field.
///
/// The byte count must be exactly `samples² · 2`; truncated or padded input
/// is rejected with [`ReliefError::Decode`].
pub fn decode_grid(bytes: &[u8], samples: usize) -> Result<HeightField> {
    // A count that overflows can never match a real buffer.
    let expected = cell_count(samples, samples)
        .and_then(|cells| cells.checked_mul(2))
        .unwrap_or(usize::MAX);
    if bytes.len() != expected {
        return Err(ReliefError::Decode {
            expected,
            actual: bytes.len(),
        });
    }

    let data: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    HeightField::from_vec(samples, data)
}

/// Read and decode a grid file.
pub fn read_grid<P: AsRef<Path>>(path: P, samples: usize) -> Result<HeightField> {
    let path = path.as_ref();
    info!(path = %path.display(), samples, "reading elevation grid");
    let bytes = std::fs::read(path)?;
    debug!(bytes = bytes.len(), "grid file loaded");
    decode_grid(&bytes, samples)
}

/// Encode a height field back into the big-endian tile layout.
pub fn encode_grid(hf: &HeightField) -> Vec<u8> {
    let mut out = Vec::with_capacity(hf.data.len() * 2);
    for &v in &hf.data {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

/// Infer N from the byte length of a standard tile.
/// 1 arc-second: 3601 × 3601 × 2 = 25,934,402 bytes
/// 3 arc-second: 1201 × 1201 × 2 = 2,884,802 bytes
pub fn samples_from_byte_count(byte_count: usize) -> Result<usize> {
    [SAMPLES_1_ARC_SECOND, SAMPLES_3_ARC_SECOND]
        .into_iter()
        .find(|&n| n * n * 2 == byte_count)
        .ok_or(ReliefError::UnsupportedGridSize(byte_count))
}
