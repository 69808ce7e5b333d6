//! Error types for the relief pipeline.

use thiserror::Error;

/// Errors raised while decoding, repairing or shading an elevation grid.
#[derive(Debug, Error)]
pub enum ReliefError {
    /// I/O error reading a grid file or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Byte stream length does not match the configured grid size.
    #[error("grid decode failed: expected {expected} bytes for the configured grid, got {actual}")]
    Decode {
        /// Expected byte count (N² · 2).
        expected: usize,
        /// Actual byte count of the stream.
        actual: usize,
    },

    /// Height field shape is not a usable square grid.
    #[error("malformed height field {width}x{height} with {len} samples: {reason}")]
    Shape {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
        /// Number of samples actually present.
        len: usize,
        /// Which invariant failed.
        reason: &'static str,
    },

    /// The pre-repair mean is itself negative, so invalid cells survive repair.
    #[error("fill value {fill_value} is negative; {remaining} invalid cells remain after repair")]
    DegenerateFill {
        /// Fill value written into the invalid cells.
        fill_value: i16,
        /// Number of cells still negative after repair.
        remaining: usize,
    },

    /// Tile name does not follow the `S32W070` convention.
    #[error("invalid tile name: {0}")]
    InvalidTileName(String),

    /// Byte count does not correspond to a standard tile resolution.
    #[error("unsupported grid size: {0} bytes (expected 25934402 or 2884802)")]
    UnsupportedGridSize(usize),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
