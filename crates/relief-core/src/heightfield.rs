use serde::{Deserialize, Serialize};

use crate::error::ReliefError;
use crate::Result;

/// Void marker used by SRTM tiles. Any negative sample is treated as invalid,
/// this is just the value the format writes.
pub const VOID_ELEVATION: i16 = -32768;

/// A square elevation grid in metres, row-major, one i16 per sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightField {
    /// Row-major elevation values in metres.
    pub data: Vec<i16>,
    pub width: usize,
    pub height: usize,
}

impl HeightField {
    /// Create a new `size`×`size` field filled with the given value.
    pub fn new(size: usize, fill: i16) -> Result<Self> {
        let count = cell_count(size, size).ok_or(ReliefError::Shape {
            width: size,
            height: size,
            len: 0,
            reason: "sample count overflows usize",
        })?;
        if count == 0 {
            return Err(ReliefError::Shape {
                width: size,
                height: size,
                len: 0,
                reason: "grid is empty",
            });
        }
        Ok(Self {
            data: vec![fill; count],
            width: size,
            height: size,
        })
    }

    /// Build a field from row-major samples. Fails unless `data` holds exactly
    /// `size`² values.
    pub fn from_vec(size: usize, data: Vec<i16>) -> Result<Self> {
        let hf = Self {
            data,
            width: size,
            height: size,
        };
        hf.validate()?;
        Ok(hf)
    }

    /// Build a field from nested rows. Handy for small literal grids.
    pub fn from_rows<R: AsRef<[i16]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(ReliefError::Shape {
                width,
                height: size,
                len: rows.iter().map(|r| r.as_ref().len()).sum(),
                reason: "rows have unequal length",
            });
        }
        let data: Vec<i16> = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        Self::from_vec(size, data)
    }

    /// Side length N of the grid.
    pub fn size(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i16 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: i16) {
        self.data[row * self.width + col] = val;
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[i16]> {
        self.data.chunks_exact(self.width.max(1))
    }

    /// Check the square, non-empty, fully-populated invariant.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.width == 0 || self.height == 0 {
            Some("grid is empty")
        } else if self.width != self.height {
            Some("grid is not square")
        } else if cell_count(self.width, self.height) != Some(self.data.len()) {
            Some("sample count does not match dimensions")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ReliefError::Shape {
                width: self.width,
                height: self.height,
                len: self.data.len(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn min_elevation(&self) -> i16 {
        self.data.iter().copied().min().unwrap_or(0)
    }

    pub fn max_elevation(&self) -> i16 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Peak-to-peak amplitude (max − min). Widened so void-laden tiles
    /// don't overflow i16.
    pub fn amplitude(&self) -> i32 {
        self.max_elevation() as i32 - self.min_elevation() as i32
    }

    /// Arithmetic mean over every sample, invalid ones included.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.data.iter().map(|&v| v as i64).sum();
        sum as f64 / self.data.len() as f64
    }

    /// Number of samples below zero.
    pub fn count_invalid(&self) -> usize {
        self.data.iter().filter(|&&v| v < 0).count()
    }
}

/// `width · height`, or `None` when it does not fit in a usize.
pub(crate) fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)
}
