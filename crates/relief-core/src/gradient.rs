//! Finite-difference gradient of a height field, unit sample spacing.
//!
//! Interior cells use the centred difference `(f[i+1] − f[i−1]) / 2`; the
//! first and last cell along each axis use the one-sided difference with
//! their only neighbour.

use crate::error::ReliefError;
use crate::heightfield::HeightField;
use crate::Result;

/// Both gradient components, row-major, same shape as the source field.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// d/d(row), i.e. along axis 0.
    pub d_row: Vec<f64>,
    /// d/d(col), i.e. along axis 1.
    pub d_col: Vec<f64>,
    pub size: usize,
}

/// Compute the gradient of `hf` along rows and columns.
///
/// Needs at least two samples per axis for the boundary difference.
pub fn gradient(hf: &HeightField) -> Result<Gradient> {
    hf.validate()?;
    let n = hf.size();
    if n < 2 {
        return Err(ReliefError::Shape {
            width: hf.width,
            height: hf.height,
            len: hf.data.len(),
            reason: "gradient needs at least two samples per axis",
        });
    }

    let at = |r: usize, c: usize| hf.get(r, c) as f64;
    let mut d_row = vec![0.0f64; n * n];
    let mut d_col = vec![0.0f64; n * n];

    for r in 0..n {
        for c in 0..n {
            let idx = r * n + c;

            d_row[idx] = if r == 0 {
                at(1, c) - at(0, c)
            } else if r == n - 1 {
                at(n - 1, c) - at(n - 2, c)
            } else {
                (at(r + 1, c) - at(r - 1, c)) / 2.0
            };

            d_col[idx] = if c == 0 {
                at(r, 1) - at(r, 0)
            } else if c == n - 1 {
                at(r, n - 1) - at(r, n - 2)
            } else {
                (at(r, c + 1) - at(r, c - 1)) / 2.0
            };
        }
    }

    Ok(Gradient { d_row, d_col, size: n })
}
