//! Elevation profiles sampled every `stride` lines across a tile.
use serde::{Deserialize, Serialize};

use crate::error::ReliefError;
use crate::heightfield::HeightField;
use crate::Result;

/// Default spacing between extracted profiles.
pub const DEFAULT_PROFILE_STRIDE: usize = 20;

/// Which lines of the grid a profile follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileAxis {
    /// One profile per row.
    NorthSouth,
    /// One profile per column (rows of the transposed grid).
    EastWest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Row (NorthSouth) or column (EastWest) index.
    pub index: usize,
    pub values: Vec<i16>,
}

/// Extract every `stride`-th row or column of `hf`, starting at index 0.
pub fn extract_profiles(hf: &HeightField, axis: ProfileAxis, stride: usize) -> Result<Vec<Profile>> {
    hf.validate()?;
    if stride == 0 {
        return Err(ReliefError::Shape {
            width: hf.width,
            height: hf.height,
            len: hf.data.len(),
            reason: "profile stride must be positive",
        });
    }

    let n = hf.size();
    let profiles = (0..n)
        .step_by(stride)
        .map(|index| {
            let values = match axis {
                ProfileAxis::NorthSouth => hf.data[index * n..(index + 1) * n].to_vec(),
                ProfileAxis::EastWest => (0..n).map(|r| hf.get(r, index)).collect(),
            };
            Profile { index, values }
        })
        .collect();
    Ok(profiles)
}
