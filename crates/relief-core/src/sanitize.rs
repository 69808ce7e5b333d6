//! Void repair.
//!
//! Every negative sample is replaced with the arithmetic mean of the whole
//! tile, taken before any replacement. The mean deliberately includes the
//! void samples themselves, which pulls the fill value down on tiles with
//! many voids; when it drops below zero the repaired tile still holds
//! negative cells and the report says so.
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ReliefError;
use crate::heightfield::HeightField;
use crate::Result;

/// Outcome of one repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SanitizeReport {
    /// Peak-to-peak amplitude before repair.
    pub amplitude_before: i32,
    /// Peak-to-peak amplitude after repair.
    pub amplitude_after: i32,
    /// Mean of all samples before repair.
    pub mean: f64,
    /// Value written into invalid cells (mean truncated toward zero).
    pub fill_value: i16,
    /// Number of cells that were negative before repair.
    pub replaced: usize,
    /// Number of cells still negative after repair.
    pub remaining: usize,
}

impl SanitizeReport {
    /// True when the fill value was itself negative and voids survived.
    pub fn is_degenerate(&self) -> bool {
        self.remaining > 0
    }

    /// Turn a degenerate repair into [`ReliefError::DegenerateFill`].
    pub fn ensure_clean(self) -> Result<Self> {
        if self.is_degenerate() {
            return Err(ReliefError::DegenerateFill {
                fill_value: self.fill_value,
                remaining: self.remaining,
            });
        }
        Ok(self)
    }
}

/// Replace every negative sample of `hf` with the pre-repair mean, in place.
pub fn sanitize(hf: &mut HeightField) -> Result<SanitizeReport> {
    hf.validate()?;

    info!("cleaning invalid samples");
    let amplitude_before = hf.amplitude();
    let mean = hf.mean();
    // Float-to-int16 assignment truncates toward zero.
    let fill_value = mean as i16;

    let mut replaced = 0usize;
    for v in hf.data.iter_mut() {
        if *v < 0 {
            *v = fill_value;
            replaced += 1;
        }
    }

    let amplitude_after = hf.amplitude();
    let remaining = if fill_value < 0 { replaced } else { 0 };

    info!(amplitude_before, "amplitude before cleaning");
    info!(amplitude_after, replaced, fill_value, "amplitude after cleaning");
    if remaining > 0 {
        warn!(
            mean,
            fill_value,
            remaining,
            "fill value is negative; invalid samples remain after cleaning"
        );
    }

    Ok(SanitizeReport {
        amplitude_before,
        amplitude_after,
        mean,
        fill_value,
        replaced,
        remaining,
    })
}
