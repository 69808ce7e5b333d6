//! Pipeline orchestrator: decode → repair → axes → hillshade.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ReliefConfig;
use crate::coords::CoordinateGrid;
use crate::decode::{decode_grid, read_grid};
use crate::heightfield::HeightField;
use crate::hillshade::{hillshade_exaggerated, IntensityField};
use crate::sanitize::{sanitize, SanitizeReport};
use crate::Result;

/// Everything a renderer needs from one tile.
#[derive(Debug, Clone, Serialize)]
pub struct ReliefProducts {
    /// Repaired height field.
    pub heightfield: HeightField,
    pub sanitize: SanitizeReport,
    pub coords: CoordinateGrid,
    pub intensity: IntensityField,
}

pub struct ReliefPipeline {
    config: ReliefConfig,
    strict: bool,
}

impl ReliefPipeline {
    pub fn new(config: ReliefConfig) -> Self {
        Self { config, strict: false }
    }

    /// In strict mode a negative fill value aborts the run instead of
    /// only being logged.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &ReliefConfig {
        &self.config
    }

    /// Read the configured tile from disk and run every stage.
    pub fn run(&self) -> Result<ReliefProducts> {
        let hf = read_grid(self.config.data_path(), self.config.samples)?;
        self.process(hf)
    }

    /// Run every stage on an in-memory tile.
    pub fn run_bytes(&self, bytes: &[u8]) -> Result<ReliefProducts> {
        let hf = decode_grid(bytes, self.config.samples)?;
        self.process(hf)
    }

    /// Repair, locate and shade an already-decoded tile.
    pub fn process(&self, mut heightfield: HeightField) -> Result<ReliefProducts> {
        let report = sanitize(&mut heightfield)?;
        if self.strict {
            report.ensure_clean()?;
        } else if report.is_degenerate() {
            warn!(remaining = report.remaining, "continuing with unrepaired samples");
        }

        let coords = CoordinateGrid::for_origin(self.config.origin(), heightfield.size())?;
        let (lat_min, lat_max, lon_min, lon_max) = coords.extent();
        info!(lat_min, lat_max, lon_min, lon_max, "coordinate axes built");

        let intensity = hillshade_exaggerated(
            &heightfield,
            &self.config.light,
            self.config.vertical_exaggeration,
        )?;
        info!(
            min = intensity.min_value(),
            max = intensity.max_value(),
            "hillshade computed"
        );

        Ok(ReliefProducts {
            heightfield,
            sanitize: report,
            coords,
            intensity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::encode_grid;
    use crate::error::ReliefError;
    use crate::heightfield::VOID_ELEVATION;

    fn config(samples: usize) -> ReliefConfig {
        ReliefConfig { samples, ..ReliefConfig::default() }
    }

    #[test]
    fn runs_all_stages_on_bytes() {
        // mean = (42_800 − 32_768) / 9 ≈ 1114.7
        let hf = HeightField::from_rows(&[
            [5000, 5100, 5200],
            [5300, VOID_ELEVATION, 5400],
            [5500, 5600, 5700],
        ])
        .unwrap();
        let products = ReliefPipeline::new(config(3)).run_bytes(&encode_grid(&hf)).unwrap();

        assert_eq!(products.heightfield.count_invalid(), 0);
        assert_eq!(products.heightfield.get(1, 1), 1114);
        assert!(!products.sanitize.is_degenerate());
        assert_eq!(products.sanitize.replaced, 1);
        assert_eq!(products.coords.latitudes.len(), 3);
        assert_eq!(products.coords.longitudes[0], -70.0);
        assert_eq!(products.intensity.data.len(), 9);
    }

    #[test]
    fn wrong_sample_count_is_a_decode_error() {
        let hf = HeightField::new(3, 1).unwrap();
        let err = ReliefPipeline::new(config(4)).run_bytes(&encode_grid(&hf)).unwrap_err();
        assert!(matches!(err, ReliefError::Decode { expected: 32, actual: 18 }));
    }

    #[test]
    fn oversized_configured_samples_is_a_decode_error() {
        let err = ReliefPipeline::new(config(usize::MAX)).run_bytes(&[0u8; 8]).unwrap_err();
        assert!(matches!(err, ReliefError::Decode { actual: 8, .. }));
    }

    #[test]
    fn strict_mode_rejects_degenerate_fill() {
        let hf = HeightField::from_rows(&[[VOID_ELEVATION, VOID_ELEVATION], [100, 200]]).unwrap();
        let lenient = ReliefPipeline::new(config(2)).process(hf.clone()).unwrap();
        assert!(lenient.sanitize.is_degenerate());
        assert_eq!(lenient.heightfield.count_invalid(), 2);

        let err = ReliefPipeline::new(config(2)).strict(true).process(hf).unwrap_err();
        assert!(matches!(err, ReliefError::DegenerateFill { .. }));
    }
}
