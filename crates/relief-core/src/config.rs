use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coords::TileOrigin;
use crate::decode::SAMPLES_3_ARC_SECOND;
use crate::hillshade::LightSource;
use crate::Result;

/// File name of the rendered figure, written next to the input tile.
pub const OUTPUT_FILE: &str = "results.png";

/// Pipeline configuration. Defaults describe a 3 arc-second tile at 32°S 70°W
/// lit from azimuth 100°, altitude 45°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    /// Directory holding the tile; the rendered figure is written here too.
    pub data_dir: PathBuf,
    pub data_file: String,
    /// Latitude of the tile's south-west corner, degrees.
    pub init_lat: i32,
    /// Longitude of the tile's south-west corner, degrees.
    pub init_lon: i32,
    /// Samples per side: 1201 for 3 arc-second tiles, 3601 for 1 arc-second.
    pub samples: usize,
    pub light: LightSource,
    pub vertical_exaggeration: f64,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            data_file: "S32W070.hgt".to_string(),
            init_lat: -32,
            init_lon: -70,
            samples: SAMPLES_3_ARC_SECOND,
            light: LightSource::default(),
            vertical_exaggeration: 1.0,
        }
    }
}

impl ReliefConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(OUTPUT_FILE)
    }

    pub fn origin(&self) -> TileOrigin {
        TileOrigin::new(self.init_lat, self.init_lon)
    }

    /// Replace `init_lat`/`init_lon` with the corner encoded in `data_file`.
    pub fn with_tile_origin(mut self) -> Result<Self> {
        let origin = TileOrigin::parse(&self.data_file)?;
        self.init_lat = origin.lat;
        self.init_lon = origin.lon;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ReliefConfig::default();
        assert_eq!(cfg.samples, 1201);
        assert_eq!(cfg.light, LightSource::new(100.0, 45.0));
        assert_eq!(cfg.data_path(), PathBuf::from("data/S32W070.hgt"));
        assert_eq!(cfg.output_path(), PathBuf::from("data/results.png"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ReliefConfig =
            serde_json::from_str(r#"{ "samples": 3601, "light": { "azimuth_deg": 315.0, "altitude_deg": 30.0 } }"#)
                .unwrap();
        assert_eq!(cfg.samples, 3601);
        assert_eq!(cfg.light.azimuth_deg, 315.0);
        assert_eq!(cfg.init_lat, -32);
        assert_eq!(cfg.vertical_exaggeration, 1.0);
    }

    #[test]
    fn origin_from_tile_name() {
        let cfg = ReliefConfig {
            data_file: "N25E056.hgt".to_string(),
            ..ReliefConfig::default()
        }
        .with_tile_origin()
        .unwrap();
        assert_eq!(cfg.origin(), TileOrigin::new(25, 56));
    }

    #[test]
    fn bad_tile_name_is_an_error() {
        let cfg = ReliefConfig {
            data_file: "tile.bin".to_string(),
            ..ReliefConfig::default()
        };
        assert!(cfg.with_tile_origin().is_err());
    }
}
