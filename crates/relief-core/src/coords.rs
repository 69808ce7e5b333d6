//! Geographic axes for a one-degree tile and tile-name addressing.
//! All coordinate math uses f64.
use serde::{Deserialize, Serialize};

use crate::error::ReliefError;
use crate::Result;

/// South-west corner of a one-degree tile, in integer degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileOrigin {
    pub lat: i32,
    pub lon: i32,
}

impl TileOrigin {
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Parse an SRTM tile name such as `S32W070` or `n25e056.hgt`.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = || ReliefError::InvalidTileName(name.to_string());
        let stem = name
            .strip_suffix(".hgt")
            .or_else(|| name.strip_suffix(".HGT"))
            .unwrap_or(name);

        if stem.len() != 7 || !stem.is_ascii() {
            return Err(invalid());
        }

        let lat_sign = match &stem[0..1] {
            "N" | "n" => 1,
            "S" | "s" => -1,
            _ => return Err(invalid()),
        };
        let lon_sign = match &stem[3..4] {
            "E" | "e" => 1,
            "W" | "w" => -1,
            _ => return Err(invalid()),
        };
        let digits = |s: &str| -> Result<i32> {
            if !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())
        };
        let lat = digits(&stem[1..3])?;
        let lon = digits(&stem[4..7])?;

        Ok(Self {
            lat: lat * lat_sign,
            lon: lon * lon_sign,
        })
    }
}

/// Latitude and longitude axes matching the row and column indices of an
/// N×N tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateGrid {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
}

impl CoordinateGrid {
    /// Build both axes: `origin + i / samples` for `i` in `0..samples`.
    pub fn new(init_lat: i32, init_lon: i32, samples: usize) -> Result<Self> {
        if samples == 0 {
            return Err(ReliefError::Shape {
                width: 0,
                height: 0,
                len: 0,
                reason: "coordinate axes need at least one sample",
            });
        }
        Ok(Self {
            latitudes: axis(init_lat as f64, samples),
            longitudes: axis(init_lon as f64, samples),
        })
    }

    pub fn for_origin(origin: TileOrigin, samples: usize) -> Result<Self> {
        Self::new(origin.lat, origin.lon, samples)
    }

    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }

    /// `(lat_min, lat_max, lon_min, lon_max)` taken from the first and last
    /// axis entries, the way a raster extent is labelled.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let first = |v: &[f64]| v.first().copied().unwrap_or(f64::NAN);
        let last = |v: &[f64]| v.last().copied().unwrap_or(f64::NAN);
        (
            first(&self.latitudes),
            last(&self.latitudes),
            first(&self.longitudes),
            last(&self.longitudes),
        )
    }
}

/// One axis of `samples` values starting at `origin`, step `1 / samples`.
/// Generated by index so the length is exact and there is no drift.
pub fn axis(origin: f64, samples: usize) -> Vec<f64> {
    let step = 1.0 / samples as f64;
    (0..samples).map(|i| origin + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn axes_have_exact_length() {
        for n in [1usize, 2, 3, 7, 10, 1201, 3601] {
            let grid = CoordinateGrid::new(-32, -70, n).unwrap();
            assert_eq!(grid.latitudes.len(), n);
            assert_eq!(grid.longitudes.len(), n);
        }
    }

    #[test]
    fn axes_start_at_origin_and_stop_short_of_next_degree() {
        let n = 1201;
        let grid = CoordinateGrid::new(-32, -70, n).unwrap();
        assert_eq!(grid.latitudes[0], -32.0);
        assert_eq!(grid.longitudes[0], -70.0);

        let step = 1.0 / n as f64;
        assert_abs_diff_eq!(grid.latitudes[n - 1], -32.0 + 1.0 - step, epsilon = 1e-9);
        assert_abs_diff_eq!(grid.longitudes[n - 1], -70.0 + 1.0 - step, epsilon = 1e-9);
        assert!(grid.latitudes[n - 1] < -31.0);
    }

    #[test]
    fn single_sample_axis_is_the_origin() {
        let grid = CoordinateGrid::new(10, 20, 1).unwrap();
        assert_eq!(grid.latitudes, vec![10.0]);
        assert_eq!(grid.longitudes, vec![20.0]);
        assert_eq!(grid.extent(), (10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn zero_samples_rejected() {
        assert!(matches!(CoordinateGrid::new(0, 0, 0), Err(ReliefError::Shape { .. })));
    }

    #[test]
    fn tile_names_parse() {
        assert_eq!(TileOrigin::parse("S32W070.hgt").unwrap(), TileOrigin::new(-32, -70));
        assert_eq!(TileOrigin::parse("N25E056").unwrap(), TileOrigin::new(25, 56));
        assert_eq!(TileOrigin::parse("n00e000.HGT").unwrap(), TileOrigin::new(0, 0));
        assert!(TileOrigin::parse("X32W070.hgt").is_err());
        assert!(TileOrigin::parse("S3aW070.hgt").is_err());
        assert!(TileOrigin::parse("S32W070.tif").is_err());
        assert!(TileOrigin::parse("").is_err());
    }

    #[test]
    fn grid_from_tile_origin() {
        let origin = TileOrigin::parse("S32W070.hgt").unwrap();
        let grid = CoordinateGrid::for_origin(origin, 4).unwrap();
        assert_eq!(grid.latitudes, vec![-32.0, -31.75, -31.5, -31.25]);
        assert_eq!(grid.len(), 4);
    }
}
