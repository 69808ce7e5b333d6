//! Hillshade: illumination of a height field by a distant light.
//!
//! Per cell, with `gx`/`gy` the gradient along rows/columns:
//!   slope   = π/2 − atan(√(gx² + gy²))
//!   aspect  = atan2(−gx, gy)
//!   shaded  = sin(alt)·sin(slope) + cos(alt)·cos(slope)·cos((az − π/2) − aspect)
//!   value   = 255 · (shaded + 1) / 2
//! where `az` is the compass azimuth turned into `360 − azimuth` and both
//! angles are in radians. Values are not clamped.
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gradient::gradient;
use crate::heightfield::HeightField;
use crate::Result;

#[cfg(feature = "threading")]
use rayon::prelude::*;

/// Direction of the light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Compass bearing of the light, degrees.
    pub azimuth_deg: f64,
    /// Elevation of the light above the horizon, degrees.
    pub altitude_deg: f64,
}

impl LightSource {
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self { azimuth_deg, altitude_deg }
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::new(100.0, 45.0)
    }
}

/// Illumination values, row-major, same shape as the shaded height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityField {
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl IntensityField {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn min_value(&self) -> f64 {
        self.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Light angles resolved once per field.
struct Illumination {
    sin_alt: f64,
    cos_alt: f64,
    /// `azimuth_rad − π/2`
    az_offset: f64,
}

impl Illumination {
    fn new(light: &LightSource) -> Self {
        let azimuth = 360.0 - light.azimuth_deg;
        let azimuth_rad = azimuth * PI / 180.0;
        let altitude_rad = light.altitude_deg * PI / 180.0;
        Self {
            sin_alt: altitude_rad.sin(),
            cos_alt: altitude_rad.cos(),
            az_offset: azimuth_rad - PI / 2.0,
        }
    }

    #[inline]
    fn shade(&self, gx: f64, gy: f64) -> f64 {
        let slope = PI / 2.0 - (gx * gx + gy * gy).sqrt().atan();
        let aspect = (-gx).atan2(gy);
        let shaded = self.sin_alt * slope.sin()
            + self.cos_alt * slope.cos() * (self.az_offset - aspect).cos();
        255.0 * (shaded + 1.0) / 2.0
    }
}

/// Shade `hf` with the given light.
///
/// Fails with [`crate::ReliefError::Shape`] for empty, non-square or 1×1
/// fields.
pub fn hillshade(hf: &HeightField, light: &LightSource) -> Result<IntensityField> {
    hillshade_exaggerated(hf, light, 1.0)
}

/// Shade `hf` with both gradient components scaled by `z_factor`, which is
/// the same as shading the field with its heights multiplied by `z_factor`.
pub fn hillshade_exaggerated(
    hf: &HeightField,
    light: &LightSource,
    z_factor: f64,
) -> Result<IntensityField> {
    let grad = gradient(hf)?;
    let sun = Illumination::new(light);
    debug!(
        azimuth = light.azimuth_deg,
        altitude = light.altitude_deg,
        z_factor,
        size = grad.size,
        "computing hillshade"
    );

    #[cfg(feature = "threading")]
    let data: Vec<f64> = grad
        .d_row
        .par_iter()
        .zip(grad.d_col.par_iter())
        .map(|(&gx, &gy)| sun.shade(gx * z_factor, gy * z_factor))
        .collect();

    #[cfg(not(feature = "threading"))]
    let data: Vec<f64> = grad
        .d_row
        .iter()
        .zip(grad.d_col.iter())
        .map(|(&gx, &gy)| sun.shade(gx * z_factor, gy * z_factor))
        .collect();

    Ok(IntensityField {
        data,
        width: grad.size,
        height: grad.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReliefError;
    use approx::assert_abs_diff_eq;

    /// Straight evaluation of the formula for a single gradient pair.
    fn reference(gx: f64, gy: f64, azimuth: f64, altitude: f64) -> f64 {
        let azimuth = 360.0 - azimuth;
        let slope = PI / 2.0 - (gx * gx + gy * gy).sqrt().atan();
        let aspect = (-gx).atan2(gy);
        let azimuthrad = azimuth * PI / 180.0;
        let altituderad = altitude * PI / 180.0;
        let shaded = altituderad.sin() * slope.sin()
            + altituderad.cos() * slope.cos() * ((azimuthrad - PI / 2.0) - aspect).cos();
        255.0 * (shaded + 1.0) / 2.0
    }

    #[test]
    fn planar_three_by_three_matches_formula() {
        let hf = HeightField::from_rows(&[[10, 20, 30], [15, 25, 35], [20, 30, 40]]).unwrap();
        let out = hillshade(&hf, &LightSource::new(100.0, 45.0)).unwrap();

        assert_eq!((out.width, out.height), (3, 3));
        // Gradient is (5, 10) at every cell of this plane.
        let expected = reference(5.0, 10.0, 100.0, 45.0);
        for &v in &out.data {
            assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(expected, 49.461007624285735, epsilon = 1e-9);
    }

    #[test]
    fn flat_field_is_uniform_sin_altitude() {
        let hf = HeightField::new(16, 250).unwrap();
        for altitude in [10.0, 30.0, 45.0, 80.0] {
            let out = hillshade(&hf, &LightSource::new(315.0, altitude)).unwrap();
            let expected = 255.0 * ((altitude * PI / 180.0).sin() + 1.0) / 2.0;
            for &v in &out.data {
                assert_abs_diff_eq!(v, expected, epsilon = 1e-12);
            }
        }
        let out = hillshade(&hf, &LightSource::new(0.0, 30.0)).unwrap();
        assert_abs_diff_eq!(out.get(3, 4), 191.25, epsilon = 1e-9);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let mut hf = HeightField::new(9, 0).unwrap();
        for r in 0..9 {
            for c in 0..9 {
                hf.set(r, c, ((r * 37 + c * 91) % 200) as i16);
            }
        }
        let light = LightSource::default();
        let a = hillshade(&hf, &light).unwrap();
        let b = hillshade(&hf, &light).unwrap();
        let bits = |f: &IntensityField| f.data.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn unit_exaggeration_matches_plain_hillshade() {
        let hf = HeightField::from_rows(&[[0, 50, 90], [10, 80, 300], [40, 20, 5]]).unwrap();
        let light = LightSource::default();
        assert_eq!(
            hillshade(&hf, &light).unwrap(),
            hillshade_exaggerated(&hf, &light, 1.0).unwrap()
        );
    }

    #[test]
    fn exaggeration_steepens_shading_contrast() {
        let hf = HeightField::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
        let light = LightSource::new(315.0, 45.0);
        let plain = hillshade(&hf, &light).unwrap();
        let steep = hillshade_exaggerated(&hf, &light, 10.0).unwrap();
        let spread = |f: &IntensityField| f.max_value() - f.min_value();
        assert!(spread(&steep) > spread(&plain));
    }

    #[test]
    fn malformed_input_fails_fast() {
        let single = HeightField::new(1, 5).unwrap();
        assert!(matches!(
            hillshade(&single, &LightSource::default()),
            Err(ReliefError::Shape { .. })
        ));

        let ragged = HeightField { data: vec![1, 2, 3, 4, 5, 6], width: 3, height: 2 };
        assert!(matches!(
            hillshade(&ragged, &LightSource::default()),
            Err(ReliefError::Shape { .. })
        ));
    }
}
