//! Synthetic SRTM-style tiles for demos and tests.
//!
//! Terrain is fractional Brownian motion over Perlin noise: octaves with
//! amplitude gain^i and frequency 2^i, gain = 2^(−H). A seeded fraction of
//! cells is then overwritten with the void marker.
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::heightfield::{HeightField, VOID_ELEVATION};
use crate::Result;

struct Fbm {
    h: f64,
    octaves: u32,
    noise: Perlin,
}

impl Fbm {
    fn new(seed: u32, h: f64, octaves: u32) -> Self {
        Self { h, octaves, noise: Perlin::new(seed) }
    }

    /// Unscaled value, roughly ±1 for H≈0.75.
    fn sample(&self, x: f64, y: f64) -> f64 {
        let gain = 2.0f64.powf(-self.h);
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..self.octaves {
            value += amp * self.noise.get([x * freq, y * freq]);
            amp *= gain;
            freq *= 2.0;
        }
        value
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticParams {
    pub samples: usize,
    pub seed: u64,
    /// Mean elevation in metres.
    pub base_height: f64,
    /// Approximate half-range of the relief in metres.
    pub relief: f64,
    /// Hurst exponent of the fBm.
    pub hurst: f64,
    pub octaves: u32,
    /// Fraction of cells replaced with the void marker, 0–1.
    pub void_fraction: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            samples: 1201,
            seed: 42,
            base_height: 1500.0,
            relief: 1200.0,
            hurst: 0.75,
            octaves: 8,
            void_fraction: 0.001,
        }
    }
}

/// Build a synthetic tile. Zero samples is rejected as an empty grid.
pub fn synthetic_tile(params: &SyntheticParams) -> Result<HeightField> {
    let n = params.samples;
    let fbm = Fbm::new((params.seed & 0xFFFF_FFFF) as u32, params.hurst, params.octaves);
    let base_freq = 6.0 / n.max(1) as f64;

    let mut hf = HeightField::new(n, 0)?;
    for r in 0..n {
        for c in 0..n {
            let z = params.base_height
                + params.relief * fbm.sample(c as f64 * base_freq, r as f64 * base_freq);
            hf.set(r, c, z.round().clamp(0.0, i16::MAX as f64) as i16);
        }
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let fraction = params.void_fraction.clamp(0.0, 1.0);
    let mut voids = 0usize;
    for v in hf.data.iter_mut() {
        if rng.gen::<f64>() < fraction {
            *v = VOID_ELEVATION;
            voids += 1;
        }
    }
    debug!(samples = n, voids, "synthetic tile generated");

    Ok(hf)
}
