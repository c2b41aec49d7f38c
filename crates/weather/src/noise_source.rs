//! Coherent noise sampled along a single time axis.

use noise::{NoiseFn, Perlin};

/// A deterministic, continuous noise function of time with output in `[0, 1]`.
pub trait NoiseSource {
    fn sample(&self, t: f64) -> f32;
}

/// Derive a deterministic u32 noise seed from a world seed and an offset.
/// Same (seed, offset) always gives the same result so runs are reproducible.
#[inline]
pub fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Off-lattice row so the 1D slice never sits on integer y, where Perlin flattens out.
const SLICE_Y: f64 = 0.371;

/// Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(deterministic_noise_seed(seed, 0)),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, t: f64) -> f32 {
        let n = self.perlin.get([t, SLICE_Y]);
        (((n + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Fixed output, mostly useful to pin the wind in tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _t: f64) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}
