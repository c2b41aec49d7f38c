//! Slowly drifting horizontal wind.
//!
//! Each tick advances a noise-time accumulator, maps the noise sample to
//! `[-max, max]` and eases the current wind toward it. The easing keeps the
//! signal free of per-tick jitter so drop trajectories stay fluid.

use crate::noise_source::{NoiseSource, PerlinNoise};

/// Tuning for the wind field.
#[derive(Debug, Clone, Copy)]
pub struct WindParams {
    /// Magnitude bound of the wind (px/tick).
    pub max: f32,
    /// Noise-time advanced per tick.
    pub noise_step: f64,
    /// Fraction of the gap to the target closed per tick (0..=1).
    pub response: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            max: 3.0,
            noise_step: 0.005,
            response: 0.05,
        }
    }
}

/// Scalar wind, updated once per tick.
#[derive(Debug, Clone)]
pub struct WindField<N = PerlinNoise> {
    /// Current wind in px/tick (positive blows right).
    wind: f32,
    /// Monotonic noise-time accumulator.
    phase: f64,
    params: WindParams,
    source: N,
}

impl WindField<PerlinNoise> {
    /// Perlin-driven wind seeded for reproducibility.
    pub fn seeded(params: WindParams, seed: u64) -> Self {
        Self::new(params, PerlinNoise::new(seed))
    }
}

impl<N: NoiseSource> WindField<N> {
    pub fn new(params: WindParams, source: N) -> Self {
        Self {
            wind: 0.0,
            phase: 0.0,
            params,
            source,
        }
    }

    /// Advance one tick and return the new wind.
    pub fn tick(&mut self) -> f32 {
        self.phase += self.params.noise_step;
        let target = self.target_at(self.phase);
        self.wind += self.params.response * (target - self.wind);
        self.wind
    }

    /// Noise sample at `phase` mapped linearly onto `[-max, max]`.
    fn target_at(&self, phase: f64) -> f32 {
        let n = self.source.sample(phase);
        -self.params.max + n * 2.0 * self.params.max
    }

    pub fn wind(&self) -> f32 {
        self.wind
    }
}
