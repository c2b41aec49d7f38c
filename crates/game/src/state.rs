//! Simulation context: owns every piece of mutable scene state and drives one tick.

use std::fmt;

use engine_core::{FrameClock, Viewport};
use physics::{CanopyCollider, ParticleParams, ParticlePool, PoolEvents, Umbrella, UmbrellaGeometry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weather::{NoiseSource, PerlinNoise, WindField};

use crate::config::SimConfig;
use crate::snapshot::{FrameSnapshot, ParticleInstance};
use crate::walker::WalkerScheduler;

/// Walker status for logs and HUDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerStatus {
    Absent,
    Waiting,
    Walking,
}

impl WalkerStatus {
    pub fn name(&self) -> &'static str {
        match self {
            WalkerStatus::Absent => "absent",
            WalkerStatus::Waiting => "waiting",
            WalkerStatus::Walking => "walking",
        }
    }
}

/// Per-tick summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimStats {
    pub frame: u64,
    pub wind: f32,
    pub particles: usize,
    pub sliding: usize,
    pub walker: WalkerStatus,
    pub events: PoolEvents,
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} | wind {:+.2} | drops {} ({} sliding) | walker {}",
            self.frame,
            self.wind,
            self.particles,
            self.sliding,
            self.walker.name()
        )
    }
}

/// The whole scene. Tick order is fixed: wind, umbrella, spawn, drops, walker.
pub struct Simulation<N = PerlinNoise> {
    clock: FrameClock,
    viewport: Viewport,
    wind: WindField<N>,
    umbrella: Umbrella,
    pool: ParticlePool,
    walker: WalkerScheduler,
    particle_params: ParticleParams,
    geometry: UmbrellaGeometry,
    last_events: PoolEvents,
    rng: StdRng,
}

impl Simulation<PerlinNoise> {
    /// Perlin-driven scene. A configured seed makes the run reproducible.
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = make_rng(config.seed);
        let noise_seed = config.seed.unwrap_or_else(|| rng.gen());
        Self::build(config, PerlinNoise::new(noise_seed), rng)
    }
}

impl<N: NoiseSource> Simulation<N> {
    /// Scene with a custom wind noise source.
    pub fn with_noise(config: &SimConfig, noise: N) -> Self {
        Self::build(config, noise, make_rng(config.seed))
    }

    fn build(config: &SimConfig, noise: N, mut rng: StdRng) -> Self {
        let clock = FrameClock::new(config.frame_rate);
        let viewport = config.viewport();
        let geometry = config.umbrella_geometry();
        let walker = WalkerScheduler::new(config.walker_params(), &clock, &mut rng);
        Self {
            umbrella: Umbrella::resolve(None, &viewport, geometry),
            wind: WindField::new(config.wind_params(), noise),
            pool: ParticlePool::new(config.max_particles, config.spawn_interval),
            particle_params: config.particle_params(),
            last_events: PoolEvents::default(),
            clock,
            viewport,
            walker,
            geometry,
            rng,
        }
    }

    /// Run one tick. `pointer_x` is the pointer's horizontal position, if known.
    pub fn tick(&mut self, pointer_x: Option<f32>) {
        self.clock.advance();
        let wind = self.wind.tick();
        self.umbrella = Umbrella::resolve(pointer_x, &self.viewport, self.geometry);

        self.pool
            .try_spawn(&self.clock, &mut self.rng, &self.viewport, &self.particle_params);
        let canopy = CanopyCollider::new(&self.umbrella, self.particle_params.radius);
        self.last_events = self.pool.update(
            wind,
            &canopy,
            &self.particle_params,
            &self.viewport,
            &mut self.rng,
        );

        self.walker
            .update(&self.umbrella, &self.viewport, &self.clock, &mut self.rng);
    }

    /// Apply a viewport resize. Drops keep their motion state; only x is clamped.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.pool.clamp_to(&self.viewport);
        log::debug!("viewport resized to {}x{}", width, height);
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let walker = self.walker.walker().copied();
        FrameSnapshot {
            frame: self.clock.frame_count(),
            wind: self.wind.wind(),
            umbrella: self.umbrella,
            walker_pose: walker.map(|w| w.pose(&self.viewport)),
            walker,
            particles: self.pool.particles().iter().map(ParticleInstance::from).collect(),
        }
    }

    pub fn stats(&self) -> SimStats {
        let walker = match self.walker.walker() {
            None => WalkerStatus::Absent,
            Some(w) if w.walking => WalkerStatus::Walking,
            Some(_) => WalkerStatus::Waiting,
        };
        SimStats {
            frame: self.clock.frame_count(),
            wind: self.wind.wind(),
            particles: self.pool.len(),
            sliding: self.pool.sliding_count(),
            walker,
            events: self.last_events,
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn wind(&self) -> f32 {
        self.wind.wind()
    }

    pub fn umbrella(&self) -> &Umbrella {
        &self.umbrella
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn walker(&self) -> &WalkerScheduler {
        &self.walker
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
