//! Fixed-capacity drop pool. Drops are spawned at a limited rate until the pool
//! is full and are then recycled in place forever.

use engine_core::{FrameClock, Viewport};
use rand::Rng;

use crate::collision::CanopyCollider;
use crate::particle::{Particle, ParticleEvent, ParticleParams};

/// Per-tick transition counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolEvents {
    pub landed: usize,
    pub released: usize,
    pub recycled: usize,
}

#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    /// Spawn at most one drop every this many frames.
    spawn_interval: u32,
}

impl ParticlePool {
    pub fn new(capacity: usize, spawn_interval: u32) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            spawn_interval,
        }
    }

    /// Append a fresh drop if there is room and the frame gate allows it.
    pub fn try_spawn(
        &mut self,
        clock: &FrameClock,
        rng: &mut impl Rng,
        viewport: &Viewport,
        params: &ParticleParams,
    ) -> bool {
        if self.particles.len() >= self.capacity || !clock.every(self.spawn_interval) {
            return false;
        }
        self.particles.push(Particle::spawn(rng, viewport, params));
        true
    }

    /// Update every drop. Drops never interact, so order does not matter.
    pub fn update(
        &mut self,
        wind: f32,
        canopy: &CanopyCollider,
        params: &ParticleParams,
        viewport: &Viewport,
        rng: &mut impl Rng,
    ) -> PoolEvents {
        let mut events = PoolEvents::default();
        for p in &mut self.particles {
            match p.update(wind, canopy, params, viewport, rng) {
                Some(ParticleEvent::Landed) => events.landed += 1,
                Some(ParticleEvent::Released) => events.released += 1,
                Some(ParticleEvent::Recycled) => events.recycled += 1,
                None => {}
            }
        }
        events
    }

    /// Clamp every drop's x into the viewport after a resize.
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        for p in &mut self.particles {
            p.clamp_to(viewport);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn sliding_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_sliding()).count()
    }
}
