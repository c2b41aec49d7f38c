//! Read-only view of one tick for renderers.

use bytemuck::{Pod, Zeroable};
use physics::{Particle, Umbrella};

use crate::walker::{Walker, WalkerPose};

/// Raw drop data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    /// 1 while sliding on the canopy, 0 while falling.
    pub sliding: u32,
    pub _pad: u32,
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            sliding: p.is_sliding() as u32,
            _pad: 0,
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub wind: f32,
    pub umbrella: Umbrella,
    pub walker: Option<Walker>,
    pub walker_pose: Option<WalkerPose>,
    pub particles: Vec<ParticleInstance>,
}

impl FrameSnapshot {
    /// Drop instances as bytes, ready for a vertex buffer.
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
