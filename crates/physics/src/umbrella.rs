//! Umbrella geometry, re-derived every tick from the pointer.

use engine_core::Viewport;
use glam::Vec2;

/// Fixed umbrella dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UmbrellaGeometry {
    pub canopy_radius: f32,
    pub stem_height: f32,
    pub hook_radius: f32,
}

impl Default for UmbrellaGeometry {
    fn default() -> Self {
        Self {
            canopy_radius: 70.0,
            stem_height: 80.0,
            hook_radius: 20.0,
        }
    }
}

/// Gap between the stem's lower end and the viewport bottom.
const STEM_FOOT_GAP: f32 = 5.0;

/// The umbrella for the current tick. The canopy is the upper half of a disk
/// centred on `center`; the stem hangs from there down toward the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Umbrella {
    pub center: Vec2,
    pub geometry: UmbrellaGeometry,
    /// Viewport bottom the stem is anchored to.
    pub ground_y: f32,
}

impl Umbrella {
    /// Resolve the umbrella from the pointer's x. A missing pointer puts the
    /// umbrella at the viewport center; any x is clamped into the viewport.
    pub fn resolve(pointer_x: Option<f32>, viewport: &Viewport, geometry: UmbrellaGeometry) -> Self {
        let x = viewport.clamp_x(pointer_x.unwrap_or_else(|| viewport.center_x()));
        Self {
            center: Vec2::new(x, viewport.height - geometry.stem_height),
            geometry,
            ground_y: viewport.height,
        }
    }

    pub fn canopy_radius(&self) -> f32 {
        self.geometry.canopy_radius
    }

    /// Top of the stem (the canopy center).
    pub fn stem_top(&self) -> Vec2 {
        self.center
    }

    /// Lower end of the stem, where the hook starts.
    pub fn stem_bottom(&self) -> Vec2 {
        Vec2::new(self.center.x, self.ground_y - STEM_FOOT_GAP)
    }

    /// Center of the hook's quarter arc (opens to the left of the stem).
    pub fn hook_center(&self) -> Vec2 {
        Vec2::new(self.center.x - self.geometry.hook_radius, self.ground_y - STEM_FOOT_GAP)
    }
}
