//! Viewport bounds in screen pixels (y grows downward).

/// Current drawable area. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Clamp an x coordinate into `[0, width]`.
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(0.0, self.width)
    }
}
