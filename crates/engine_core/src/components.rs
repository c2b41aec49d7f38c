//! Small components shared across the simulation.

/// Horizontal travel side. Left is -1, Right is +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Signed unit: -1.0 for Left, +1.0 for Right.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Side of `dx` relative to a center. Zero resolves to Right.
    pub fn from_offset(dx: f32) -> Self {
        if dx < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Countdown measured in frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    pub remaining: f32,
}

impl Countdown {
    pub fn new(frames: f32) -> Self {
        Self { remaining: frames }
    }

    /// Tick one frame. Returns true once the countdown has elapsed.
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1.0;
        self.remaining <= 0.0
    }
}
