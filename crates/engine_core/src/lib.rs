//! Core engine types shared by every simulation crate.
//!
//! This crate provides the foundational types used across all systems:
//! - Frame clock (tick counter at a fixed assumed rate)
//! - Viewport bounds
//! - Small common components (travel side, countdowns)

pub mod components;
pub mod time;
pub mod viewport;

pub use components::*;
pub use time::*;
pub use viewport::*;

// Re-export commonly used types
pub use glam::Vec2;
