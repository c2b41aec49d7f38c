//! Weather for the rain scene: coherent noise and the smoothed wind field.

pub mod noise_source;
pub mod wind;

pub use noise_source::*;
pub use wind::*;
