//! Umbrella-in-the-rain scene: configuration, pedestrian scheduling and the
//! simulation context that ties wind, drops and walker together.

pub mod config;
pub mod snapshot;
pub mod state;
pub mod walker;

pub use config::{ConfigError, SimConfig};
pub use snapshot::{FrameSnapshot, ParticleInstance};
pub use state::{SimStats, Simulation, WalkerStatus};
pub use walker::{Walker, WalkerEvent, WalkerParams, WalkerPose, WalkerScheduler};
