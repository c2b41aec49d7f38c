//! Rain physics: umbrella geometry, canopy contact, drop state machine and pool.

pub mod collision;
pub mod particle;
pub mod pool;
pub mod umbrella;

pub use collision::*;
pub use particle::*;
pub use pool::*;
pub use umbrella::*;
