//! Simulation configuration. Loaded from config.ron at startup.

use std::path::{Path, PathBuf};

use engine_core::Viewport;
use physics::{ParticleParams, UmbrellaGeometry};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use weather::WindParams;

use crate::walker::WalkerParams;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be in (0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("edge_eps must be in [0, π/2), got {0}")]
    EdgeEpsOutOfRange(f32),
    #[error("walker margins sum to {0}; start and stop distances would cross")]
    WalkerMarginsOverlap(f32),
    #[error("spawn_interval must be at least 1 tick")]
    ZeroSpawnInterval,
}

/// Tuning for the whole scene. Every field falls back to its default when absent
/// from `config.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    // ── Rain ────────────────────────────────────────────────────────────
    /// Pool capacity.
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,
    /// Ticks between spawns while the pool fills.
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval: u32,
    /// Default fall speed (px/tick).
    #[serde(default = "default_fall_speed")]
    pub fall_speed: f32,
    /// Drop diameter (px).
    #[serde(default = "default_particle_size")]
    pub particle_size: f32,
    /// Slide speed as a fraction of the fall speed.
    #[serde(default = "default_slide_speed_factor")]
    pub slide_speed_factor: f32,
    /// Rim tolerance for ending a slide (radians).
    #[serde(default = "default_edge_eps")]
    pub edge_eps: f32,
    /// Also recycle falling drops that leave through the top edge.
    #[serde(default)]
    pub recycle_above_top: bool,

    // ── Umbrella ────────────────────────────────────────────────────────
    #[serde(default = "default_canopy_radius")]
    pub canopy_radius: f32,
    #[serde(default = "default_stem_height")]
    pub stem_height: f32,
    #[serde(default = "default_hook_radius")]
    pub hook_radius: f32,

    // ── Wind ────────────────────────────────────────────────────────────
    #[serde(default = "default_wind_max")]
    pub wind_max: f32,
    #[serde(default = "default_wind_noise_step")]
    pub wind_noise_step: f64,
    #[serde(default = "default_wind_response")]
    pub wind_response: f32,
    /// Horizontal relaxation of falling drops toward the wind.
    #[serde(default = "default_wind_pull")]
    pub wind_pull: f32,
    #[serde(default = "default_slide_wind_gain")]
    pub slide_wind_gain: f32,

    // ── Walker ──────────────────────────────────────────────────────────
    #[serde(default = "default_walker_speed")]
    pub walker_speed: f32,
    #[serde(default = "default_walker_phase_step")]
    pub walker_phase_step: f32,
    /// Start walking once this far inside the canopy edge.
    #[serde(default = "default_walker_margin")]
    pub walker_enter_margin: f32,
    /// Stop walking once this far outside the canopy edge.
    #[serde(default = "default_walker_margin")]
    pub walker_exit_margin: f32,
    /// Distance beyond the viewport edge where the walker enters and leaves.
    #[serde(default = "default_walker_offscreen_margin")]
    pub walker_offscreen_margin: f32,
    /// Upper bound of the random delay before the next walker (seconds).
    #[serde(default = "default_walker_max_delay_secs")]
    pub walker_max_delay_secs: f32,

    // ── Driver ──────────────────────────────────────────────────────────
    /// Assumed ticks per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Ticks the headless driver runs.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Pace the headless driver to `frame_rate`.
    #[serde(default)]
    pub realtime: bool,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ticks between stats log lines.
    #[serde(default = "default_log_interval")]
    pub log_interval: u64,
}

fn default_max_particles() -> usize {
    150
}
fn default_spawn_interval() -> u32 {
    2
}
fn default_fall_speed() -> f32 {
    6.0
}
fn default_particle_size() -> f32 {
    2.0
}
fn default_slide_speed_factor() -> f32 {
    0.9
}
fn default_edge_eps() -> f32 {
    0.02
}
fn default_canopy_radius() -> f32 {
    70.0
}
fn default_stem_height() -> f32 {
    80.0
}
fn default_hook_radius() -> f32 {
    20.0
}
fn default_wind_max() -> f32 {
    3.0
}
fn default_wind_noise_step() -> f64 {
    0.005
}
fn default_wind_response() -> f32 {
    0.05
}
fn default_wind_pull() -> f32 {
    0.02
}
fn default_slide_wind_gain() -> f32 {
    0.15
}
fn default_walker_speed() -> f32 {
    2.2
}
fn default_walker_phase_step() -> f32 {
    0.12
}
fn default_walker_margin() -> f32 {
    10.0
}
fn default_walker_offscreen_margin() -> f32 {
    40.0
}
fn default_walker_max_delay_secs() -> f32 {
    10.0
}
fn default_frame_rate() -> f32 {
    60.0
}
fn default_width() -> f32 {
    1280.0
}
fn default_height() -> f32 {
    720.0
}
fn default_frames() -> u64 {
    3600
}
fn default_log_interval() -> u64 {
    300
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_particles: default_max_particles(),
            spawn_interval: default_spawn_interval(),
            fall_speed: default_fall_speed(),
            particle_size: default_particle_size(),
            slide_speed_factor: default_slide_speed_factor(),
            edge_eps: default_edge_eps(),
            recycle_above_top: false,
            canopy_radius: default_canopy_radius(),
            stem_height: default_stem_height(),
            hook_radius: default_hook_radius(),
            wind_max: default_wind_max(),
            wind_noise_step: default_wind_noise_step(),
            wind_response: default_wind_response(),
            wind_pull: default_wind_pull(),
            slide_wind_gain: default_slide_wind_gain(),
            walker_speed: default_walker_speed(),
            walker_phase_step: default_walker_phase_step(),
            walker_enter_margin: default_walker_margin(),
            walker_exit_margin: default_walker_margin(),
            walker_offscreen_margin: default_walker_offscreen_margin(),
            walker_max_delay_secs: default_walker_max_delay_secs(),
            frame_rate: default_frame_rate(),
            width: default_width(),
            height: default_height(),
            frames: default_frames(),
            realtime: false,
            seed: None,
            log_interval: default_log_interval(),
        }
    }
}

impl SimConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        let s = match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Could not serialize config: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(path, s) {
            log::warn!("Could not write config to {:?}: {}", path, e);
        }
    }

    /// Reject values the simulation cannot run with. A zero pool is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("fall_speed", self.fall_speed),
            ("particle_size", self.particle_size),
            ("slide_speed_factor", self.slide_speed_factor),
            ("canopy_radius", self.canopy_radius),
            ("stem_height", self.stem_height),
            ("wind_max", self.wind_max),
            ("frame_rate", self.frame_rate),
            ("width", self.width),
            ("height", self.height),
            ("walker_speed", self.walker_speed),
            ("walker_phase_step", self.walker_phase_step),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("wind_response", self.wind_response),
            ("wind_pull", self.wind_pull),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }
        for (field, value) in [
            ("walker_max_delay_secs", self.walker_max_delay_secs),
            ("walker_offscreen_margin", self.walker_offscreen_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        let margins = self.walker_enter_margin + self.walker_exit_margin;
        if !(margins >= 0.0) {
            return Err(ConfigError::WalkerMarginsOverlap(margins));
        }
        if !(self.edge_eps >= 0.0 && self.edge_eps < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::EdgeEpsOutOfRange(self.edge_eps));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn wind_params(&self) -> WindParams {
        WindParams {
            max: self.wind_max,
            noise_step: self.wind_noise_step,
            response: self.wind_response,
        }
    }

    pub fn particle_params(&self) -> ParticleParams {
        ParticleParams {
            fall_speed: self.fall_speed,
            radius: self.particle_size * 0.5,
            slide_speed: self.fall_speed * self.slide_speed_factor,
            edge_eps: self.edge_eps,
            wind_pull: self.wind_pull,
            slide_wind_gain: self.slide_wind_gain,
            recycle_above_top: self.recycle_above_top,
        }
    }

    pub fn umbrella_geometry(&self) -> UmbrellaGeometry {
        UmbrellaGeometry {
            canopy_radius: self.canopy_radius,
            stem_height: self.stem_height,
            hook_radius: self.hook_radius,
        }
    }

    pub fn walker_params(&self) -> WalkerParams {
        WalkerParams {
            base_speed: self.walker_speed,
            phase_step: self.walker_phase_step,
            enter_margin: self.walker_enter_margin,
            exit_margin: self.walker_exit_margin,
            offscreen_margin: self.walker_offscreen_margin,
            max_spawn_delay_secs: self.walker_max_delay_secs,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
