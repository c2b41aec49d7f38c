//! Headless driver for the umbrella rain scene.
//!
//! Runs the simulation at a fixed tick rate with a scripted pointer sweeping
//! the umbrella back and forth, logging scene stats as it goes.

use std::time::Instant;

use anyhow::{Context, Result};
use game::{SimConfig, Simulation};

/// Radians of pointer sweep per tick.
const SWEEP_RATE: f32 = 0.004;

/// Scripted pointer: a slow sinusoid across most of the viewport.
fn pointer_at(frame: u64, width: f32) -> f32 {
    let t = frame as f32 * SWEEP_RATE;
    width * 0.5 + width * 0.4 * t.sin()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();
    config
        .validate()
        .context("config.ron has values the simulation cannot run with")?;
    if std::env::args().any(|a| a == "--write-config") {
        config.save();
        log::info!("Wrote current settings to config.ron");
    }

    log::info!(
        "Starting umbrella rain: {}x{} viewport, {} drops, {} frames at {} Hz{}",
        config.width,
        config.height,
        config.max_particles,
        config.frames,
        config.frame_rate,
        if config.realtime { " (realtime)" } else { "" }
    );

    let mut sim = Simulation::new(&config);
    let frame_duration = sim.clock().frame_duration();
    let start = Instant::now();
    let mut landed = 0;
    let mut recycled = 0;

    for frame in 1..=config.frames {
        sim.tick(Some(pointer_at(frame, sim.viewport().width)));

        let stats = sim.stats();
        landed += stats.events.landed;
        recycled += stats.events.recycled;

        if config.log_interval > 0 && frame % config.log_interval == 0 {
            let snapshot = sim.snapshot();
            log::info!("{}", stats);
            let umbrella = sim.umbrella();
            log::debug!(
                "umbrella stem {:?} -> {:?}, hook at {:?}, {} bytes of drop instances",
                umbrella.stem_top(),
                umbrella.stem_bottom(),
                umbrella.hook_center(),
                snapshot.particle_bytes().len()
            );
            if let Some(pose) = snapshot.walker_pose {
                log::debug!("walker hip at ({:.1}, {:.1})", pose.hip.x, pose.hip.y);
            }
        }

        if config.realtime {
            let deadline = frame_duration.mul_f64(frame as f64);
            if let Some(wait) = deadline.checked_sub(start.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }

    log::info!(
        "Done after {} frames in {:.2?}: {} landings, {} recycles",
        config.frames,
        start.elapsed(),
        landed,
        recycled
    );
    Ok(())
}
