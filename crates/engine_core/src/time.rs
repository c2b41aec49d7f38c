//! Frame-driven time for the simulation loop.
//!
//! One tick is one animation frame. Every timer in the simulation is expressed in
//! frames at the clock's assumed rate, so the simulation is deterministic no matter
//! how fast the host actually calls it.

use std::time::Duration;

/// Default assumed frame rate of the external driver.
pub const DEFAULT_FRAME_RATE: f32 = 60.0;

/// Counts ticks and converts between seconds and frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Frame count since start. The first tick is frame 1.
    frame_count: u64,
    /// Assumed ticks per second.
    frame_rate: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock {
    /// Create a clock at frame 0 with the given assumed rate (Hz).
    pub fn new(frame_rate: f32) -> Self {
        Self {
            frame_count: 0,
            frame_rate: frame_rate.max(1.0),
        }
    }

    /// Advance to the next frame.
    pub fn advance(&mut self) {
        self.frame_count += 1;
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Duration of one frame at the assumed rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }

    /// Convert seconds to (fractional) frames at the assumed rate.
    pub fn frames_from_seconds(&self, seconds: f32) -> f32 {
        seconds * self.frame_rate
    }

    /// True on every `interval`-th frame. An interval of 0 never fires.
    pub fn every(&self, interval: u32) -> bool {
        interval > 0 && self.frame_count % interval as u64 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_counts_frames() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.frame_count(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn clock_every_interval() {
        let mut clock = FrameClock::default();
        let mut hits = 0;
        for _ in 0..10 {
            clock.advance();
            if clock.every(2) {
                hits += 1;
            }
        }
        assert_eq!(hits, 5);
        assert!(!clock.every(0));
    }

    #[test]
    fn seconds_to_frames() {
        let clock = FrameClock::new(60.0);
        assert_eq!(clock.frames_from_seconds(2.5), 150.0);
    }
}
