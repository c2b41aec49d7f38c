//! The pedestrian: one walker at a time crosses the scene, but only moves while
//! sheltered under the umbrella.
//!
//! Lifecycle: `Absent` (spawn countdown running) → `Present` (stopped or walking)
//! → `Absent` once it leaves the viewport on the far side, which re-arms the
//! countdown with a fresh random delay.

use engine_core::{Countdown, FrameClock, Side, Viewport};
use glam::Vec2;
use physics::Umbrella;
use rand::Rng;

/// Tuning for the walker.
#[derive(Debug, Clone, Copy)]
pub struct WalkerParams {
    /// Walking speed (px/tick).
    pub base_speed: f32,
    /// Stride phase advanced per walking tick (radians).
    pub phase_step: f32,
    /// Start walking once within `canopy_radius - enter_margin` of the umbrella.
    pub enter_margin: f32,
    /// Stop walking once beyond `canopy_radius + exit_margin` from the umbrella.
    pub exit_margin: f32,
    /// How far outside the viewport the walker appears and disappears.
    pub offscreen_margin: f32,
    /// Spawn delays are uniform in `[0, max_spawn_delay_secs)`.
    pub max_spawn_delay_secs: f32,
}

impl Default for WalkerParams {
    fn default() -> Self {
        Self {
            base_speed: 2.2,
            phase_step: 0.12,
            enter_margin: 10.0,
            exit_margin: 10.0,
            offscreen_margin: 40.0,
            max_spawn_delay_secs: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    /// Hip x position.
    pub x: f32,
    /// Travel direction.
    pub direction: Side,
    pub base_speed: f32,
    /// `base_speed` while walking, zero while stopped.
    pub current_speed: f32,
    pub walking: bool,
    /// Stride phase (radians). Frozen while stopped.
    pub phase: f32,
}

/// Lifecycle changes reported by [`WalkerScheduler::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerEvent {
    /// Appeared just outside the given edge.
    Spawned { entry: Side },
    StartedWalking,
    Stopped,
    /// Walked out of the viewport and was removed.
    Left,
}

// Stick figure proportions (px).
const GROUND_OFFSET: f32 = 6.0;
const TORSO_LEN: f32 = 24.0;
const LEG_LEN: f32 = 18.0;
const ARM_LEN: f32 = 16.0;
const HEAD_RADIUS: f32 = 8.0;
const NECK_GAP: f32 = 2.0;
const LEG_SWING: f32 = 12.0;
const ARM_SWING: f32 = 14.0;
const ARM_SWING_SCALE: f32 = 0.8;

/// Joint positions of the stick figure for a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkerPose {
    pub hip: Vec2,
    pub shoulder: Vec2,
    pub head_center: Vec2,
    pub head_radius: f32,
    /// Trailing and leading foot.
    pub feet: [Vec2; 2],
    /// Trailing and leading hand.
    pub hands: [Vec2; 2],
}

impl Walker {
    /// Stick figure pose standing on the viewport bottom.
    pub fn pose(&self, viewport: &Viewport) -> WalkerPose {
        let ground_y = viewport.height - GROUND_OFFSET;
        let hip = Vec2::new(self.x, ground_y - LEG_LEN);
        let shoulder = Vec2::new(self.x, hip.y - TORSO_LEN);

        let swing = self.phase.sin();
        let dir = self.direction.sign();
        let leg = LEG_SWING * swing * dir;
        let arm = -ARM_SWING * swing * ARM_SWING_SCALE * dir;

        WalkerPose {
            hip,
            shoulder,
            head_center: Vec2::new(shoulder.x, shoulder.y - HEAD_RADIUS - NECK_GAP),
            head_radius: HEAD_RADIUS,
            feet: [
                Vec2::new(hip.x - leg, ground_y),
                Vec2::new(hip.x + leg, ground_y),
            ],
            hands: [
                Vec2::new(shoulder.x - arm, shoulder.y + ARM_LEN),
                Vec2::new(shoulder.x + arm, shoulder.y + ARM_LEN),
            ],
        }
    }
}

/// Owns the optional walker and its spawn countdown.
#[derive(Debug, Clone)]
pub struct WalkerScheduler {
    walker: Option<Walker>,
    spawn_timer: Countdown,
    params: WalkerParams,
}

impl WalkerScheduler {
    /// Start absent with a freshly armed countdown.
    pub fn new(params: WalkerParams, clock: &FrameClock, rng: &mut impl Rng) -> Self {
        let mut scheduler = Self {
            walker: None,
            spawn_timer: Countdown::default(),
            params,
        };
        scheduler.arm(clock, rng);
        scheduler
    }

    /// Re-arm the countdown with a uniform random delay.
    fn arm(&mut self, clock: &FrameClock, rng: &mut impl Rng) {
        let delay_secs = rng.gen::<f32>() * self.params.max_spawn_delay_secs;
        self.spawn_timer = Countdown::new(clock.frames_from_seconds(delay_secs));
        log::debug!("next walker in {:.1}s", delay_secs);
    }

    /// Place a stopped walker just outside the `entry` edge, facing inward.
    /// Ignored while a walker is present.
    pub fn spawn_at(&mut self, entry: Side, viewport: &Viewport) -> bool {
        if self.walker.is_some() {
            return false;
        }
        let x = match entry {
            Side::Left => -self.params.offscreen_margin,
            Side::Right => viewport.width + self.params.offscreen_margin,
        };
        self.walker = Some(Walker {
            x,
            direction: entry.opposite(),
            base_speed: self.params.base_speed,
            current_speed: 0.0,
            walking: false,
            phase: 0.0,
        });
        log::debug!("walker entered from {:?} at x={:.1}", entry, x);
        true
    }

    /// Advance one tick.
    pub fn update(
        &mut self,
        umbrella: &Umbrella,
        viewport: &Viewport,
        clock: &FrameClock,
        rng: &mut impl Rng,
    ) -> Option<WalkerEvent> {
        let Some(walker) = self.walker.as_mut() else {
            if !self.spawn_timer.tick() {
                return None;
            }
            let entry = if rng.gen::<f32>() < 0.5 { Side::Left } else { Side::Right };
            self.spawn_at(entry, viewport);
            return Some(WalkerEvent::Spawned { entry });
        };

        let mut event = None;
        let distance = (walker.x - umbrella.center.x).abs();
        let radius = umbrella.canopy_radius();
        if !walker.walking && distance <= radius - self.params.enter_margin {
            walker.walking = true;
            walker.current_speed = walker.base_speed;
            log::debug!("walker sheltered, walking");
            event = Some(WalkerEvent::StartedWalking);
        } else if walker.walking && distance >= radius + self.params.exit_margin {
            walker.walking = false;
            walker.current_speed = 0.0;
            log::debug!("walker exposed, stopped at x={:.1}", walker.x);
            event = Some(WalkerEvent::Stopped);
        }

        walker.x += walker.direction.sign() * walker.current_speed;
        if walker.walking {
            walker.phase += self.params.phase_step;
        }

        let margin = self.params.offscreen_margin;
        let gone = match walker.direction {
            Side::Right => walker.x > viewport.width + margin,
            Side::Left => walker.x < -margin,
        };
        if gone {
            self.walker = None;
            log::debug!("walker left the scene");
            self.arm(clock, rng);
            return Some(WalkerEvent::Left);
        }
        event
    }

    pub fn walker(&self) -> Option<&Walker> {
        self.walker.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.walker.is_some()
    }

    /// Frames left before the next spawn (meaningless while present).
    pub fn frames_until_spawn(&self) -> f32 {
        self.spawn_timer.remaining.max(0.0)
    }
}
