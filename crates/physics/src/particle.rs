//! Rain drops: a two-state machine of falling and sliding along the canopy.

use std::f32::consts::{PI, TAU};

use engine_core::{Side, Viewport};
use glam::Vec2;
use rand::Rng;

use crate::collision::{CanopyCollider, CanopyContact};

/// Extra distance added when pushing a drop out of the canopy from below.
const PUSH_SLOP: f32 = 0.5;

/// Fraction of the fall speed that bounds the slide-exit speed from below.
const EXIT_SPEED_FRACTION: f32 = 0.8;

/// Tuning shared by every drop.
#[derive(Debug, Clone, Copy)]
pub struct ParticleParams {
    /// Default vertical speed of a fresh drop (px/tick).
    pub fall_speed: f32,
    /// Drop radius.
    pub radius: f32,
    /// Base speed along the canopy arc (px/tick).
    pub slide_speed: f32,
    /// Angular tolerance at the canopy rims (radians).
    pub edge_eps: f32,
    /// How quickly horizontal velocity relaxes toward the wind.
    pub wind_pull: f32,
    /// Scale of the wind's tangential push while sliding.
    pub slide_wind_gain: f32,
    /// Also recycle falling drops that drift above the top edge.
    pub recycle_above_top: bool,
}

impl Default for ParticleParams {
    fn default() -> Self {
        let fall_speed = 6.0;
        Self {
            fall_speed,
            radius: 1.0,
            slide_speed: fall_speed * 0.9,
            edge_eps: 0.02,
            wind_pull: 0.02,
            slide_wind_gain: 0.15,
            recycle_above_top: false,
        }
    }
}

impl ParticleParams {
    /// Lower bound on the vertical exit speed when leaving the canopy.
    pub fn min_exit_fall_speed(&self) -> f32 {
        EXIT_SPEED_FRACTION * self.fall_speed
    }
}

/// Motion state. Sliding carries its arc angle and direction, so a sliding
/// drop without an angle cannot exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleState {
    Falling,
    Sliding {
        /// Angle on the canopy arc, in `[π, 2π]` while on the canopy.
        theta: f32,
        side: Side,
    },
}

/// Notable transitions reported by [`Particle::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleEvent {
    /// Hit the top of the canopy and began sliding.
    Landed,
    /// Slid off a canopy rim and resumed falling.
    Released,
    /// Left the viewport and restarted at the top.
    Recycled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Velocity in px/tick. Only integrated while falling.
    pub velocity: Vec2,
    pub state: ParticleState,
}

impl Particle {
    /// A fresh drop at the top edge, falling straight down at the default speed.
    pub fn new(x: f32, params: &ParticleParams) -> Self {
        Self {
            position: Vec2::new(x, 0.0),
            velocity: Vec2::new(0.0, params.fall_speed),
            state: ParticleState::Falling,
        }
    }

    /// A fresh drop at a random x in `[0, width)`.
    pub fn spawn(rng: &mut impl Rng, viewport: &Viewport, params: &ParticleParams) -> Self {
        Self::new(rng.gen::<f32>() * viewport.width, params)
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.state, ParticleState::Sliding { .. })
    }

    /// Advance one tick.
    pub fn update(
        &mut self,
        wind: f32,
        canopy: &CanopyCollider,
        params: &ParticleParams,
        viewport: &Viewport,
        rng: &mut impl Rng,
    ) -> Option<ParticleEvent> {
        let mut event = match self.state {
            ParticleState::Falling => self.fall(wind, canopy, params),
            ParticleState::Sliding { theta, side } => self.slide(theta, side, wind, canopy, params),
        };

        if self.should_recycle(params, viewport) {
            *self = Self::spawn(rng, viewport, params);
            event = Some(ParticleEvent::Recycled);
        }
        event
    }

    fn fall(
        &mut self,
        wind: f32,
        canopy: &CanopyCollider,
        params: &ParticleParams,
    ) -> Option<ParticleEvent> {
        self.velocity.x += params.wind_pull * (wind - self.velocity.x);
        self.position += self.velocity;

        match canopy.test(self.position) {
            CanopyContact::Upper { theta, side, normal } => {
                self.position = canopy.center + normal * canopy.contact_radius;
                self.state = ParticleState::Sliding { theta, side };
                log::trace!("drop landed at theta={:.3} sliding {:?}", theta, side);
                Some(ParticleEvent::Landed)
            }
            CanopyContact::Lower { normal, penetration } => {
                self.position += normal * (penetration + PUSH_SLOP);
                None
            }
            CanopyContact::NoContact => None,
        }
    }

    fn slide(
        &mut self,
        theta: f32,
        side: Side,
        wind: f32,
        canopy: &CanopyCollider,
        params: &ParticleParams,
    ) -> Option<ParticleEvent> {
        let r = canopy.contact_radius;
        let mut d_theta = side.sign() * (params.slide_speed / r);
        // Wind projected on the arc tangent (-sinθ, cosθ).
        let tangential = wind * -theta.sin();
        d_theta += tangential * params.slide_wind_gain / r;

        let theta = theta + d_theta;
        self.position = canopy.point_at(theta);

        let at_rim = match side {
            Side::Left => theta <= PI + params.edge_eps,
            Side::Right => theta >= TAU - params.edge_eps,
        };
        if !at_rim {
            self.state = ParticleState::Sliding { theta, side };
            return None;
        }

        let tangent = Vec2::new(-theta.sin(), theta.cos());
        let speed = params.slide_speed.max(params.min_exit_fall_speed());
        self.velocity = Vec2::new(
            tangent.x * speed + wind * tangent.x * params.slide_wind_gain,
            (tangent.y * speed).max(params.min_exit_fall_speed()),
        );
        self.state = ParticleState::Falling;
        log::trace!("drop released at theta={:.3}", theta);
        Some(ParticleEvent::Released)
    }

    fn should_recycle(&self, params: &ParticleParams, viewport: &Viewport) -> bool {
        if self.position.y > viewport.height + params.radius {
            return true;
        }
        params.recycle_above_top
            && self.state == ParticleState::Falling
            && self.position.y < -params.radius
    }

    /// Keep the drop inside the horizontal bounds after a resize. State is untouched.
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        self.position.x = viewport.clamp_x(self.position.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::umbrella::{Umbrella, UmbrellaGeometry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> (Viewport, CanopyCollider, ParticleParams, StdRng) {
        let vp = Viewport::new(800.0, 600.0);
        let params = ParticleParams::default();
        let umbrella = Umbrella::resolve(Some(400.0), &vp, UmbrellaGeometry::default());
        let canopy = CanopyCollider::new(&umbrella, params.radius);
        (vp, canopy, params, StdRng::seed_from_u64(11))
    }

    #[test]
    fn falling_drop_relaxes_toward_wind() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(100.0, &params);
        p.update(3.0, &canopy, &params, &vp, &mut rng);
        assert!((p.velocity.x - 0.06).abs() < 1e-6);
        assert!((p.position.x - 100.06).abs() < 1e-4);
        assert_eq!(p.position.y, 6.0);
        assert_eq!(p.state, ParticleState::Falling);
    }

    #[test]
    fn straight_drop_lands_at_top_dead_center_once() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(400.0, &params);
        let mut landings = 0;
        for _ in 0..200 {
            if p.update(0.0, &canopy, &params, &vp, &mut rng) == Some(ParticleEvent::Landed) {
                landings += 1;
                break;
            }
        }
        assert_eq!(landings, 1);
        match p.state {
            ParticleState::Sliding { theta, side } => {
                assert!((theta - 1.5 * PI).abs() < 1e-5);
                assert_eq!(side, Side::Right);
            }
            ParticleState::Falling => panic!("drop never landed"),
        }
        assert!((p.position - Vec2::new(400.0, 520.0 - 71.0)).length() < 1e-3);
    }

    #[test]
    fn right_slide_increases_theta_and_releases_at_rim() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(0.0, &params);
        p.state = ParticleState::Sliding { theta: 1.5 * PI, side: Side::Right };
        let mut prev = 1.5 * PI;
        let mut released = false;
        for _ in 0..100 {
            let event = p.update(0.0, &canopy, &params, &vp, &mut rng);
            match p.state {
                ParticleState::Sliding { theta, .. } => {
                    assert!(theta > prev);
                    assert!(theta < TAU - params.edge_eps);
                    prev = theta;
                }
                ParticleState::Falling => {
                    assert_eq!(event, Some(ParticleEvent::Released));
                    released = true;
                    break;
                }
            }
        }
        assert!(released);
        assert!(p.velocity.y >= params.min_exit_fall_speed());
        assert!(p.velocity.y <= params.slide_speed + 1e-4);
    }

    #[test]
    fn left_slide_decreases_theta_and_releases_at_rim() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(0.0, &params);
        p.state = ParticleState::Sliding { theta: 1.5 * PI, side: Side::Left };
        let mut prev = 1.5 * PI;
        let mut ticks = 0;
        while p.is_sliding() {
            p.update(0.0, &canopy, &params, &vp, &mut rng);
            if let ParticleState::Sliding { theta, .. } = p.state {
                assert!(theta < prev);
                assert!(theta > PI + params.edge_eps);
                prev = theta;
            }
            ticks += 1;
            assert!(ticks < 100, "drop never released");
        }
        // Left rim tangent points straight up; the floor keeps it falling.
        assert!((p.velocity.y - params.min_exit_fall_speed()).abs() < 1e-4);
        assert!(p.position.x < canopy.center.x);
    }

    #[test]
    fn sliding_drop_stays_on_arc() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(0.0, &params);
        p.state = ParticleState::Sliding { theta: 1.3 * PI, side: Side::Right };
        for _ in 0..5 {
            p.update(1.5, &canopy, &params, &vp, &mut rng);
            let r = (p.position - canopy.center).length();
            assert!((r - canopy.contact_radius).abs() < 1e-3);
        }
    }

    #[test]
    fn tailwind_speeds_slide() {
        let (vp, canopy, params, mut rng) = scene();
        let start = ParticleState::Sliding { theta: 1.5 * PI, side: Side::Right };

        let mut calm = Particle::new(0.0, &params);
        calm.state = start;
        calm.update(0.0, &canopy, &params, &vp, &mut rng);

        // At the top of the arc the tangent points along +x, so a rightward
        // wind pushes a right-sliding drop further along.
        let mut windy = Particle::new(0.0, &params);
        windy.state = start;
        windy.update(3.0, &canopy, &params, &vp, &mut rng);

        match (calm.state, windy.state) {
            (ParticleState::Sliding { theta: a, .. }, ParticleState::Sliding { theta: b, .. }) => {
                assert!(b > a);
            }
            other => panic!("unexpected states {:?}", other),
        }
    }

    #[test]
    fn grazing_contact_pushes_out_without_sliding() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(450.0, &params);
        p.position.y = 514.0;
        let event = p.update(0.0, &canopy, &params, &vp, &mut rng);
        assert_eq!(event, None);
        assert_eq!(p.state, ParticleState::Falling);
        assert!((p.position.x - 471.5).abs() < 1e-3);
        assert!((p.position - canopy.center).length() > canopy.contact_radius);
    }

    #[test]
    fn drop_below_viewport_recycles_to_top() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(100.0, &params);
        p.position.y = 600.0;
        p.velocity.x = 2.5;
        let event = p.update(0.0, &canopy, &params, &vp, &mut rng);
        assert_eq!(event, Some(ParticleEvent::Recycled));
        assert_eq!(p.position.y, 0.0);
        assert!(p.position.x >= 0.0 && p.position.x < vp.width);
        assert_eq!(p.velocity, Vec2::new(0.0, params.fall_speed));
        assert_eq!(p.state, ParticleState::Falling);
    }

    #[test]
    fn top_guard_is_opt_in() {
        let (vp, canopy, params, mut rng) = scene();
        let mut p = Particle::new(100.0, &params);
        p.position.y = -5.0;
        p.velocity.y = -1.0;
        assert_eq!(p.update(0.0, &canopy, &params, &vp, &mut rng), None);

        let guarded = ParticleParams { recycle_above_top: true, ..params };
        assert_eq!(
            p.update(0.0, &canopy, &guarded, &vp, &mut rng),
            Some(ParticleEvent::Recycled)
        );
        assert_eq!(p.position.y, 0.0);
    }

    #[test]
    fn clamp_keeps_slide_state() {
        let params = ParticleParams::default();
        let mut p = Particle::new(700.0, &params);
        p.state = ParticleState::Sliding { theta: 1.7 * PI, side: Side::Left };
        p.clamp_to(&Viewport::new(300.0, 600.0));
        assert_eq!(p.position.x, 300.0);
        assert_eq!(p.state, ParticleState::Sliding { theta: 1.7 * PI, side: Side::Left });
    }
}
