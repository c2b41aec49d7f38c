//! Contact test between a drop and the umbrella canopy.
//!
//! Screen y grows downward, so the sheltering top half of the canopy is the
//! angle range `[π, 2π]` around the canopy center.

use std::f32::consts::{PI, TAU};

use engine_core::Side;
use glam::Vec2;

use crate::umbrella::Umbrella;

/// Result of testing a point against the canopy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanopyContact {
    NoContact,
    /// Touching the top of the canopy: the drop may start sliding.
    Upper {
        /// Contact angle in `[π, 2π)`.
        theta: f32,
        /// Direction of travel along the arc.
        side: Side,
        /// Unit vector from the canopy center to the drop.
        normal: Vec2,
    },
    /// Grazing the canopy disk from behind. Only a penetration correction applies.
    Lower { normal: Vec2, penetration: f32 },
}

/// Canopy collision circle for drops of a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanopyCollider {
    pub center: Vec2,
    /// Canopy radius grown by the drop radius.
    pub contact_radius: f32,
}

impl CanopyCollider {
    pub fn new(umbrella: &Umbrella, particle_radius: f32) -> Self {
        Self {
            center: umbrella.center,
            contact_radius: umbrella.canopy_radius() + particle_radius,
        }
    }

    /// Classify `position` against the canopy. Pure; no side effects.
    pub fn test(&self, position: Vec2) -> CanopyContact {
        let d = position - self.center;
        let distance = d.length();

        if position.y > self.center.y || distance > self.contact_radius {
            return CanopyContact::NoContact;
        }

        // A drop sitting exactly on the center divides by 1 instead of 0.
        let normal = d / if distance == 0.0 { 1.0 } else { distance };
        let theta = normalize_angle(d.y.atan2(d.x));

        if (PI..=TAU).contains(&theta) {
            CanopyContact::Upper {
                theta,
                side: Side::from_offset(d.x),
                normal,
            }
        } else {
            CanopyContact::Lower {
                normal,
                penetration: self.contact_radius - distance,
            }
        }
    }

    /// Point on the contact circle at angle `theta`.
    pub fn point_at(&self, theta: f32) -> Vec2 {
        self.center + self.contact_radius * Vec2::new(theta.cos(), theta.sin())
    }
}

/// Map an `atan2` result into `[0, 2π)`.
fn normalize_angle(theta: f32) -> f32 {
    if theta < 0.0 {
        theta + TAU
    } else {
        theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::umbrella::UmbrellaGeometry;
    use engine_core::Viewport;

    fn collider() -> CanopyCollider {
        let vp = Viewport::new(800.0, 600.0);
        let u = Umbrella::resolve(Some(400.0), &vp, UmbrellaGeometry::default());
        CanopyCollider::new(&u, 1.0)
    }

    #[test]
    fn far_away_is_no_contact() {
        let c = collider();
        assert_eq!(c.test(Vec2::new(100.0, 100.0)), CanopyContact::NoContact);
    }

    #[test]
    fn below_center_is_no_contact() {
        let c = collider();
        assert_eq!(c.test(c.center + Vec2::new(5.0, 1.0)), CanopyContact::NoContact);
    }

    #[test]
    fn top_dead_center_is_upper_right() {
        let c = collider();
        match c.test(c.center + Vec2::new(0.0, -60.0)) {
            CanopyContact::Upper { theta, side, normal } => {
                assert!((theta - 1.5 * PI).abs() < 1e-5);
                assert_eq!(side, Side::Right);
                assert!((normal - Vec2::new(0.0, -1.0)).length() < 1e-6);
            }
            other => panic!("expected upper contact, got {:?}", other),
        }
    }

    #[test]
    fn left_of_center_slides_left() {
        let c = collider();
        match c.test(c.center + Vec2::new(-30.0, -40.0)) {
            CanopyContact::Upper { theta, side, .. } => {
                assert_eq!(side, Side::Left);
                assert!(theta > PI && theta < 1.5 * PI);
            }
            other => panic!("expected upper contact, got {:?}", other),
        }
    }

    #[test]
    fn right_of_center_slides_right() {
        let c = collider();
        match c.test(c.center + Vec2::new(30.0, -40.0)) {
            CanopyContact::Upper { theta, side, .. } => {
                assert_eq!(side, Side::Right);
                assert!(theta > 1.5 * PI && theta < TAU);
            }
            other => panic!("expected upper contact, got {:?}", other),
        }
    }

    #[test]
    fn rim_level_right_is_lower_contact() {
        let c = collider();
        match c.test(c.center + Vec2::new(50.0, 0.0)) {
            CanopyContact::Lower { normal, penetration } => {
                assert!((normal - Vec2::X).length() < 1e-6);
                assert!((penetration - 21.0).abs() < 1e-4);
            }
            other => panic!("expected lower contact, got {:?}", other),
        }
    }

    #[test]
    fn rim_level_left_is_upper_at_pi() {
        let c = collider();
        match c.test(c.center + Vec2::new(-50.0, 0.0)) {
            CanopyContact::Upper { theta, side, .. } => {
                assert!((theta - PI).abs() < 1e-6);
                assert_eq!(side, Side::Left);
            }
            other => panic!("expected upper contact, got {:?}", other),
        }
    }

    #[test]
    fn center_point_does_not_produce_nan() {
        let c = collider();
        match c.test(c.center) {
            CanopyContact::Lower { normal, penetration } => {
                assert!(!normal.is_nan());
                assert_eq!(normal, Vec2::ZERO);
                assert_eq!(penetration, c.contact_radius);
            }
            other => panic!("expected lower contact, got {:?}", other),
        }
    }

    #[test]
    fn point_at_lies_on_contact_circle() {
        let c = collider();
        let p = c.point_at(1.25 * PI);
        assert!(((p - c.center).length() - c.contact_radius).abs() < 1e-3);
    }
}
