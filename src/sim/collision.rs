//! Collision primitives shared by every weapon and by enemy/player contact
//!
//! Only two shapes exist in the game: circles (enemies) and points (bullets,
//! scythe hit-points). The laser beam is a segment tested against circles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NEAR_ZERO;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleCollider {
    pub position: Vec2,
    pub radius: f32,
}

impl CircleCollider {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCollider {
    pub position: Vec2,
}

/// Point inside circle (boundary inclusive)
#[inline]
pub fn circle_point(circle: &CircleCollider, point: Vec2) -> bool {
    circle.position.distance(point) <= circle.radius
}

/// Project `v` onto `onto`
///
/// A zero-length `onto` has no direction; it is returned unchanged.
#[inline]
pub fn project(v: Vec2, onto: Vec2) -> Vec2 {
    let len_sq = onto.length_squared();
    if len_sq < NEAR_ZERO {
        return onto;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Segment `a`-`b` touches the circle
pub fn circle_segment(circle: &CircleCollider, a: Vec2, b: Vec2) -> bool {
    if circle_point(circle, a) || circle_point(circle, b) {
        return true;
    }

    let ab = b - a;
    let along = project(circle.position - a, ab);

    // Foot of the perpendicular must lie between a and b
    let within = along.dot(ab) >= 0.0 && along.length_squared() <= ab.length_squared();
    within && circle_point(circle, a + along)
}
