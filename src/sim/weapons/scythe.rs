//! Scythe: a melee swing approximated by delayed hit-points along an arc
//!
//! Eleven points trace a half circle around the player. The range ratio dips
//! in the middle of the swing, and each point lights up a little after the
//! previous one so the blade sweeps across instead of striking everywhere at
//! once. A swing also hits anything already hugging the player.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SCYTHE_HIT_POINTS;
use crate::rotate_vector;
use crate::sim::collision::{CircleCollider, PointCollider, circle_point};
use crate::sim::enemy::EnemyPool;
use crate::sim::events::{GameEvent, WeaponKind};
use crate::tuning::ScytheTuning;

const MIN_RANGE_RATIO: f32 = 0.75;
const MAX_RANGE_RATIO: f32 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScytheHitPoint {
    /// Offset from the player for a +X facing
    pub player_relative_position: Vec2,
    pub collider: PointCollider,
    pub activity_start_time: f64,
    pub activity_end_time: f64,
}

impl ScytheHitPoint {
    /// Live iff `now` falls inside the activation window
    #[inline]
    pub fn is_active(&self, now: f64) -> bool {
        self.activity_start_time <= now && now <= self.activity_end_time
    }
}

/// Range ratio per hit-point: 1.0 at both ends, dipping to 0.75 in the middle
fn range_ratios() -> [f32; SCYTHE_HIT_POINTS] {
    let half = SCYTHE_HIT_POINTS / 2;
    let step = (MAX_RANGE_RATIO - MIN_RANGE_RATIO) / half as f32;
    let mut ratios = [MIN_RANGE_RATIO; SCYTHE_HIT_POINTS];
    for i in 0..half {
        let ratio = MAX_RANGE_RATIO - i as f32 * step;
        ratios[i] = ratio;
        ratios[SCYTHE_HIT_POINTS - 1 - i] = ratio;
    }
    ratios
}

/// Arc parameter per hit-point, evenly spread over [0, 1]
fn smooth_phases() -> [f32; SCYTHE_HIT_POINTS] {
    let step = 1.0 / (SCYTHE_HIT_POINTS - 1) as f32;
    std::array::from_fn(|i| i as f32 * step)
}

#[derive(Debug, Clone)]
pub struct Scythe {
    hit_points: [ScytheHitPoint; SCYTHE_HIT_POINTS],
    last_swing_time: Option<f64>,
    /// Clock of the last update, for snapshot queries
    last_update_time: f64,
    tuning: ScytheTuning,
}

impl Scythe {
    pub fn new(tuning: ScytheTuning) -> Self {
        let ratios = range_ratios();
        let phases = smooth_phases();
        // First point at the player's left, sweeping clockwise through the front
        let first = rotate_vector(Vec2::X, FRAC_PI_2);

        let hit_points = std::array::from_fn(|i| {
            let offset = rotate_vector(first, -PI * phases[i]) * tuning.arc_distance * ratios[i];
            ScytheHitPoint {
                player_relative_position: offset,
                collider: PointCollider::default(),
                activity_start_time: f64::NEG_INFINITY,
                activity_end_time: f64::NEG_INFINITY,
            }
        });

        Self {
            hit_points,
            last_swing_time: None,
            last_update_time: 0.0,
            tuning,
        }
    }

    pub fn hit_points(&self) -> &[ScytheHitPoint] {
        &self.hit_points
    }

    /// Hit-points live at the last update
    pub fn active_points(&self) -> impl Iterator<Item = &ScytheHitPoint> {
        let now = self.last_update_time;
        self.hit_points.iter().filter(move |p| p.is_active(now))
    }

    pub fn swing_duration(&self) -> f64 {
        self.tuning.swing_duration(SCYTHE_HIT_POINTS)
    }

    pub fn ready(&self, now: f64) -> bool {
        self.last_swing_time
            .is_none_or(|last| now - last >= self.swing_duration())
    }

    /// Start a swing at `now`
    ///
    /// No-op while the previous swing is still animating. On success every
    /// enemy within the point-blank radius of the player is hit immediately.
    pub fn hit(
        &mut self,
        player_position: Vec2,
        now: f64,
        enemies: &mut EnemyPool,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last_swing_time = Some(now);

        for (i, point) in self.hit_points.iter_mut().enumerate() {
            point.activity_start_time = now + i as f64 * self.tuning.stagger;
            point.activity_end_time = point.activity_start_time + self.tuning.activity_time;
        }
        events.push(GameEvent::ScytheSwung);

        let blast = CircleCollider::new(player_position, self.tuning.point_blank_radius);
        let in_reach: Vec<usize> = enemies
            .active()
            .filter(|enemy| circle_point(&blast, enemy.position))
            .map(|enemy| enemy.slot_index)
            .collect();
        for slot in in_reach {
            enemies.apply_damage(slot, self.tuning.damage, WeaponKind::Scythe, events);
        }

        true
    }

    /// Place live hit-points around the player and damage what they touch
    ///
    /// A point keeps hitting on every tick it stays live.
    pub fn update(
        &mut self,
        player_position: Vec2,
        player_facing: Vec2,
        now: f64,
        enemies: &mut EnemyPool,
        events: &mut Vec<GameEvent>,
    ) {
        self.last_update_time = now;
        let facing_angle = crate::facing_to_rotation(player_facing);

        for point in self.hit_points.iter_mut().filter(|p| p.is_active(now)) {
            point.collider.position =
                player_position + rotate_vector(point.player_relative_position, facing_angle);
        }

        for point in self.hit_points.iter().filter(|p| p.is_active(now)) {
            for slot in 0..enemies.capacity() {
                let touched = enemies
                    .get(slot)
                    .is_some_and(|e| e.is_active() && circle_point(&e.collider, point.collider.position));
                if touched {
                    enemies.apply_damage(slot, self.tuning.damage, WeaponKind::Scythe, events);
                }
            }
        }
    }

    /// Cancel any swing in progress
    pub fn reset(&mut self) {
        for point in &mut self.hit_points {
            point.activity_start_time = f64::NEG_INFINITY;
            point.activity_end_time = f64::NEG_INFINITY;
        }
        self.last_swing_time = None;
    }
}
