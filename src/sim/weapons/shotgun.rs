//! Shotgun: bursts of pellets in a ring-allocated bullet pool
//!
//! The pool has no free-list. The write cursor walks the ring and simply
//! overwrites whatever slot it lands on, so a long-lived pellet can be
//! recycled while still in flight once the cursor laps it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::arena::Arena;
use crate::sim::collision::{PointCollider, circle_point};
use crate::sim::enemy::EnemyPool;
use crate::sim::events::{GameEvent, WeaponKind};
use crate::tuning::ShotgunTuning;
use crate::{direction_of, rotate_vector};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub is_active: bool,
    pub collider: PointCollider,
    /// Unit vector
    pub direction: Vec2,
}

#[derive(Debug, Clone)]
pub struct Shotgun {
    bullets: Vec<Bullet>,
    next_index: usize,
    last_shot_time: Option<f64>,
    tuning: ShotgunTuning,
}

impl Shotgun {
    pub fn new(capacity: usize, tuning: ShotgunTuning) -> Self {
        Self {
            bullets: vec![Bullet::default(); capacity.max(1)],
            next_index: 0,
            last_shot_time: None,
            tuning,
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn active_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.is_active).count()
    }

    pub fn ready(&self, now: f64) -> bool {
        self.last_shot_time
            .is_none_or(|last| now - last >= self.tuning.shot_delay)
    }

    /// Fire one burst from `origin` toward `direction`
    ///
    /// Returns false (and does nothing) while the shot delay has not elapsed
    /// or when `direction` has no length.
    pub fn fire<R: Rng>(
        &mut self,
        origin: Vec2,
        direction: Vec2,
        now: f64,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.ready(now) {
            return false;
        }
        let Some(direction) = direction_of(direction) else {
            return false;
        };

        let deviation = self.tuning.deviation;
        for _ in 0..self.tuning.pellets_per_shot {
            let bullet = &mut self.bullets[self.next_index];
            bullet.is_active = true;
            bullet.collider.position =
                origin + direction * rng.random::<f32>() * self.tuning.max_offset;
            bullet.direction = rotate_vector(direction, rng.random_range(-deviation..=deviation));

            self.next_index = (self.next_index + 1) % self.bullets.len();
        }

        self.last_shot_time = Some(now);
        events.push(GameEvent::ShotgunFired);
        true
    }

    /// Move pellets and resolve hits against the enemy pool
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        enemies: &mut EnemyPool,
        events: &mut Vec<GameEvent>,
    ) {
        let step = self.tuning.bullet_speed * dt;
        let damage = self.tuning.damage;

        for bullet in self.bullets.iter_mut().filter(|b| b.is_active) {
            bullet.collider.position += bullet.direction * step;
            let position = bullet.collider.position;

            let hit = enemies
                .active()
                .find(|enemy| circle_point(&enemy.collider, position))
                .map(|enemy| enemy.slot_index);

            if let Some(slot) = hit {
                enemies.apply_damage(slot, damage, WeaponKind::Shotgun, events);
                bullet.is_active = false;
            } else if !arena.contains(position) {
                bullet.is_active = false;
            }
        }
    }

    /// Deactivate every pellet and clear the cooldown
    pub fn reset(&mut self) {
        for bullet in &mut self.bullets {
            bullet.is_active = false;
        }
        self.next_index = 0;
        self.last_shot_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_BULLETS;
    use crate::sim::enemy::parked_pool;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shotgun() -> Shotgun {
        Shotgun::new(MAX_BULLETS, ShotgunTuning::default())
    }

    #[test]
    fn test_burst_within_cone() {
        let mut gun = shotgun();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let aim = Vec2::new(0.0, 3.0);

        assert!(gun.fire(Vec2::new(5.0, 5.0), aim, 1.0, &mut rng, &mut events));
        assert_eq!(gun.active_count(), ShotgunTuning::default().pellets_per_shot);
        assert_eq!(events, vec![GameEvent::ShotgunFired]);

        let cone = ShotgunTuning::default().deviation;
        for bullet in gun.bullets().iter().filter(|b| b.is_active) {
            let angle = bullet.direction.dot(Vec2::Y).clamp(-1.0, 1.0).acos();
            assert!(angle <= cone + 1e-4, "pellet outside cone: {angle}");
            assert!((bullet.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cooldown_blocks_fire() {
        let mut gun = shotgun();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let pellets = ShotgunTuning::default().pellets_per_shot;

        assert!(gun.fire(Vec2::ONE, Vec2::X, 1.0, &mut rng, &mut events));
        assert!(!gun.fire(Vec2::ONE, Vec2::X, 1.2, &mut rng, &mut events));
        assert_eq!(gun.active_count(), pellets);

        assert!(gun.fire(Vec2::ONE, Vec2::X, 1.5, &mut rng, &mut events));
        assert_eq!(gun.active_count(), 2 * pellets);
    }

    #[test]
    fn test_zero_direction_is_ignored() {
        let mut gun = shotgun();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        assert!(!gun.fire(Vec2::ONE, Vec2::ZERO, 1.0, &mut rng, &mut events));
        assert_eq!(gun.active_count(), 0);
    }

    #[test]
    fn test_cursor_wraps_and_overwrites() {
        let mut gun = Shotgun::new(15, ShotgunTuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        gun.fire(Vec2::ONE, Vec2::X, 0.0, &mut rng, &mut events);
        gun.fire(Vec2::ONE, Vec2::X, 1.0, &mut rng, &mut events);
        // 20 pellets into 15 slots: the ring lapped the first burst
        assert_eq!(gun.active_count(), 15);
        assert_eq!(gun.next_index, 5);
    }

    #[test]
    fn test_pellet_hits_first_enemy_once() {
        let arena = Arena::default();
        let mut enemies = parked_pool(&[Vec2::new(3.0, 5.0)]);
        let mut gun = Shotgun::new(
            MAX_BULLETS,
            ShotgunTuning {
                pellets_per_shot: 1,
                deviation: 0.0,
                max_offset: 0.0,
                ..Default::default()
            },
        );
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        gun.fire(Vec2::new(2.0, 5.0), Vec2::X, 0.0, &mut rng, &mut events);
        for _ in 0..30 {
            gun.update(1.0 / 60.0, &arena, &mut enemies, &mut events);
        }

        assert_eq!(gun.active_count(), 0);
        let health = enemies.get(0).unwrap().health;
        assert!((health - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pellet_leaving_arena_deactivates() {
        let arena = Arena::default();
        let mut enemies = parked_pool(&[]);
        let mut gun = shotgun();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        gun.fire(Vec2::new(10.8, 4.5), Vec2::X, 0.0, &mut rng, &mut events);
        for _ in 0..10 {
            gun.update(1.0 / 60.0, &arena, &mut enemies, &mut events);
        }
        assert_eq!(gun.active_count(), 0);
        assert_eq!(events, vec![GameEvent::ShotgunFired]);
    }
}
