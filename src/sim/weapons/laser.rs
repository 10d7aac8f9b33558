//! Laser: a continuous beam that burns the closest enemy in its path

use glam::Vec2;

use crate::direction_of;
use crate::sim::collision::circle_segment;
use crate::sim::enemy::EnemyPool;
use crate::sim::events::{GameEvent, WeaponKind};
use crate::tuning::LaserTuning;

#[derive(Debug, Clone)]
pub struct Laser {
    is_on: bool,
    /// Rendered beam, shortened to the enemy it stopped at
    beam_start: Vec2,
    beam_end: Vec2,
    /// Slot burned on the last update
    target: Option<usize>,
    tuning: LaserTuning,
}

impl Laser {
    pub fn new(tuning: LaserTuning) -> Self {
        Self {
            is_on: false,
            beam_start: Vec2::ZERO,
            beam_end: Vec2::ZERO,
            target: None,
            tuning,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Beam segment, if the laser is on
    pub fn beam(&self) -> Option<(Vec2, Vec2)> {
        self.is_on.then_some((self.beam_start, self.beam_end))
    }

    pub fn beam_length(&self) -> f32 {
        self.beam_start.distance(self.beam_end)
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Switch the beam on; emits `LaserOn` only on the edge
    pub fn turn_on(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.is_on {
            return false;
        }
        self.is_on = true;
        events.push(GameEvent::LaserOn);
        true
    }

    /// Switch the beam off; calling it while off changes nothing
    pub fn turn_off(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_on {
            return false;
        }
        self.is_on = false;
        self.target = None;
        events.push(GameEvent::LaserOff);
        true
    }

    /// Trace the beam from `origin` toward `aim` and burn the closest enemy
    pub fn update(
        &mut self,
        origin: Vec2,
        aim: Vec2,
        dt: f32,
        enemies: &mut EnemyPool,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.is_on {
            return;
        }

        self.beam_start = origin;
        self.target = None;
        let Some(direction) = direction_of(aim - origin) else {
            self.beam_end = origin;
            return;
        };
        let max_length = self.tuning.max_length;
        let full_end = origin + direction * max_length;

        // Stop where the enemy's center projects onto the beam, never past its reach
        let closest = enemies
            .active()
            .filter(|enemy| circle_segment(&enemy.collider, origin, full_end))
            .map(|enemy| {
                let along = (enemy.position - origin).dot(direction);
                (enemy.slot_index, along.clamp(0.0, max_length))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match closest {
            None => self.beam_end = full_end,
            Some((slot, distance)) => {
                self.beam_end = origin + direction * distance;
                self.target = Some(slot);
                let damage = self.tuning.damage_per_second * dt;
                enemies.apply_damage(slot, damage, WeaponKind::Laser, events);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::parked_pool;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_turn_off_is_idempotent() {
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        assert!(!laser.turn_off(&mut events));
        assert!(!laser.is_on());
        assert!(events.is_empty());

        assert!(laser.turn_on(&mut events));
        assert!(!laser.turn_on(&mut events));
        assert!(laser.turn_off(&mut events));
        assert!(!laser.turn_off(&mut events));
        assert_eq!(events, vec![GameEvent::LaserOn, GameEvent::LaserOff]);
    }

    #[test]
    fn test_only_closest_enemy_burns() {
        let origin = Vec2::new(1.0, 1.0);
        let mut enemies = parked_pool(&[
            Vec2::new(9.0, 1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(6.0, 1.0),
        ]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.turn_on(&mut events);
        laser.update(origin, Vec2::new(10.0, 1.0), DT, &mut enemies, &mut events);

        assert_eq!(laser.target(), Some(1));
        assert!((laser.beam_length() - 2.0).abs() < 1e-5);
        let burned = 1.0 - LaserTuning::default().damage_per_second * DT;
        assert!((enemies.get(1).unwrap().health - burned).abs() < 1e-6);
        assert_eq!(enemies.get(0).unwrap().health, 1.0);
        assert_eq!(enemies.get(2).unwrap().health, 1.0);
    }

    #[test]
    fn test_clear_path_runs_full_length() {
        let mut enemies = parked_pool(&[Vec2::new(3.0, 4.0)]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.turn_on(&mut events);
        laser.update(Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0), DT, &mut enemies, &mut events);
        assert_eq!(laser.target(), None);
        assert!((laser.beam_length() - LaserTuning::default().max_length).abs() < 1e-4);
        assert_eq!(enemies.get(0).unwrap().health, 1.0);
    }

    #[test]
    fn test_beam_never_outgrows_max_length() {
        let origin = Vec2::new(1.0, 1.0);
        let max = LaserTuning::default().max_length;
        // Collider only clips the far tip of the beam
        let mut enemies = parked_pool(&[origin + Vec2::X * (max + 0.1)]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.turn_on(&mut events);
        laser.update(origin, origin + Vec2::X, DT, &mut enemies, &mut events);
        assert_eq!(laser.target(), Some(0));
        assert!(laser.beam_length() <= max + 1e-4);
    }

    #[test]
    fn test_enemy_on_the_emitter_stops_beam_there() {
        let origin = Vec2::new(4.0, 4.0);
        let mut enemies = parked_pool(&[origin - Vec2::X * 0.1]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.turn_on(&mut events);
        laser.update(origin, origin + Vec2::X, DT, &mut enemies, &mut events);
        assert_eq!(laser.target(), Some(0));
        assert!(laser.beam_length() < 1e-5);
    }

    #[test]
    fn test_off_laser_does_nothing() {
        let mut enemies = parked_pool(&[Vec2::new(3.0, 1.0)]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.update(Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0), DT, &mut enemies, &mut events);
        assert!(laser.beam().is_none());
        assert_eq!(enemies.get(0).unwrap().health, 1.0);
    }

    #[test]
    fn test_continuous_burn_kills() {
        let mut enemies = parked_pool(&[Vec2::new(3.0, 1.0)]);
        let mut laser = Laser::new(LaserTuning::default());
        let mut events = Vec::new();

        laser.turn_on(&mut events);
        for _ in 0..60 {
            laser.update(Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0), DT, &mut enemies, &mut events);
        }
        assert_eq!(enemies.active_count(), 0);
        let kills = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { cause: WeaponKind::Laser, .. }))
            .count();
        assert_eq!(kills, 1);
    }
}
