//! Enemy registry: fixed slot pool, FIFO free-list and swarm movement
//!
//! Enemies enter from a spawner walking straight along its direction. Once
//! inside the arena they chase the player, blending the straight line to the
//! player with the flow-field guide of their tile so the swarm spreads out
//! instead of stacking on one point.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, EnemySpawner};
use super::collision::CircleCollider;
use super::events::{GameEvent, KillCause};
use super::flow_field::FlowField;
use crate::tuning::EnemyTuning;
use crate::{direction_of, facing_to_rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Slot is free
    #[default]
    Inactive,
    /// Walking in from a spawner, not yet inside the arena
    GoesIn,
    /// Inside the arena, chasing the player
    FightingPlayer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub slot_index: usize,
    pub state: EnemyState,
    pub position: Vec2,
    /// Unit vector
    pub facing: Vec2,
    pub movement_speed: f32,
    pub rotation_speed: f32,
    /// Always centered on `position`
    pub collider: CircleCollider,
    pub health: f32,
}

impl Enemy {
    fn new(slot_index: usize, radius: f32) -> Self {
        Self {
            slot_index,
            state: EnemyState::Inactive,
            position: Vec2::ZERO,
            facing: Vec2::X,
            movement_speed: 0.0,
            rotation_speed: 0.0,
            collider: CircleCollider::new(Vec2::ZERO, radius),
            health: 0.0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != EnemyState::Inactive
    }

    /// Move the enemy and its collider together
    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.collider.position = position;
    }

    pub fn rotation(&self) -> f32 {
        facing_to_rotation(self.facing)
    }

    /// Turn toward `target` by linear interpolation at `rotation_speed`
    fn turn_toward(&mut self, target: Vec2, dt: f32) {
        let t = (self.rotation_speed * dt).clamp(0.0, 1.0);
        if let Some(facing) = direction_of(self.facing.lerp(target, t)) {
            self.facing = facing;
        }
    }
}

/// Fixed-capacity enemy pool
#[derive(Debug, Clone)]
pub struct EnemyPool {
    enemies: Vec<Enemy>,
    /// FIFO of free slot indices; never holds an index twice
    free: VecDeque<usize>,
    field: FlowField,
    // Per-tick buckets, rebuilt every update
    entering: Vec<usize>,
    fighting: Vec<usize>,
    tuning: EnemyTuning,
}

impl EnemyPool {
    pub fn new(capacity: usize, tuning: EnemyTuning) -> Self {
        Self {
            enemies: (0..capacity)
                .map(|i| Enemy::new(i, tuning.collider_radius))
                .collect(),
            free: (0..capacity).collect(),
            field: FlowField::default(),
            entering: Vec::with_capacity(capacity),
            fighting: Vec::with_capacity(capacity),
            tuning,
        }
    }

    pub fn capacity(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn get(&self, slot: usize) -> Option<&Enemy> {
        self.enemies.get(slot)
    }

    /// Test/debug access to a slot
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(slot)
    }

    pub fn active(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn flow_field(&self) -> &FlowField {
        &self.field
    }

    /// Take the oldest free slot and send an enemy in from `spawner`
    ///
    /// Does nothing when the pool is exhausted.
    pub fn spawn<R: Rng>(
        &mut self,
        spawner: &EnemySpawner,
        level: u32,
        rng: &mut R,
    ) -> Option<usize> {
        let Some(slot) = self.free.pop_front() else {
            log::debug!("Enemy pool exhausted, spawn dropped");
            return None;
        };

        let tuning = &self.tuning;
        let enemy = &mut self.enemies[slot];
        enemy.set_position(spawner.position);
        enemy.facing = spawner.direction;
        enemy.movement_speed = tuning.base_speed
            + rng.random::<f32>() * tuning.speed_scale
            + tuning.level_bonus(level);
        enemy.rotation_speed = tuning.rotation_speed;
        enemy.health = tuning.health;
        enemy.state = EnemyState::GoesIn;

        Some(slot)
    }

    /// Advance every enemy by `dt`
    ///
    /// Returns true if a fighting enemy reached the player.
    pub fn update(&mut self, player_position: Vec2, arena: &Arena, dt: f32) -> bool {
        // Old heat -> guides, before any heat is touched
        self.field.recompute_guides();

        self.entering.clear();
        self.fighting.clear();
        for enemy in &self.enemies {
            match enemy.state {
                EnemyState::GoesIn => self.entering.push(enemy.slot_index),
                EnemyState::FightingPlayer => self.fighting.push(enemy.slot_index),
                EnemyState::Inactive => {}
            }
        }

        for &slot in &self.entering {
            let enemy = &mut self.enemies[slot];
            let next = enemy.position + enemy.facing * enemy.movement_speed * dt;
            enemy.set_position(next);
            if arena.contains(next) {
                enemy.state = EnemyState::FightingPlayer;
            }
        }

        let mut player_caught = false;
        for &slot in &self.fighting {
            let guide = self.field.tile_at(self.enemies[slot].position).guide_direction;
            let enemy = &mut self.enemies[slot];

            let to_player = direction_of(player_position - enemy.position).unwrap_or(Vec2::ZERO);
            let away_from_crowd = direction_of(guide).unwrap_or(Vec2::ZERO);
            let move_direction = to_player + away_from_crowd;

            let next = enemy.position + move_direction * enemy.movement_speed * dt;
            enemy.set_position(arena.clamp(next));
            if let Some(target) = direction_of(move_direction) {
                enemy.turn_toward(target, dt);
            }

            if enemy.position.distance_squared(player_position) < self.tuning.contact_distance_sq {
                player_caught = true;
            }
        }

        self.field.clear_heat();
        for &slot in self.entering.iter().chain(self.fighting.iter()) {
            self.field.add_heat(self.enemies[slot].position);
        }

        player_caught
    }

    /// Damage one enemy; the single place a kill is announced
    ///
    /// Returns true if this hit killed it. Hits on free slots are ignored.
    pub fn apply_damage(
        &mut self,
        slot: usize,
        amount: f32,
        cause: KillCause,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let Some(enemy) = self.enemies.get_mut(slot) else {
            return false;
        };
        if !enemy.is_active() {
            return false;
        }

        enemy.health -= amount;
        if enemy.health > 0.0 {
            return false;
        }

        let position = enemy.position;
        self.kill(slot);
        events.push(GameEvent::EnemyKilled {
            slot,
            position,
            cause,
        });
        true
    }

    fn kill(&mut self, slot: usize) {
        let enemy = &mut self.enemies[slot];
        if enemy.is_active() {
            enemy.state = EnemyState::Inactive;
            self.free.push_back(slot);
        }
    }

    /// Free every slot and forget the flow field
    pub fn reset(&mut self) {
        for enemy in &mut self.enemies {
            enemy.state = EnemyState::Inactive;
        }
        self.free.clear();
        self.free.extend(0..self.enemies.len());
        self.field = FlowField::default();
    }
}

/// Pool with fighting enemies parked at `positions`, in slot order
#[cfg(test)]
pub(crate) fn parked_pool(positions: &[Vec2]) -> EnemyPool {
    use rand::SeedableRng;

    let mut pool = EnemyPool::new(crate::consts::MAX_ENEMIES, EnemyTuning::default());
    let mut rng = rand_pcg::Pcg32::seed_from_u64(3);
    let spawner = EnemySpawner::around(&Arena::default())[0];
    for &position in positions {
        if let Some(slot) = pool.spawn(&spawner, 0, &mut rng) {
            let enemy = &mut pool.enemies[slot];
            enemy.state = EnemyState::FightingPlayer;
            enemy.set_position(position);
        }
    }
    pool
}
