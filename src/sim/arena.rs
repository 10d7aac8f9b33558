//! Playable rectangle and the fixed enemy spawn points around it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned playable area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(
                GRID_WIDTH as f32 * TILE_SIZE,
                GRID_HEIGHT as f32 * TILE_SIZE,
            ),
        }
    }
}

impl Arena {
    /// Inclusive containment test
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }

    pub fn clamp(&self, position: Vec2) -> Vec2 {
        position.clamp(self.min, self.max)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// A fixed point outside the arena that feeds enemies inward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawner {
    pub position: Vec2,
    /// Unit vector pointing into the arena
    pub direction: Vec2,
}

impl EnemySpawner {
    /// The nine perimeter spawners: three on top, two on each other side
    pub fn around(arena: &Arena) -> [EnemySpawner; SPAWNER_COUNT] {
        let size = arena.size();
        let at = |fx: f32, fy: f32| arena.min + Vec2::new(size.x * fx, size.y * fy);
        let top = arena.min.y - SPAWNER_OFFSET;
        let bottom = arena.max.y + SPAWNER_OFFSET;
        let left = arena.min.x - SPAWNER_OFFSET;
        let right = arena.max.x + SPAWNER_OFFSET;

        [
            Self::new(Vec2::new(at(0.25, 0.0).x, top), Vec2::Y),
            Self::new(Vec2::new(at(0.5, 0.0).x, top), Vec2::Y),
            Self::new(Vec2::new(at(0.75, 0.0).x, top), Vec2::Y),
            Self::new(Vec2::new(at(1.0 / 3.0, 0.0).x, bottom), Vec2::NEG_Y),
            Self::new(Vec2::new(at(2.0 / 3.0, 0.0).x, bottom), Vec2::NEG_Y),
            Self::new(Vec2::new(left, at(0.0, 1.0 / 3.0).y), Vec2::X),
            Self::new(Vec2::new(left, at(0.0, 2.0 / 3.0).y), Vec2::X),
            Self::new(Vec2::new(right, at(0.0, 1.0 / 3.0).y), Vec2::NEG_X),
            Self::new(Vec2::new(right, at(0.0, 2.0 / 3.0).y), Vec2::NEG_X),
        ]
    }

    fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_matches_grid() {
        let arena = Arena::default();
        assert_eq!(arena.max, Vec2::new(11.0, 9.0));
        assert!(arena.contains(arena.max));
        assert!(!arena.contains(Vec2::new(11.01, 1.0)));
        assert_eq!(arena.clamp(Vec2::new(-1.0, 20.0)), Vec2::new(0.0, 9.0));
    }

    #[test]
    fn test_spawners_outside_and_facing_in() {
        let arena = Arena::default();
        for spawner in EnemySpawner::around(&arena) {
            assert!(!arena.contains(spawner.position));
            assert!((spawner.direction.length() - 1.0).abs() < 1e-6);
            // One unit along the direction lands inside
            assert!(arena.contains(spawner.position + spawner.direction));
        }
    }
}
