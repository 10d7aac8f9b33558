//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::events::WeaponKind;
use crate::input::{InputState, Key};
use crate::{direction_of, facing_to_rotation, rotate_vector};

pub const PLAYER_MOVEMENT_SPEED: f32 = 2.0;
pub const PLAYER_ROTATION_SPEED: f32 = 5.0;

/// Weapon mount points for a +X facing
const SHOTGUN_MUZZLE: Vec2 = Vec2::new(0.3, 0.08);
const LASER_EMITTER: Vec2 = Vec2::new(0.3, -0.08);
const SCYTHE_PIVOT: Vec2 = Vec2::ZERO;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// Unit vector
    pub facing: Vec2,
    pub is_dead: bool,
    /// Contact with enemies is ignored
    pub immortal: bool,
    pub shotgun_offset: Vec2,
    pub laser_offset: Vec2,
    pub scythe_offset: Vec2,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        Self {
            position: arena.center(),
            facing: Vec2::X,
            is_dead: false,
            immortal: false,
            shotgun_offset: SHOTGUN_MUZZLE,
            laser_offset: LASER_EMITTER,
            scythe_offset: SCYTHE_PIVOT,
        }
    }

    pub fn rotation(&self) -> f32 {
        facing_to_rotation(self.facing)
    }

    /// World position a weapon fires from
    pub fn weapon_origin(&self, weapon: WeaponKind) -> Vec2 {
        let offset = match weapon {
            WeaponKind::Shotgun => self.shotgun_offset,
            WeaponKind::Laser => self.laser_offset,
            WeaponKind::Scythe => self.scythe_offset,
        };
        self.position + rotate_vector(offset, self.rotation())
    }

    /// WASD movement and turning toward the pointer
    pub fn update(&mut self, input: &InputState, arena: &Arena, dt: f32) {
        let axis = |negative: Key, positive: Key| -> f32 {
            match (input.is_key_pressed(negative), input.is_key_pressed(positive)) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        };
        let movement = Vec2::new(axis(Key::A, Key::D), axis(Key::W, Key::S));
        if let Some(direction) = direction_of(movement) {
            self.position = arena.clamp(self.position + direction * PLAYER_MOVEMENT_SPEED * dt);
        }

        self.turn_toward(input.pointer_world(), dt);
    }

    /// Rotate facing toward a world point by linear interpolation
    pub fn turn_toward(&mut self, target: Vec2, dt: f32) {
        let Some(wanted) = direction_of(target - self.position) else {
            return;
        };
        let t = (PLAYER_ROTATION_SPEED * dt).clamp(0.0, 1.0);
        if let Some(facing) = direction_of(self.facing.lerp(wanted, t)) {
            self.facing = facing;
        }
    }

    /// Back to the arena center, alive, facing +X
    pub fn reset(&mut self, arena: &Arena) {
        self.position = arena.center();
        self.facing = Vec2::X;
        self.is_dead = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawInput;

    fn held(keys: &[Key], pointer: Vec2) -> InputState {
        let mut input = InputState::new();
        input.update(&RawInput {
            keys: keys.to_vec(),
            pointer,
            ..Default::default()
        });
        input
    }

    #[test]
    fn test_diagonal_movement_normalized() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        let start = player.position;
        let input = held(&[Key::D, Key::S], Vec2::ZERO);

        player.update(&input, &arena, 0.5);
        let moved = player.position - start;
        assert!((moved.length() - PLAYER_MOVEMENT_SPEED * 0.5).abs() < 1e-5);
        assert!(moved.x > 0.0 && moved.y > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        let start = player.position;
        player.update(&held(&[Key::A, Key::D], Vec2::ZERO), &arena, 0.5);
        assert_eq!(player.position, start);
    }

    #[test]
    fn test_movement_clamped_to_arena() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        for _ in 0..100 {
            player.update(&held(&[Key::A], Vec2::ZERO), &arena, 0.1);
        }
        assert_eq!(player.position.x, arena.min.x);
    }

    #[test]
    fn test_weapon_origin_rotates_with_facing() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        player.facing = Vec2::Y;
        let muzzle = player.weapon_origin(WeaponKind::Shotgun) - player.position;
        assert!((muzzle - Vec2::new(-0.08, 0.3)).length() < 1e-5);
        assert_eq!(player.weapon_origin(WeaponKind::Scythe), player.position);
    }

    #[test]
    fn test_turns_gradually_toward_pointer() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        // Pointer straight below the player in screen space
        let below = crate::world_to_screen(player.position + Vec2::new(0.0, 2.0));
        let input = held(&[], Vec2::new(below.0 as f32, below.1 as f32));

        player.update(&input, &arena, 1.0 / 60.0);
        assert!(player.facing.y > 0.0 && player.facing.x > 0.5);
        for _ in 0..120 {
            player.update(&input, &arena, 1.0 / 60.0);
        }
        assert!(player.facing.y > 0.99);
    }
}
