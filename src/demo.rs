//! Scripted autopilot for headless runs
//!
//! Plays the game through the same `RawInput` path a human would use: taps a
//! key to start a round, circles away from the swarm and holds the trigger
//! while something is in reach of the current weapon.

use glam::Vec2;

use crate::direction_of;
use crate::input::{Key, MouseButton, RawInput};
use crate::sim::{GameState, RoundState, WeaponKind};
use crate::world_to_screen;

/// Distance from the arena edge at which the autopilot heads back inward
const WALL_MARGIN: f32 = 1.0;
/// Seconds between strafe direction flips
const STRAFE_PERIOD: f64 = 3.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Start key was held last frame
    tapped: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next tick
    pub fn next_input(&mut self, state: &GameState) -> RawInput {
        if state.round == RoundState::Stopped {
            // Release between taps so every press is a fresh edge
            self.tapped = !self.tapped;
            return RawInput {
                keys: if self.tapped { vec![Key::Space] } else { Vec::new() },
                ..Default::default()
            };
        }
        self.tapped = false;

        let player = state.player.position;
        let Some(nearest) = state
            .enemies
            .active()
            .map(|e| e.position)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
        else {
            return self.wander(state);
        };

        let away = direction_of(player - nearest).unwrap_or(Vec2::X);
        // Circle the threat, flipping sides every few seconds
        let side = if (state.now / STRAFE_PERIOD) as u64 % 2 == 0 {
            1.0
        } else {
            -1.0
        };
        let mut heading = away + away.perp() * side;
        heading += self.wall_push(state);

        let (x, y) = world_to_screen(nearest);
        let mut input = RawInput {
            keys: keys_for(heading),
            pointer: Vec2::new(x as f32, y as f32),
            ..Default::default()
        };
        if nearest.distance(player) <= reach(state.weapon) {
            input = input.with_button(MouseButton::Left);
        }
        input
    }

    /// Nothing to shoot: drift back to the middle
    fn wander(&self, state: &GameState) -> RawInput {
        let to_center = state.arena.center() - state.player.position;
        let keys = if to_center.length() > WALL_MARGIN {
            keys_for(to_center)
        } else {
            Vec::new()
        };
        RawInput {
            keys,
            ..Default::default()
        }
    }

    fn wall_push(&self, state: &GameState) -> Vec2 {
        let p = state.player.position;
        let arena = &state.arena;
        let mut push = Vec2::ZERO;
        if p.x - arena.min.x < WALL_MARGIN {
            push.x += 1.0;
        }
        if arena.max.x - p.x < WALL_MARGIN {
            push.x -= 1.0;
        }
        if p.y - arena.min.y < WALL_MARGIN {
            push.y += 1.0;
        }
        if arena.max.y - p.y < WALL_MARGIN {
            push.y -= 1.0;
        }
        push * 2.0
    }
}

/// How close a target must be before the trigger is worth holding
fn reach(weapon: WeaponKind) -> f32 {
    match weapon {
        WeaponKind::Shotgun => 4.0,
        WeaponKind::Scythe => 1.0,
        WeaponKind::Laser => 8.0,
    }
}

/// WASD keys approximating a heading (screen y grows downward)
fn keys_for(heading: Vec2) -> Vec<Key> {
    let mut keys = Vec::new();
    let Some(dir) = direction_of(heading) else {
        return keys;
    };
    if dir.x < -0.3 {
        keys.push(Key::A);
    } else if dir.x > 0.3 {
        keys.push(Key::D);
    }
    if dir.y < -0.3 {
        keys.push(Key::W);
    } else if dir.y > 0.3 {
        keys.push(Key::S);
    }
    keys
}
