//! Swarm Arena - top-down arcade survival shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemy swarm, flow field, weapons, rounds)
//! - `input`: Edge-classified keyboard/mouse snapshot
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: In-memory score counters and leaderboard
//! - `audio`: Event to sound-cue dispatch
//! - `demo`: Scripted autopilot for headless runs

pub mod audio;
pub mod demo;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::ScoreBoard;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed step used by the headless runner and tests
    pub const SIM_HZ: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World units to screen pixels
    pub const PIXELS_PER_UNIT: f32 = 128.0;

    /// Flow-field grid dimensions (cells)
    pub const GRID_WIDTH: usize = 44;
    pub const GRID_HEIGHT: usize = 36;
    /// Edge length of one grid cell in world units
    pub const TILE_SIZE: f32 = 0.25;
    /// Heat assumed for cells outside the grid (repulsive wall)
    pub const BOUNDARY_HEAT: f32 = 10.0;

    /// Pool capacities
    pub const MAX_ENEMIES: usize = 300;
    pub const MAX_BULLETS: usize = 200;
    pub const MAX_EXPLOSIONS: usize = 64;
    pub const SCYTHE_HIT_POINTS: usize = 11;

    /// Number of fixed spawn points around the arena
    pub const SPAWNER_COUNT: usize = 9;
    /// How far outside the arena the spawners sit
    pub const SPAWNER_OFFSET: f32 = 0.5;

    /// Vectors shorter than this are treated as zero
    pub const NEAR_ZERO: f32 = 1e-6;
}

/// Rotate a vector counter-clockwise by `radians`
#[inline]
pub fn rotate_vector(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle of a facing vector (radians, atan2 convention)
#[inline]
pub fn facing_to_rotation(facing: Vec2) -> f32 {
    facing.y.atan2(facing.x)
}

/// Convert a world position to integer screen pixels
#[inline]
pub fn world_to_screen(position: Vec2) -> (i32, i32) {
    let x = (position.x * consts::PIXELS_PER_UNIT).floor() as i32;
    let y = (position.y * consts::PIXELS_PER_UNIT).floor() as i32;
    (x, y)
}

/// Convert screen pixels back to world units
#[inline]
pub fn screen_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y) / consts::PIXELS_PER_UNIT
}

/// Normalize `v`, or `None` if it is too short to have a direction
#[inline]
pub fn direction_of(v: Vec2) -> Option<Vec2> {
    if v.length_squared() < consts::NEAR_ZERO {
        None
    } else {
        Some(v.normalize())
    }
}
