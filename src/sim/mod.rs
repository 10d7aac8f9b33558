//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Externally supplied time deltas only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod explosion;
pub mod flow_field;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod weapons;

pub use arena::{Arena, EnemySpawner};
pub use collision::{CircleCollider, PointCollider, circle_point, circle_segment};
pub use enemy::{Enemy, EnemyPool, EnemyState};
pub use events::{GameEvent, KillCause, WeaponKind};
pub use explosion::{Explosion, ExplosionPool};
pub use flow_field::{FlowField, Tile};
pub use player::Player;
pub use snapshot::FrameSnapshot;
pub use state::{GameState, RoundState};
pub use tick::tick;
pub use weapons::{Bullet, Laser, Scythe, ScytheHitPoint, Shotgun};
