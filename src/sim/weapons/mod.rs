//! The three weapons
//!
//! Each weapon owns its own pool and resolves hits against the shared enemy
//! pool through the collision primitives. Kills are announced only by
//! [`EnemyPool::apply_damage`](crate::sim::enemy::EnemyPool::apply_damage).

pub mod laser;
pub mod scythe;
pub mod shotgun;

pub use laser::Laser;
pub use scythe::{Scythe, ScytheHitPoint};
pub use shotgun::{Bullet, Shotgun};
