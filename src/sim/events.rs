//! Side-effect signals emitted by the simulation
//!
//! The core never plays sounds or spawns particles itself. It records what
//! happened during a tick and lets audio/presentation consume the list.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The three interchangeable weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Shotgun,
    Scythe,
    Laser,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Shotgun, WeaponKind::Scythe, WeaponKind::Laser];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Scythe => "Scythe",
            WeaponKind::Laser => "Laser",
        }
    }
}

/// What dealt the killing blow
pub type KillCause = WeaponKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { weapon: WeaponKind },
    ShotgunFired,
    ScytheSwung,
    /// Laser loop should start
    LaserOn,
    /// Laser loop should stop
    LaserOff,
    EnemyKilled {
        slot: usize,
        position: Vec2,
        cause: KillCause,
    },
    ExplosionFired { slot: usize, position: Vec2 },
    /// A ten-second milestone was crossed
    LevelReached { level: u32 },
    WeaponChanged { weapon: WeaponKind },
    PlayerDied { survived_secs: f64, score: u64 },
}
