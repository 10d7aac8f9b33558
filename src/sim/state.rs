//! Game state and round controller
//!
//! One `GameState` owns every subsystem of a run. Nothing is global; the
//! tick threads this aggregate through each update call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, EnemySpawner};
use super::enemy::EnemyPool;
use super::events::{GameEvent, WeaponKind};
use super::explosion::ExplosionPool;
use super::player::Player;
use super::snapshot::FrameSnapshot;
use super::weapons::{Laser, Scythe, Shotgun};
use crate::consts::*;
use crate::highscores::{ScoreBoard, format_survived};
use crate::{Settings, Tuning};

/// Round/session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for the first input edge
    #[default]
    Stopped,
    Running,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub settings: Settings,
    pub arena: Arena,
    pub spawners: [EnemySpawner; SPAWNER_COUNT],
    pub enemies: EnemyPool,
    pub shotgun: Shotgun,
    pub scythe: Scythe,
    pub laser: Laser,
    pub explosions: ExplosionPool,
    pub player: Player,
    pub scores: ScoreBoard,
    pub round: RoundState,
    /// Weapon in the player's hands
    pub weapon: WeaponKind,
    /// Ten-second milestones crossed this round
    pub level: u32,
    /// Progress toward the next milestone, 0..1
    pub level_progress: f64,
    pub level_started_at: f64,
    pub round_started_at: f64,
    pub last_spawn_time: f64,
    /// Seconds survived in the last finished round
    pub last_round_duration: f64,
    /// Simulation clock (seconds)
    pub now: f64,
    pub time_ticks: u64,
    /// Signals raised during the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let arena = Arena::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawners: EnemySpawner::around(&arena),
            enemies: EnemyPool::new(MAX_ENEMIES, tuning.enemy.clone()),
            shotgun: Shotgun::new(MAX_BULLETS, tuning.shotgun.clone()),
            scythe: Scythe::new(tuning.scythe.clone()),
            laser: Laser::new(tuning.laser.clone()),
            explosions: ExplosionPool::new(MAX_EXPLOSIONS, tuning.explosion.clone()),
            player: Player::new(&arena),
            scores: ScoreBoard::new(),
            round: RoundState::Stopped,
            weapon: WeaponKind::default(),
            level: 0,
            level_progress: 0.0,
            level_started_at: 0.0,
            round_started_at: 0.0,
            last_spawn_time: 0.0,
            last_round_duration: 0.0,
            now: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            arena,
            tuning,
            settings,
        }
    }

    pub fn is_running(&self) -> bool {
        self.round == RoundState::Running
    }

    /// Seconds survived so far in the running round
    pub fn survived(&self) -> f64 {
        match self.round {
            RoundState::Running => self.now - self.round_started_at,
            RoundState::Stopped => self.last_round_duration,
        }
    }

    /// Seconds between spawns at the current level
    pub fn spawn_interval(&self) -> f64 {
        self.tuning.round.spawn_interval(self.level)
    }

    pub fn random_weapon(&mut self) -> WeaponKind {
        WeaponKind::ALL[self.rng.random_range(0..WeaponKind::ALL.len())]
    }

    /// Swap weapons; the beam never outlives its weapon
    pub fn set_weapon(&mut self, weapon: WeaponKind) {
        if weapon == self.weapon {
            return;
        }
        self.laser.turn_off(&mut self.events);
        log::debug!("Weapon {} -> {}", self.weapon.as_str(), weapon.as_str());
        self.weapon = weapon;
        self.events.push(GameEvent::WeaponChanged { weapon });
    }

    /// Stopped -> Running
    pub fn start_round(&mut self) {
        self.scores.reset_current();
        self.player.reset(&self.arena);
        self.player.immortal = self.settings.immortal;
        self.level = 0;
        self.level_progress = 0.0;
        self.level_started_at = self.now;
        self.round_started_at = self.now;
        self.last_spawn_time = self.now;
        self.weapon = self.random_weapon();
        self.round = RoundState::Running;

        log::info!("Round started with the {}", self.weapon.as_str());
        self.events.push(GameEvent::RoundStarted {
            weapon: self.weapon,
        });
    }

    /// Running -> Stopped: recycle every pool and record the round
    pub fn end_round(&mut self) {
        let survived = self.now - self.round_started_at;
        let score = self.scores.current;

        self.enemies.reset();
        self.shotgun.reset();
        self.scythe.reset();
        self.laser.turn_off(&mut self.events);
        self.explosions.reset();
        self.player.reset(&self.arena);
        self.player.is_dead = true;
        self.weapon = WeaponKind::default();

        match self.scores.record_round(score, self.level, survived) {
            Some(rank) => log::info!(
                "Round over: {} points in {} (rank #{})",
                score,
                format_survived(survived),
                rank
            ),
            None => log::info!("Round over: {} points in {}", score, format_survived(survived)),
        }

        self.level = 0;
        self.level_progress = 0.0;
        self.last_round_duration = survived;
        self.round = RoundState::Stopped;
        self.events.push(GameEvent::PlayerDied {
            survived_secs: survived,
            score,
        });
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}
