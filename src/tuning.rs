//! Data-driven game balance
//!
//! Every number that shapes how the game feels lives here so it can be
//! overridden from a JSON document without rebuilding. Missing fields fall
//! back to the shipped defaults.

use serde::{Deserialize, Serialize};

/// Enemy movement, health and contact tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Minimum movement speed (units/sec)
    pub base_speed: f32,
    /// Random extra speed, scaled by U(0, 1)
    pub speed_scale: f32,
    /// Extra speed per difficulty level
    pub level_speed_step: f32,
    /// Cap on the difficulty speed bonus
    pub max_level_bonus: f32,
    /// Facing interpolation rate (per second)
    pub rotation_speed: f32,
    pub collider_radius: f32,
    pub health: f32,
    /// Squared distance at which an enemy catches the player
    pub contact_distance_sq: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_speed: 0.6,
            speed_scale: 0.6,
            level_speed_step: 0.05,
            max_level_bonus: 0.5,
            rotation_speed: 5.0,
            collider_radius: 0.15,
            health: 1.0,
            contact_distance_sq: 0.04,
        }
    }
}

impl EnemyTuning {
    /// Speed bonus granted at a difficulty level
    pub fn level_bonus(&self, level: u32) -> f32 {
        (level as f32 * self.level_speed_step).min(self.max_level_bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotgunTuning {
    pub pellets_per_shot: usize,
    /// Minimum time between shots (seconds)
    pub shot_delay: f64,
    /// Half-angle of the spread cone (radians)
    pub deviation: f32,
    /// Maximum random forward jitter of a pellet's start point
    pub max_offset: f32,
    pub bullet_speed: f32,
    pub damage: f32,
}

impl Default for ShotgunTuning {
    fn default() -> Self {
        Self {
            pellets_per_shot: 10,
            shot_delay: 0.5,
            deviation: 0.3,
            max_offset: 0.15,
            bullet_speed: 8.0,
            damage: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScytheTuning {
    /// Delay between consecutive hit-points lighting up
    pub stagger: f64,
    /// How long each hit-point stays live
    pub activity_time: f64,
    /// Radius of the swing at full range ratio
    pub arc_distance: f32,
    /// Instant-hit radius around the player when a swing starts
    pub point_blank_radius: f32,
    pub damage: f32,
}

impl Default for ScytheTuning {
    fn default() -> Self {
        Self {
            stagger: 0.035,
            activity_time: 0.25,
            arc_distance: 0.75,
            point_blank_radius: 0.5,
            damage: 0.5,
        }
    }
}

impl ScytheTuning {
    /// Full swing animation length; also the re-trigger interval
    pub fn swing_duration(&self, hit_points: usize) -> f64 {
        hit_points.saturating_sub(1) as f64 * self.stagger + self.activity_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserTuning {
    pub max_length: f32,
    pub damage_per_second: f32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            max_length: 12.0,
            damage_per_second: 3.0,
        }
    }
}

/// Round pacing: difficulty ramp and spawn cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTuning {
    /// Length of one difficulty step (seconds)
    pub level_duration: f64,
    pub base_spawn_interval: f64,
    pub spawn_interval_gain: f64,
    pub min_spawn_interval: f64,
    pub score_per_kill: u64,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            level_duration: 10.0,
            base_spawn_interval: 1.0,
            spawn_interval_gain: 0.08,
            min_spawn_interval: 0.2,
            score_per_kill: 1,
        }
    }
}

impl RoundTuning {
    /// Shortest difficulty step a balance file may ask for (seconds)
    pub const MIN_LEVEL_DURATION: f64 = 0.1;

    /// Seconds between spawns at a difficulty level
    pub fn spawn_interval(&self, level: u32) -> f64 {
        (self.base_spawn_interval - level as f64 * self.spawn_interval_gain)
            .max(self.min_spawn_interval)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub frame_time: f64,
    pub frame_count: u32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            frame_time: 0.05,
            frame_count: 8,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub enemy: EnemyTuning,
    pub shotgun: ShotgunTuning,
    pub scythe: ScytheTuning,
    pub laser: LaserTuning,
    pub round: RoundTuning,
    pub explosion: ExplosionTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON balance document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a balance file, keeping the defaults if it can't be used
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Can't read tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation can't run with by their defaults
    pub fn sanitize(&mut self) {
        let duration = self.round.level_duration;
        if !duration.is_finite() || duration < RoundTuning::MIN_LEVEL_DURATION {
            log::warn!("Ignoring level_duration {}", duration);
            self.round.level_duration = RoundTuning::default().level_duration;
        }
    }

    /// Parse `json`, keeping the defaults if it is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(mut tuning) => {
                log::info!("Loaded tuning overrides");
                tuning.sanitize();
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning: {}", e);
                Self::default()
            }
        }
    }
}
