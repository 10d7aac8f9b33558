//! Read-only frame views for presentation collaborators

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyState;
use super::events::WeaponKind;
use super::state::{GameState, RoundState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub rotation: f32,
    pub is_dead: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub slot: usize,
    pub state: EnemyState,
    pub position: Vec2,
    pub rotation: f32,
    pub health: f32,
    /// Only filled when collider overlays are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collider_radius: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Vec2,
    pub frame: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub time: f64,
    pub round: RoundState,
    pub level: u32,
    pub level_progress: f64,
    pub weapon: WeaponKind,
    pub score: u64,
    pub high_score: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<Vec2>,
    pub scythe_points: Vec<Vec2>,
    /// Beam start and end while the laser is on
    pub beam: Option<(Vec2, Vec2)>,
    pub explosions: Vec<ExplosionView>,
    /// Row-major grid heat (debug overlay)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_map: Option<Vec<f32>>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let show_colliders = state.settings.show_colliders;

        Self {
            tick: state.time_ticks,
            time: state.now,
            round: state.round,
            level: state.level,
            level_progress: state.level_progress,
            weapon: state.weapon,
            score: state.scores.current,
            high_score: state.scores.high,
            player: PlayerView {
                position: state.player.position,
                rotation: state.player.rotation(),
                is_dead: state.player.is_dead,
            },
            enemies: state
                .enemies
                .active()
                .map(|enemy| EnemyView {
                    slot: enemy.slot_index,
                    state: enemy.state,
                    position: enemy.position,
                    rotation: enemy.rotation(),
                    health: enemy.health,
                    collider_radius: show_colliders.then_some(enemy.collider.radius),
                })
                .collect(),
            bullets: state
                .shotgun
                .bullets()
                .iter()
                .filter(|b| b.is_active)
                .map(|b| b.collider.position)
                .collect(),
            scythe_points: state
                .scythe
                .active_points()
                .map(|p| p.collider.position)
                .collect(),
            beam: state.laser.beam(),
            explosions: state
                .explosions
                .running()
                .map(|e| ExplosionView {
                    position: e.position,
                    frame: e.frame,
                })
                .collect(),
            heat_map: state
                .settings
                .show_heat_map
                .then(|| state.enemies.flow_field().heat_map()),
        }
    }
}
