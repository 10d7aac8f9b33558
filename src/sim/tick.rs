//! Simulation tick
//!
//! Advances a run by one externally supplied delta. Order within a tick:
//! round control and spawning, player, enemies (flow field first), weapon
//! damage, kill resolution, then pooled-object recycling.

use rand::Rng;

use super::events::{GameEvent, WeaponKind};
use super::state::{GameState, RoundState};
use crate::consts::SPAWNER_COUNT;
use crate::input::{InputState, MouseButton};

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) {
    state.events.clear();
    state.now += dt as f64;
    state.time_ticks += 1;

    if state.round == RoundState::Stopped {
        // Edge-triggered: a held button from the last round doesn't restart
        if input.any_key_down() || input.any_mouse_button_down() {
            state.start_round();
        }
        return;
    }

    advance_level(state);
    spawn_enemies(state);

    state.player.update(input, &state.arena, dt);
    let caught = state
        .enemies
        .update(state.player.position, &state.arena, dt);

    use_weapons(state, input, dt);
    resolve_kills(state);

    state.explosions.update(state.now, &mut state.events);
    state.explosions.recycle();

    if caught && !state.player.immortal {
        state.end_round();
    }
}

/// Ten-second difficulty ramp
///
/// A long stall crosses several levels at once; that is announced as one
/// milestone for the level landed on.
fn advance_level(state: &mut GameState) {
    let duration = state.tuning.round.level_duration;
    if !duration.is_finite() || duration <= 0.0 {
        return;
    }

    let crossed = ((state.now - state.level_started_at) / duration).floor();
    if crossed >= 1.0 {
        state.level_started_at += crossed * duration;
        state.level = state.level.saturating_add(crossed.min(u32::MAX as f64) as u32);
        log::info!(
            "Level {} reached after {:.0}s",
            state.level,
            state.survived()
        );
        state.events.push(GameEvent::LevelReached { level: state.level });

        if state.settings.reroll_weapon_on_level_up {
            let weapon = state.random_weapon();
            state.set_weapon(weapon);
        }
    }
    state.level_progress = ((state.now - state.level_started_at) / duration).clamp(0.0, 1.0);
}

/// At most one spawn per tick, at a random spawner
fn spawn_enemies(state: &mut GameState) {
    if state.now - state.last_spawn_time < state.spawn_interval() {
        return;
    }
    state.last_spawn_time = state.now;

    let spawner = state.spawners[state.rng.random_range(0..SPAWNER_COUNT)];
    state.enemies.spawn(&spawner, state.level, &mut state.rng);
}

fn use_weapons(state: &mut GameState, input: &InputState, dt: f32) {
    let trigger = input.is_mouse_button_pressed(MouseButton::Left);
    let aim = input.pointer_world();
    let now = state.now;

    match state.weapon {
        WeaponKind::Shotgun => {
            if trigger {
                let origin = state.player.weapon_origin(WeaponKind::Shotgun);
                state
                    .shotgun
                    .fire(origin, aim - origin, now, &mut state.rng, &mut state.events);
            }
        }
        WeaponKind::Scythe => {
            if trigger {
                let origin = state.player.weapon_origin(WeaponKind::Scythe);
                state
                    .scythe
                    .hit(origin, now, &mut state.enemies, &mut state.events);
            }
        }
        WeaponKind::Laser => {
            if trigger {
                state.laser.turn_on(&mut state.events);
            } else {
                state.laser.turn_off(&mut state.events);
            }
        }
    }

    // Projectiles and swings in flight finish even after a weapon swap
    state.scythe.update(
        state.player.weapon_origin(WeaponKind::Scythe),
        state.player.facing,
        now,
        &mut state.enemies,
        &mut state.events,
    );
    state.laser.update(
        state.player.weapon_origin(WeaponKind::Laser),
        aim,
        dt,
        &mut state.enemies,
        &mut state.events,
    );
    state
        .shotgun
        .update(dt, &state.arena, &mut state.enemies, &mut state.events);
}

/// Score and an explosion for every kill announced this tick
fn resolve_kills(state: &mut GameState) {
    let per_kill = state.tuning.round.score_per_kill;
    for event in &state.events {
        if let GameEvent::EnemyKilled { position, .. } = event {
            state.scores.gain(per_kill);
            state.explosions.spawn(*position, state.now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_ENEMIES, SIM_DT};
    use crate::input::{Key, RawInput};
    use crate::sim::enemy::EnemyState;
    use crate::{Settings, Tuning};
    use glam::Vec2;

    fn frame(input: &mut InputState, raw: RawInput) -> &InputState {
        input.update(&raw);
        input
    }

    /// Spawning pushed out of reach so tests control every enemy
    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.round.base_spawn_interval = 1.0e6;
        tuning.round.min_spawn_interval = 1.0e6;
        tuning
    }

    fn started(tuning: Tuning, settings: Settings) -> (GameState, InputState) {
        let mut state = GameState::with_config(7, tuning, settings);
        let mut input = InputState::new();
        let raw = RawInput {
            keys: vec![Key::Space],
            ..Default::default()
        };
        tick(&mut state, frame(&mut input, raw), SIM_DT);
        assert_eq!(state.round, RoundState::Running);
        (state, input)
    }

    /// Park a motionless fighting enemy at `position`
    fn park_enemy(state: &mut GameState, position: Vec2) -> usize {
        let spawner = state.spawners[0];
        let slot = state
            .enemies
            .spawn(&spawner, 0, &mut state.rng)
            .unwrap();
        let enemy = state.enemies.get_mut(slot).unwrap();
        enemy.state = EnemyState::FightingPlayer;
        enemy.movement_speed = 0.0;
        enemy.set_position(position);
        slot
    }

    #[test]
    fn test_tick_stopped_to_running() {
        let mut state = GameState::new(12345);
        let mut input = InputState::new();

        // No input: stays stopped
        tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
        assert_eq!(state.round, RoundState::Stopped);

        let click = RawInput::default().with_button(MouseButton::Left);
        tick(&mut state, frame(&mut input, click), SIM_DT);
        assert_eq!(state.round, RoundState::Running);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::RoundStarted { .. }]
        ));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut input1 = InputState::new();
        let mut input2 = InputState::new();

        for i in 0..600 {
            let raw = RawInput {
                keys: if i % 90 < 45 { vec![Key::W] } else { vec![Key::D] },
                mouse_buttons: [i > 0, false, false, false, false],
                pointer: Vec2::new((i * 7 % 1400) as f32, 500.0),
                scroll_wheel: 0,
            };
            tick(&mut state1, frame(&mut input1, raw.clone()), SIM_DT);
            tick(&mut state2, frame(&mut input2, raw), SIM_DT);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
        assert_eq!(state1.scores.entries, state2.scores.entries);
    }

    #[test]
    fn test_spawn_cadence() {
        let (mut state, mut input) = started(
            Tuning::default(),
            Settings {
                immortal: true,
                ..Default::default()
            },
        );
        // 2.5 seconds at one spawn per second
        for _ in 0..150 {
            tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
        }
        assert_eq!(state.enemies.active_count(), 2);
        assert_eq!(state.enemies.active_count() + state.enemies.free_count(), MAX_ENEMIES);
    }

    #[test]
    fn test_level_milestone_and_reroll() {
        let mut tuning = quiet_tuning();
        tuning.round.level_duration = 0.5;
        let (mut state, mut input) = started(tuning, Settings::default());

        let mut reached = Vec::new();
        for _ in 0..70 {
            tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
            for event in &state.events {
                if let GameEvent::LevelReached { level } = event {
                    reached.push(*level);
                }
            }
        }
        assert_eq!(reached, vec![1, 2]);
        assert_eq!(state.level, 2);
        assert!(state.level_progress >= 0.0 && state.level_progress < 1.0);
    }

    #[test]
    fn test_tiny_level_duration_jumps_in_one_step() {
        let mut tuning = quiet_tuning();
        tuning.round.level_duration = 1.0e-7;
        let (mut state, mut input) = started(tuning, Settings::default());

        tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
        let milestones = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelReached { .. }))
            .count();
        let swaps = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::WeaponChanged { .. }))
            .count();
        assert_eq!(milestones, 1);
        assert!(swaps <= 1);
        assert!(state.level > 1000);
        assert!(state.level_progress >= 0.0 && state.level_progress <= 1.0);
    }

    #[test]
    fn test_two_scythe_hits_score_once() {
        let settings = Settings {
            immortal: true,
            reroll_weapon_on_level_up: false,
            ..Default::default()
        };
        let (mut state, mut input) = started(quiet_tuning(), settings);
        state.weapon = WeaponKind::Scythe;
        let target = state.player.position + Vec2::new(0.4, 0.0);
        let slot = park_enemy(&mut state, target);

        let held = RawInput::default().with_button(MouseButton::Left);
        let mut kills = 0;
        for _ in 0..120 {
            tick(&mut state, frame(&mut input, held.clone()), SIM_DT);
            kills += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { slot: s, .. } if *s == slot))
                .count();
        }

        assert_eq!(kills, 1);
        assert_eq!(state.scores.current, state.tuning.round.score_per_kill);
        assert_eq!(state.enemies.active_count(), 0);
        assert_eq!(state.enemies.free_count(), MAX_ENEMIES);
    }

    #[test]
    fn test_laser_follows_trigger() {
        let settings = Settings {
            immortal: true,
            ..Default::default()
        };
        let (mut state, mut input) = started(quiet_tuning(), settings);
        state.weapon = WeaponKind::Laser;

        let held = RawInput::default().with_button(MouseButton::Left);
        tick(&mut state, frame(&mut input, held), SIM_DT);
        assert!(state.laser.is_on());
        assert!(state.events.contains(&GameEvent::LaserOn));

        tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
        assert!(!state.laser.is_on());
        assert!(state.events.contains(&GameEvent::LaserOff));
    }

    #[test]
    fn test_kill_spawns_explosion() {
        let settings = Settings {
            immortal: true,
            ..Default::default()
        };
        let (mut state, mut input) = started(quiet_tuning(), settings);
        state.weapon = WeaponKind::Scythe;
        let target = state.player.position + Vec2::new(0.3, 0.0);
        let slot = park_enemy(&mut state, target);
        state.enemies.get_mut(slot).unwrap().health = 0.1;

        let click = RawInput::default().with_button(MouseButton::Left);
        tick(&mut state, frame(&mut input, click), SIM_DT);

        assert_eq!(state.scores.current, 1);
        assert_eq!(state.explosions.running().count(), 1);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ExplosionFired { .. }))
        );
    }

    #[test]
    fn test_contact_ends_round() {
        let (mut state, mut input) = started(quiet_tuning(), Settings::default());
        state.weapon = WeaponKind::Shotgun;
        let target = state.player.position + Vec2::new(0.1, 0.0);
        park_enemy(&mut state, target);
        let held = RawInput::default().with_button(MouseButton::Left);
        tick(&mut state, frame(&mut input, held.clone()), SIM_DT);

        assert_eq!(state.round, RoundState::Stopped);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerDied { .. }))
        );
        assert_eq!(state.enemies.active_count(), 0);
        assert_eq!(state.enemies.free_count(), MAX_ENEMIES);
        assert_eq!(state.shotgun.active_count(), 0);
        assert_eq!(state.explosions.running().count(), 0);
        assert_eq!(state.level, 0);
        assert!(state.last_round_duration > 0.0);

        // Still holding the button: no restart without a fresh edge
        tick(&mut state, frame(&mut input, held), SIM_DT);
        assert_eq!(state.round, RoundState::Stopped);
    }

    #[test]
    fn test_immortal_survives_contact() {
        let settings = Settings {
            immortal: true,
            ..Default::default()
        };
        let (mut state, mut input) = started(quiet_tuning(), settings);
        let target = state.player.position;
        park_enemy(&mut state, target);
        for _ in 0..10 {
            tick(&mut state, frame(&mut input, RawInput::default()), SIM_DT);
        }
        assert_eq!(state.round, RoundState::Running);
    }
}
