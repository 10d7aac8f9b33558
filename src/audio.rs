//! Audio dispatch
//!
//! The simulation only raises events. This module turns them into
//! fire-and-forget sound cues on whatever backend implements `AudioSink`.

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A run begins
    RoundStart,
    /// Shotgun burst
    ShotgunBlast,
    /// Scythe swing starts
    ScytheSwing,
    /// Kill explosion goes off
    EnemyDestroyed,
    /// Ten-second milestone crossed
    Milestone,
    /// Weapon re-rolled
    WeaponSwap,
    /// Player caught
    GameOver,
}

/// Playback backend
///
/// Calls must not block; a sink that can't play simply drops the cue.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start or stop the looping beam sound
    fn set_laser_loop(&mut self, on: bool, volume: f32);
}

/// Sink for headless runs: every cue becomes a log line
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn set_laser_loop(&mut self, on: bool, volume: f32) {
        log::debug!("laser loop {} @ {:.2}", if on { "on" } else { "off" }, volume);
    }
}

/// Sink that remembers what it was asked to play
#[derive(Debug, Default)]
pub struct RecordingAudioSink {
    pub played: Vec<(SoundEffect, f32)>,
    pub laser_loop: bool,
}

impl AudioSink for RecordingAudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }

    fn set_laser_loop(&mut self, on: bool, _volume: f32) {
        self.laser_loop = on;
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        let mut manager = Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Translate one tick's events into cues
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            let effect = match event {
                GameEvent::RoundStarted { .. } => SoundEffect::RoundStart,
                GameEvent::ShotgunFired => SoundEffect::ShotgunBlast,
                GameEvent::ScytheSwung => SoundEffect::ScytheSwing,
                GameEvent::ExplosionFired { .. } => SoundEffect::EnemyDestroyed,
                GameEvent::LevelReached { .. } => SoundEffect::Milestone,
                GameEvent::WeaponChanged { .. } => SoundEffect::WeaponSwap,
                GameEvent::PlayerDied { .. } => SoundEffect::GameOver,
                GameEvent::LaserOn | GameEvent::LaserOff => {
                    let vol = self.effective_volume();
                    self.sink
                        .set_laser_loop(matches!(event, GameEvent::LaserOn), vol);
                    continue;
                }
                // The explosion that follows carries the sound
                GameEvent::EnemyKilled { .. } => continue,
            };
            self.play(effect);
        }
    }
}
