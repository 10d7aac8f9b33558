//! Kill explosions: a small pool with an explicit free-list

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use crate::tuning::ExplosionTuning;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Explosion {
    pub slot_index: usize,
    pub start_time: f64,
    /// Animation frame reached at the last update
    pub frame: u32,
    /// Its sound cue has been emitted
    pub fired: bool,
    pub is_running: bool,
    pub position: Vec2,
}

#[derive(Debug, Clone)]
pub struct ExplosionPool {
    explosions: Vec<Explosion>,
    free: VecDeque<usize>,
    tuning: ExplosionTuning,
}

impl ExplosionPool {
    pub fn new(capacity: usize, tuning: ExplosionTuning) -> Self {
        Self {
            explosions: (0..capacity)
                .map(|slot_index| Explosion {
                    slot_index,
                    ..Default::default()
                })
                .collect(),
            free: (0..capacity).collect(),
            tuning,
        }
    }

    pub fn running(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter().filter(|e| e.is_running)
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Start an explosion; silently dropped when no slot is free
    pub fn spawn(&mut self, position: Vec2, now: f64) -> Option<usize> {
        let slot = self.free.pop_front()?;
        self.explosions[slot] = Explosion {
            slot_index: slot,
            start_time: now,
            frame: 0,
            fired: false,
            is_running: true,
            position,
        };
        Some(slot)
    }

    /// Advance animation frames; each explosion announces itself once
    pub fn update(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        let frame_time = self.tuning.frame_time;
        for explosion in self.explosions.iter_mut().filter(|e| e.is_running) {
            explosion.frame = ((now - explosion.start_time).max(0.0) / frame_time) as u32;
            if !explosion.fired {
                explosion.fired = true;
                events.push(GameEvent::ExplosionFired {
                    slot: explosion.slot_index,
                    position: explosion.position,
                });
            }
        }
    }

    /// Return finished explosions to the free-list
    pub fn recycle(&mut self) {
        for explosion in &mut self.explosions {
            if explosion.is_running && explosion.frame >= self.tuning.frame_count {
                explosion.is_running = false;
                self.free.push_back(explosion.slot_index);
            }
        }
    }

    pub fn reset(&mut self) {
        for explosion in &mut self.explosions {
            explosion.is_running = false;
        }
        self.free.clear();
        self.free.extend(0..self.explosions.len());
    }
}
