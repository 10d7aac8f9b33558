//! Per-frame input snapshot
//!
//! The platform layer polls the raw keyboard/mouse state once per frame and
//! hands it over as a [`RawInput`]. [`InputState`] turns that into edge
//! classified state: *down* means went down this frame, *pressed* means held,
//! *up* means released this frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::screen_to_world;

/// Keys the game cares about; anything else is carried as a raw code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    Enter,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Extra1,
    Extra2,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::Extra1,
        MouseButton::Extra2,
    ];

    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Extra1 => 3,
            MouseButton::Extra2 => 4,
        }
    }
}

/// Raw device state as polled by the platform layer
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    /// Keys currently held
    pub keys: Vec<Key>,
    /// Held state per [`MouseButton`], in `MouseButton::ALL` order
    pub mouse_buttons: [bool; 5],
    /// Pointer position in screen pixels
    pub pointer: Vec2,
    /// Accumulated wheel value (platform units)
    pub scroll_wheel: i32,
}

impl RawInput {
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.mouse_buttons[button.index()] = true;
        self
    }
}

// Smooth scroll integration
const SMOOTH_SCROLL_ACCEL: f32 = 0.02;
const SMOOTH_SCROLL_DECELERATE: f32 = 0.95;
const SMOOTH_SCROLL_MAX: f32 = 1.0;
const SMOOTH_SCROLL_GRAVITY: f32 = 0.85;
const SMOOTH_SCROLL_EPSILON: f32 = 1e-4;

/// Edge-classified input for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down_keys: Vec<Key>,
    pressed_keys: Vec<Key>,
    up_keys: Vec<Key>,
    down_buttons: [bool; 5],
    pressed_buttons: [bool; 5],
    up_buttons: [bool; 5],
    current_wheel: i32,
    instant_scroll: i32,
    smooth_scroll: f32,
    smooth_scroll_velocity: f32,
    pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify this frame's raw state against the previous frame
    pub fn update(&mut self, raw: &RawInput) {
        self.up_keys = self
            .pressed_keys
            .iter()
            .copied()
            .filter(|k| !raw.keys.contains(k))
            .collect();
        self.down_keys = raw
            .keys
            .iter()
            .copied()
            .filter(|k| !self.pressed_keys.contains(k))
            .collect();
        self.pressed_keys = raw.keys.clone();

        for i in 0..self.pressed_buttons.len() {
            let held = raw.mouse_buttons[i];
            self.down_buttons[i] = held && !self.pressed_buttons[i];
            self.up_buttons[i] = !held && self.pressed_buttons[i];
            self.pressed_buttons[i] = held;
        }

        self.update_scroll(raw.scroll_wheel);
        self.pointer = raw.pointer;
    }

    fn update_scroll(&mut self, wheel: i32) {
        let previous = self.current_wheel;
        self.current_wheel = wheel;
        self.instant_scroll = (previous - wheel).signum();

        if self.instant_scroll == 0 {
            self.smooth_scroll_velocity *= SMOOTH_SCROLL_DECELERATE;
            if self.smooth_scroll_velocity.abs() < SMOOTH_SCROLL_EPSILON {
                self.smooth_scroll_velocity = 0.0;
            }
        } else {
            self.smooth_scroll_velocity += self.instant_scroll as f32 * SMOOTH_SCROLL_ACCEL;
        }

        let mut value = (self.smooth_scroll + self.smooth_scroll_velocity)
            .clamp(-SMOOTH_SCROLL_MAX, SMOOTH_SCROLL_MAX);
        value *= SMOOTH_SCROLL_GRAVITY;
        if value.abs() < SMOOTH_SCROLL_EPSILON {
            value = 0.0;
        }
        self.smooth_scroll = value;
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.down_keys.contains(&key)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn is_key_up(&self, key: Key) -> bool {
        self.up_keys.contains(&key)
    }

    pub fn any_key_down(&self) -> bool {
        !self.down_keys.is_empty()
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.down_buttons[button.index()]
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons[button.index()]
    }

    pub fn is_mouse_button_up(&self, button: MouseButton) -> bool {
        self.up_buttons[button.index()]
    }

    pub fn any_mouse_button_down(&self) -> bool {
        self.down_buttons.iter().any(|&b| b)
    }

    /// -1, 0 or 1 depending on wheel movement this frame
    pub fn instant_scroll(&self) -> i32 {
        self.instant_scroll
    }

    /// Smoothed wheel value in `[-1, 1]`
    pub fn smooth_scroll(&self) -> f32 {
        self.smooth_scroll
    }

    pub fn pointer_screen(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_world(&self) -> Vec2 {
        screen_to_world(self.pointer.x, self.pointer.y)
    }
}
