//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Arrow keys steer (and fire
//! during the boss fight), ESC pauses, ENTER activates buttons, F11 toggles
//! debug mode.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Update from the raw key state, deriving the edge flags.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub direction_up: BoolState,
    pub direction_down: BoolState,
    pub action_back: BoolState,
    pub action_confirm: BoolState,
    pub mode_debug: BoolState,
    /// Mouse position in screen pixels.
    pub mouse_pos: Vector2,
    /// Left button went down this frame.
    pub mouse_clicked: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            direction_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            direction_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            action_back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
            action_confirm: BoolState::bound_to(KeyboardKey::KEY_ENTER),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            mouse_pos: Vector2::zero(),
            mouse_clicked: false,
        }
    }
}
