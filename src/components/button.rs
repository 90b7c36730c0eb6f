//! Clickable overlay button.
//!
//! A button is a rectangle at its
//! [`ScreenPosition`](super::screenposition::ScreenPosition). The
//! [`button_system`](crate::systems::button::button_system) emits a
//! [`ButtonClickedEvent`](crate::events::button::ButtonClickedEvent) when it
//! is clicked or when ENTER is pressed.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

/// What a button does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    Resume,
    Restart,
}

#[derive(Component, Clone, Debug)]
pub struct Button {
    pub action: ButtonAction,
    pub label: String,
    pub size: Vector2,
    pub color: Color,
}

impl Button {
    pub fn new(action: ButtonAction, label: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            action,
            label: label.into(),
            size: Vector2 {
                x: width,
                y: height,
            },
            color: Color::WHITE,
        }
    }

    /// Whether `point` lies inside the button placed at `pos`.
    pub fn contains(&self, pos: Vector2, point: Vector2) -> bool {
        point.x >= pos.x
            && point.x <= pos.x + self.size.x
            && point.y >= pos.y
            && point.y <= pos.y + self.size.y
    }
}
