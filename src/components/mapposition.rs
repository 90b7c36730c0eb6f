//! World-space position component.
//!
//! [`MapPosition`] is the top-left corner of an entity in screen pixels.
//! The game world is exactly one screen wide, so world and screen share
//! the same coordinates; overlay elements use
//! [`ScreenPosition`](super::screenposition::ScreenPosition) instead.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
