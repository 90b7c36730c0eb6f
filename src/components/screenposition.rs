//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores the top-left corner of an overlay
//! element (menu text, buttons) in screen pixels. The render system draws
//! these after the world pass.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    /// 2D coordinates in screen pixels.
    pub pos: Vector2,
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
