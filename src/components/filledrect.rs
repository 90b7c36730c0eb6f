use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Solid rectangle drawn at the entity's position, used for shots.
#[derive(Component, Clone, Copy, Debug)]
pub struct FilledRect {
    pub width: f32,
    pub height: f32,
    pub color: Color,
}
