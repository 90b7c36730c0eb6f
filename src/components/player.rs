use bevy_ecs::prelude::Component;

/// Marks the player entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;
