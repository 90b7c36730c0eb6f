//! Boss encounter entities.

use bevy_ecs::prelude::Component;

/// The boss target. Counts shots that hit it.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Boss {
    pub hits: u32,
}

/// A projectile fired by the player during the boss fight.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Shot;
