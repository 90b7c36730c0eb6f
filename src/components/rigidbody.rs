//! Kinematic body component.
//!
//! The [`RigidBody`] stores a constant velocity consumed by the
//! [`movement`](crate::systems::movement::movement) system. Pickups and shots
//! are the only moving bodies; the player is positioned directly by the
//! motion mapper.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in pixels per second.
    pub velocity: Vector2,
    /// When true, movement system skips this entity.
    pub frozen: bool,
}

impl RigidBody {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vector2 { x: vx, y: vy },
            frozen: false,
        }
    }
}
