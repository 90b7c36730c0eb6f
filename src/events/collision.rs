//! Collision event type.
//!
//! The collision detector emits [`CollisionEvent`] whenever two entities with
//! colliders overlap. The gameplay rules live in
//! [`collision_observer`](crate::systems::collision::collision_observer).
use bevy_ecs::prelude::*;

/// Event fired when two entities with BoxCollider overlap.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
