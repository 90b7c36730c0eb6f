//! Scrolling and velocity integration.
use bevy_ecs::prelude::*;

use crate::components::boss::Shot;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::Pickup;
use crate::components::rigidbody::RigidBody;
use crate::components::scrolling::ScrollingBackground;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        position.pos = position.pos + rigidbody.velocity.scale_by(time.delta);
    }
}

pub fn scroll_background(mut query: Query<&mut ScrollingBackground>, time: Res<WorldTime>) {
    for mut background in query.iter_mut() {
        background.advance(time.delta);
    }
}

/// Remove pickups that left through the left edge and shots that left
/// through the right edge.
pub fn offscreen_cleanup(
    mut commands: Commands,
    screen: Res<ScreenSize>,
    pickups: Query<(Entity, &MapPosition, &BoxCollider), With<Pickup>>,
    shots: Query<(Entity, &MapPosition), With<Shot>>,
) {
    for (entity, position, collider) in pickups.iter() {
        let (_, max) = collider.aabb(position.pos);
        if max.x < 0.0 {
            commands.entity(entity).despawn();
        }
    }
    for (entity, position) in shots.iter() {
        if position.pos.x > screen.w as f32 {
            commands.entity(entity).despawn();
        }
    }
}
