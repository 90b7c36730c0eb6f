use bevy_ecs::prelude::Resource;

/// Seconds elapsed since the previous frame.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub delta: f32,
}
