use bevy_ecs::prelude::Resource;

/// Progress of the current run. Reset when a new run starts.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunState {
    pub score: u32,
    /// The boss encounter happens once per run.
    pub boss_defeated: bool,
    /// Seconds until the next shot may be fired.
    pub fire_cooldown: f32,
}

impl RunState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
