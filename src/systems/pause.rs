use bevy_ecs::prelude::*;

use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;

/// ESC during a run opens the pause screen, unless the run already ended
/// this frame.
pub fn pause_system(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.action_back.just_pressed && !next_state.is_pending(GameStates::GameOver) {
        next_state.set(GameStates::Paused);
    }
}
