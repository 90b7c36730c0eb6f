use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

/// Fire a [`GameStateChangedEvent`] when a transition has been requested.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

pub fn state_is_boss_fight(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::BossFight)
}

/// Playing or fighting the boss.
pub fn state_in_run(state: Res<GameState>) -> bool {
    state.in_run()
}

/// A screen with buttons is shown.
pub fn state_has_buttons(state: Res<GameState>) -> bool {
    matches!(
        state.get(),
        GameStates::Menu | GameStates::Paused | GameStates::GameOver
    )
}
