//! Button activation event and observer.
//!
//! [`button_system`](crate::systems::button::button_system) emits a
//! [`ButtonClickedEvent`]; [`button_clicked_observer`] turns it into a
//! state transition request.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::button::ButtonAction;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};

#[derive(Event, Debug, Clone, Copy)]
pub struct ButtonClickedEvent {
    pub action: ButtonAction,
}

/// Where a button leads, given the state it was pressed in.
pub fn button_target(action: ButtonAction, state: &GameState) -> GameStates {
    match action {
        ButtonAction::Start => GameStates::Playing,
        ButtonAction::Resume => match state.previous() {
            GameStates::BossFight => GameStates::BossFight,
            _ => GameStates::Playing,
        },
        ButtonAction::Restart => GameStates::Menu,
    }
}

pub fn button_clicked_observer(
    trigger: On<ButtonClickedEvent>,
    game_state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let action = trigger.event().action;
    let target = button_target(action, &game_state);
    info!("Button {:?} pressed in {:?}", action, game_state.get());
    next_state.set(target);
}
