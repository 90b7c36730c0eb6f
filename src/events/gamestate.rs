//! Game state transition event and observer.
//!
//! Systems can request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the hooks stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! Which hooks run depends on both the old and the new state, see
//! [`transition_hooks`]. Resuming from pause, for example, must not start a
//! new run.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs the transition hooks, and clears the
/// pending value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Names of the hooks to run, in order, when moving from `old` to `new`.
///
/// Exit hooks come first.
pub fn transition_hooks(old: GameStates, new: GameStates) -> Vec<&'static str> {
    use GameStates::*;
    let mut hooks = Vec::new();

    // Overlay screens are torn down when left.
    if matches!(old, Menu | Paused | GameOver) && old != new {
        hooks.push("despawn_ui");
    }

    match (old, new) {
        (_, Setup) => hooks.push("setup"),
        (_, Menu) => hooks.push("enter_menu"),
        (Paused, Playing) | (Paused, BossFight) => {}
        (BossFight, Playing) => hooks.push("end_boss"),
        (_, Playing) => hooks.push("start_run"),
        (Playing, BossFight) => hooks.push("enter_boss"),
        (_, Paused) => hooks.push("enter_pause"),
        (_, GameOver) => hooks.push("enter_game_over"),
        (_, Quitting) => hooks.push("quit_game"),
        _ => {}
    }
    hooks
}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending and different from the current state, copies the new value
///   into [`GameState`] and queues the hooks named by [`transition_hooks`].
/// - Resets [`NextGameState`] to [`Unchanged`].
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match *next_game_state.get() {
        Pending(new_state) => {
            next_game_state.reset();
            let old_state = *game_state.get();
            if old_state == new_state {
                debug!("Already in {:?}", new_state);
                return;
            }
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state);
            for hook in transition_hooks(old_state, new_state) {
                match systems_store.get(hook) {
                    Some(id) => commands.run_system(id),
                    None => warn!("Hook '{}' not found in SystemsStore", hook),
                }
            }
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GameStates::*;

    #[test]
    fn start_and_restart_begin_a_new_run() {
        assert_eq!(transition_hooks(Menu, Playing), vec!["despawn_ui", "start_run"]);
        assert_eq!(transition_hooks(GameOver, Menu), vec!["despawn_ui", "enter_menu"]);
    }

    #[test]
    fn resume_does_not_reset() {
        assert_eq!(transition_hooks(Paused, Playing), vec!["despawn_ui"]);
        assert_eq!(transition_hooks(Paused, BossFight), vec!["despawn_ui"]);
    }

    #[test]
    fn boss_hooks() {
        assert_eq!(transition_hooks(Playing, BossFight), vec!["enter_boss"]);
        assert_eq!(transition_hooks(BossFight, Playing), vec!["end_boss"]);
        assert_eq!(transition_hooks(BossFight, Paused), vec!["enter_pause"]);
    }

    #[test]
    fn game_over_and_quit() {
        assert_eq!(transition_hooks(Playing, GameOver), vec!["enter_game_over"]);
        assert_eq!(transition_hooks(Paused, Quitting), vec!["despawn_ui", "quit_game"]);
        assert_eq!(transition_hooks(None, Setup), vec!["setup"]);
    }
}
