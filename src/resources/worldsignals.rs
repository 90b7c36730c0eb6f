//! World-wide flags.
//!
//! Hooks and systems raise flags here that the frame loop in `main` reads.
//! The only one today is [`QUIT_GAME`], raised when entering
//! [`GameStates::Quitting`](crate::resources::gamestate::GameStates::Quitting).

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

/// Ends the main loop after the current frame.
pub const QUIT_GAME: &str = "quit_game";

#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    flags: FxHashSet<&'static str>,
}

impl WorldSignals {
    pub fn set_flag(&mut self, key: &'static str) {
        self.flags.insert(key);
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    pub fn quit_requested(&self) -> bool {
        self.has_flag(QUIT_GAME)
    }
}
