//! Boss encounter systems.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::game::spawn_shot;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::runstate::RunState;
use crate::resources::worldtime::WorldTime;

/// Start the boss fight once the score is high enough, once per run.
/// A Game Over requested earlier in the frame stands.
pub fn boss_trigger_system(
    run: Res<RunState>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    if next_state.is_pending(GameStates::GameOver) {
        return;
    }
    if !run.boss_defeated && run.score >= config.gameplay.boss_score {
        info!("Score {} reached, boss incoming", run.score);
        next_state.set(GameStates::BossFight);
    }
}

/// Holding UP fires a shot every `fire_interval` seconds from just right of
/// the player's centre.
pub fn boss_fire_system(
    mut commands: Commands,
    input: Res<InputState>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut run: ResMut<RunState>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
) {
    if run.fire_cooldown > 0.0 {
        run.fire_cooldown -= time.delta;
    }
    if !input.direction_up.active || run.fire_cooldown > 0.0 {
        return;
    }
    let Some((position, collider)) = players.iter().next() else {
        return;
    };
    let center = collider.center(position.pos);
    spawn_shot(&mut commands, center.x + 50.0, center.y, &config.gameplay);
    run.fire_cooldown += config.gameplay.fire_interval;
}
