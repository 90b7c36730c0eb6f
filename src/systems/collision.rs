//! Collision detection and the rules it drives.
//!
//! [`collision_detector`] emits a [`CollisionEvent`] for every overlapping
//! pair of colliders. [`collision_observer`] reacts to the pairs that
//! matter:
//! - player and coil: score (doubled by X2), coil removed
//! - player and bomb: game over
//! - player and power-up: power-up activated, pickup removed
//! - shot and boss: hit counted, shot removed; enough hits end the fight
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boss::{Boss, Shot};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{Pickup, PowerUpKind};
use crate::components::player::Player;
use crate::events::collision::CollisionEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::powerup::ActivePowerUp;
use crate::resources::runstate::RunState;

pub fn collision_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider)>,
    mut commands: Commands,
) {
    for [(entity_a, position_a, collider_a), (entity_b, position_b, collider_b)] in
        query.iter_combinations()
    {
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            commands.trigger(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}

/// Points for one coil.
pub fn coil_score(powerup: &ActivePowerUp) -> u32 {
    if powerup.is_active(PowerUpKind::X2) { 2 } else { 1 }
}

#[allow(clippy::too_many_arguments)]
pub fn collision_observer(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    players: Query<(), With<Player>>,
    pickups: Query<&Pickup>,
    shots: Query<(), With<Shot>>,
    mut bosses: Query<&mut Boss>,
    mut run: ResMut<RunState>,
    mut powerup: ResMut<ActivePowerUp>,
    mut next_state: ResMut<NextGameState>,
    config: Res<GameConfig>,
) {
    let CollisionEvent { a, b } = *trigger.event();

    // Player and pickup, in either order.
    let player_pickup = if players.contains(a) {
        pickups.get(b).ok().map(|p| (b, *p))
    } else if players.contains(b) {
        pickups.get(a).ok().map(|p| (a, *p))
    } else {
        None
    };
    if let Some((entity, pickup)) = player_pickup {
        match pickup {
            Pickup::Coil => {
                run.score += coil_score(&powerup);
                debug!("Coil collected, score {}", run.score);
                commands.entity(entity).despawn();
            }
            Pickup::Bomb => {
                info!("Hit a bomb with score {}", run.score);
                next_state.set(GameStates::GameOver);
            }
            Pickup::PowerUp(kind) => {
                info!("Power-up {} collected", kind.name());
                powerup.activate(kind, config.gameplay.powerup_duration);
                commands.entity(entity).despawn();
            }
        }
        return;
    }

    // Shot and boss, in either order.
    let (shot, boss) = if shots.contains(a) {
        (a, b)
    } else if shots.contains(b) {
        (b, a)
    } else {
        return;
    };
    let Ok(mut boss) = bosses.get_mut(boss) else {
        return;
    };
    boss.hits += 1;
    commands.entity(shot).despawn();
    if boss.hits >= config.gameplay.boss_hits {
        info!("Boss defeated after {} hits", boss.hits);
        next_state.set(GameStates::Playing);
    }
}
