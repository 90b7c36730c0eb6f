use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{Pickup, PowerUpKind};
use crate::components::player::Player;
use crate::resources::gameconfig::GameConfig;
use crate::resources::powerup::ActivePowerUp;
use crate::resources::worldtime::WorldTime;

/// While the magnet is active, coils within `magnet_radius` of the player's
/// centre move toward it at `magnet_speed`.
pub fn magnet_system(
    powerup: Res<ActivePowerUp>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
    mut coils: Query<(&Pickup, &mut MapPosition, &BoxCollider), Without<Player>>,
) {
    if !powerup.is_active(PowerUpKind::Magnet) {
        return;
    }
    let Some((player_pos, player_collider)) = players.iter().next() else {
        return;
    };
    let target = player_collider.center(player_pos.pos);
    let radius = config.gameplay.magnet_radius;
    let max_step = config.gameplay.magnet_speed * time.delta;

    for (pickup, mut position, collider) in coils.iter_mut() {
        if *pickup != Pickup::Coil {
            continue;
        }
        let to_player: Vector2 = target - collider.center(position.pos);
        let distance = to_player.length();
        if distance > radius || distance <= f32::EPSILON {
            continue;
        }
        let step = max_step.min(distance);
        position.pos = position.pos + to_player.scale_by(step / distance);
    }
}
