//! Player steering.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::motion::{PlayerMotion, Steering};
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::vision::motion::{Direction, clamp_player_y};

/// UP/DOWN arrows steer the player when no camera is driving it.
pub fn keyboard_steering(
    input: Res<InputState>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut motion: ResMut<PlayerMotion>,
) {
    if motion.steering != Steering::Keyboard {
        return;
    }
    let speed = config.motion.keyboard_speed * time.delta;
    let mut dy = 0.0;
    if input.direction_up.active {
        dy -= speed;
    }
    if input.direction_down.active {
        dy += speed;
    }
    motion.pending_dy += dy;
    motion.direction = match dy {
        d if d < 0.0 => Direction::Up,
        d if d > 0.0 => Direction::Down,
        _ => Direction::Still,
    };
}

/// Move the player by the collected displacement and keep it in the
/// playable band.
pub fn apply_player_motion(
    mut motion: ResMut<PlayerMotion>,
    screen: Res<ScreenSize>,
    mut players: Query<(&mut MapPosition, &Sprite), With<Player>>,
) {
    let dy = motion.take_dy();
    for (mut position, sprite) in players.iter_mut() {
        let y = position.pos.y + dy;
        position.pos.y = clamp_player_y(y, sprite.height, screen.h as f32);
    }
}
