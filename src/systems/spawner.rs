//! Timed pickup spawning.
use bevy_ecs::prelude::*;
use fastrand::Rng;

use crate::components::pickup::{Pickup, PowerUpKind};
use crate::game::spawn_pickup;
use crate::resources::gameconfig::{GameConfig, GameplaySettings};
use crate::resources::screensize::ScreenSize;
use crate::resources::spawner::SpawnTimers;
use crate::resources::worldtime::WorldTime;

/// Random spawn point to the right of the screen.
///
/// x is `screen_w + rand(0..=jitter)`, y is `rand(screen_h/4 ..= screen_h - pickup_size)`.
pub fn spawn_point(
    rng: &mut Rng,
    screen: ScreenSize,
    settings: &GameplaySettings,
    jitter: u32,
) -> (f32, f32) {
    let x = screen.w + rng.u32(0..=jitter) as i32;
    let top = screen.h / 4;
    let bottom = (screen.h - settings.pickup_size as i32).max(top);
    let y = rng.i32(top..=bottom);
    (x as f32, y as f32)
}

pub fn spawn_system(
    mut commands: Commands,
    mut timers: ResMut<SpawnTimers>,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
    pickups: Query<&Pickup>,
) {
    let (mut coils, mut bombs, mut powerups) = (0, 0, 0);
    for pickup in pickups.iter() {
        match pickup {
            Pickup::Coil => coils += 1,
            Pickup::Bomb => bombs += 1,
            Pickup::PowerUp(_) => powerups += 1,
        }
    }

    let settings = &config.gameplay;
    let dt = time.delta;
    let timers = &mut *timers;
    let rng = &mut timers.rng;

    if timers.coil.tick(dt, coils, rng) {
        let (x, y) = spawn_point(rng, *screen, settings, settings.spawn_jitter);
        spawn_pickup(&mut commands, Pickup::Coil, x, y, settings);
    }
    if timers.bomb.tick(dt, bombs, rng) {
        let (x, y) = spawn_point(rng, *screen, settings, settings.spawn_jitter);
        spawn_pickup(&mut commands, Pickup::Bomb, x, y, settings);
    }
    if timers.powerup.tick(dt, powerups, rng) {
        let kind = PowerUpKind::ALL[rng.usize(..PowerUpKind::ALL.len())];
        let (x, y) = spawn_point(rng, *screen, settings, settings.powerup_jitter);
        spawn_pickup(&mut commands, Pickup::PowerUp(kind), x, y, settings);
    }
}
