use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::powerup::ActivePowerUp;
use crate::resources::worldtime::WorldTime;

pub fn powerup_timer_system(mut powerup: ResMut<ActivePowerUp>, time: Res<WorldTime>) {
    if let Some(kind) = powerup.tick(time.delta) {
        debug!("Power-up {} expired", kind.name());
    }
}
