//! Bridge between the vision thread and the ECS world.
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::pickup::PowerUpKind;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::motion::{PlayerMotion, Steering};
use crate::resources::powerup::ActivePowerUp;
use crate::vision::worker::{VisionBridge, VisionMessage};

/// Drain detection frames and turn them into player motion.
///
/// Frames are fed to the tracker in every state so the previous positions
/// stay current; the resulting step is only kept while playing. When the
/// camera stops, the bridge is dropped, steering falls back to the
/// keyboard, and a run in progress ends.
pub fn poll_vision_messages(
    bridge: Option<Res<VisionBridge>>,
    mut motion: ResMut<PlayerMotion>,
    config: Res<GameConfig>,
    powerup: Res<ActivePowerUp>,
    game_state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut commands: Commands,
) {
    let Some(bridge) = bridge else {
        return;
    };
    let playing = matches!(game_state.get(), GameStates::Playing);
    let boosted = powerup.is_active(PowerUpKind::SpeedBoost);

    for msg in bridge.drain() {
        match msg {
            VisionMessage::Frame(frame) => {
                let step = motion.tracker.update(&frame.detections, &config.motion);
                motion.last_seq = frame.seq;
                if playing {
                    motion.accumulate(&step, boosted);
                }
            }
            VisionMessage::Closed | VisionMessage::Failed(_) => {
                if let VisionMessage::Failed(reason) = &msg {
                    error!("Vision stopped: {}", reason);
                } else {
                    info!("Camera closed, switching to keyboard steering");
                }
                commands.remove_resource::<VisionBridge>();
                motion.steering = Steering::Keyboard;
                motion.reset();
                if game_state.in_run() {
                    next_state.set(GameStates::GameOver);
                }
                return;
            }
        }
    }
}
