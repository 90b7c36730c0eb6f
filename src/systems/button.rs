//! Menu button activation.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::button::Button;
use crate::components::screenposition::ScreenPosition;
use crate::events::button::ButtonClickedEvent;
use crate::resources::input::InputState;

/// Emit a [`ButtonClickedEvent`] for a button under a left click, or for the
/// first button when ENTER is pressed. At most one event per frame.
pub fn button_system(
    input: Res<InputState>,
    buttons: Query<(&Button, &ScreenPosition)>,
    mut commands: Commands,
) {
    let clicked = input
        .mouse_clicked
        .then(|| {
            buttons
                .iter()
                .find(|(button, pos)| button.contains(pos.pos, input.mouse_pos))
        })
        .flatten();
    let chosen = clicked.or_else(|| {
        input
            .action_confirm
            .just_pressed
            .then(|| buttons.iter().next())
            .flatten()
    });
    if let Some((button, _)) = chosen {
        debug!("Button '{}' activated", button.label);
        commands.trigger(ButtonClickedEvent {
            action: button.action,
        });
    }
}
