//! Input handling systems

use bevy::prelude::*;

use super::components::SessionResource;
use crate::simulation::InputEvent;

/// Map a Bevy key to a game input
fn key_event(key: KeyCode) -> Option<InputEvent> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(InputEvent::MoveLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(InputEvent::MoveRight),
        KeyCode::Enter | KeyCode::Space => Some(InputEvent::StartOrRestart),
        _ => None,
    }
}

/// Forward key presses to the session and exit on Escape
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
        return;
    }

    for key in keyboard.get_just_pressed() {
        if let Some(event) = key_event(*key) {
            session.0.handle_event(event);
        }
    }
}
