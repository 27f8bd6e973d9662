//! Mouse keys acting at the current cursor position

use gaze_input::KeyValue;
use tracing::debug;

use crate::collaborators::{Direction, MouseButton, Sound};
use crate::engine::Core;
use crate::last_action::MouseAction;

/// Click where the cursor is; the replay clicks at that same spot
pub(super) fn click_at_cursor(button: MouseButton, core: &mut Core) {
    let at = core.services.mouse.cursor_position();
    debug!("Mouse {:?} click at {}", button, at);
    core.last_action.set(MouseAction::Click {
        button,
        at: Some(at),
    });
    core.perform(&MouseAction::Click { button, at: None });
}

pub(super) fn double_click_at_cursor(button: MouseButton, core: &mut Core) {
    let at = core.services.mouse.cursor_position();
    debug!("Mouse {:?} double click at {}", button, at);
    core.last_action.set(MouseAction::DoubleClick {
        button,
        at: Some(at),
    });
    core.perform(&MouseAction::DoubleClick { button, at: None });
}

/// Move the cursor by the mouse step; the replay moves from wherever it is then
pub(super) fn nudge(direction: Direction, core: &mut Core) {
    let action = MouseAction::Nudge { direction };
    core.last_action.set(action);
    core.perform(&action);
}

/// Press or release a button depending on the toggle key's state
///
/// Neither half can be replayed on its own, so both clear the last action.
pub(super) fn toggle_button(button: MouseButton, toggle: &KeyValue, core: &mut Core) {
    let at = core.services.mouse.cursor_position();
    if core.key_states.down_state(toggle).is_down_or_locked_down() {
        debug!("Pressing mouse {:?} button down at {}", button, at);
        core.services.audio.play(Sound::MouseDown);
        core.services.mouse.button_down(button);
    } else {
        debug!("Releasing mouse {:?} button at {}", button, at);
        core.services.audio.play(Sound::MouseUp);
        core.services.mouse.button_up(button);
    }
    core.last_action.clear();
}
