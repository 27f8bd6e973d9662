//! Replayable record of the last mouse action

use gaze_input::Point;

use crate::collaborators::{
    AudioFeedback, Direction, MouseButton, MouseOutput, ScrollDirection, Sound,
};
use crate::settings::Settings;

/// A discrete mouse action that can be performed again
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseAction {
    /// Click, first moving to `at` when given
    Click {
        button: MouseButton,
        at: Option<Point>,
    },
    /// Double click, first moving to `at` when given
    DoubleClick {
        button: MouseButton,
        at: Option<Point>,
    },
    MoveAndClick {
        button: MouseButton,
        at: Point,
    },
    MoveAndDoubleClick {
        button: MouseButton,
        at: Point,
    },
    /// Scroll by the configured number of clicks at the time of performing
    MoveAndScroll {
        direction: ScrollDirection,
        at: Point,
    },
    MoveTo {
        at: Point,
    },
    /// Move the cursor from wherever it is by the configured amount
    Nudge {
        direction: Direction,
    },
    Drag {
        from: Point,
        to: Point,
    },
}

impl MouseAction {
    /// Perform the action against the mouse and audio collaborators
    pub fn perform(
        &self,
        mouse: &mut dyn MouseOutput,
        audio: &mut dyn AudioFeedback,
        settings: &Settings,
    ) {
        match *self {
            MouseAction::Click { button, at } => {
                if let Some(at) = at {
                    mouse.move_to(at);
                }
                audio.play(Sound::MouseClick);
                mouse.click(button);
            }
            MouseAction::DoubleClick { button, at } => {
                if let Some(at) = at {
                    mouse.move_to(at);
                }
                audio.play(Sound::MouseDoubleClick);
                mouse.double_click(button);
            }
            MouseAction::MoveAndClick { button, at } => {
                audio.play(Sound::MouseClick);
                mouse.move_and_click(at, button, true);
            }
            MouseAction::MoveAndDoubleClick { button, at } => {
                audio.play(Sound::MouseDoubleClick);
                mouse.move_and_double_click(at, button, true);
            }
            MouseAction::MoveAndScroll { direction, at } => {
                audio.play(Sound::MouseScroll);
                mouse.move_and_scroll(at, direction, settings.mouse_scroll_amount_clicks(), true);
            }
            MouseAction::MoveTo { at } => mouse.move_to(at),
            MouseAction::Nudge { direction } => {
                let amount = f64::from(settings.mouse_move_amount_px());
                let cursor = mouse.cursor_position();
                let target = match direction {
                    Direction::Top => cursor.offset(0.0, -amount),
                    Direction::Bottom => cursor.offset(0.0, amount),
                    Direction::Left => cursor.offset(-amount, 0.0),
                    Direction::Right => cursor.offset(amount, 0.0),
                    Direction::TopLeft => cursor.offset(-amount, -amount),
                    Direction::TopRight => cursor.offset(amount, -amount),
                    Direction::BottomLeft => cursor.offset(-amount, amount),
                    Direction::BottomRight => cursor.offset(amount, amount),
                };
                mouse.move_to(target);
            }
            MouseAction::Drag { from, to } => {
                mouse.move_to(from);
                mouse.button_down(MouseButton::Left);
                audio.play(Sound::MouseUp);
                mouse.move_to(to);
                mouse.button_up(MouseButton::Left);
            }
        }
    }
}

/// Holds the most recent replayable mouse action
#[derive(Debug, Clone, Default)]
pub struct LastActionRegister {
    action: Option<MouseAction>,
}

impl LastActionRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: MouseAction) {
        self.action = Some(action);
    }

    pub fn clear(&mut self) {
        self.action = None;
    }

    pub fn get(&self) -> Option<&MouseAction> {
        self.action.as_ref()
    }

    /// Perform the stored action again, keeping it for further replays
    ///
    /// Returns whether anything was replayed.
    pub fn replay(
        &self,
        mouse: &mut dyn MouseOutput,
        audio: &mut dyn AudioFeedback,
        settings: &Settings,
    ) -> bool {
        match &self.action {
            Some(action) => {
                action.perform(mouse, audio, settings);
                true
            }
            None => false,
        }
    }
}
