//! Main window geometry keys

use gaze_input::FunctionKey;
use tracing::debug;

use crate::collaborators::{Direction, DockSize};
use crate::engine::Core;
use crate::keyboard::KeyboardKind;
use crate::settings::WindowState;

use super::FunctionKeyDispatcher;

/// A move or resize of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WindowCommand {
    /// Move by the adjustment amount
    Move(Direction),
    /// Move all the way to the screen edge
    MoveToBoundary(Direction),
    Expand(Direction),
    Shrink(Direction),
}

impl WindowCommand {
    pub(super) fn for_key(key: FunctionKey) -> Option<Self> {
        use Direction::*;
        use WindowCommand::*;

        let command = match key {
            FunctionKey::ExpandToBottom => Expand(Bottom),
            FunctionKey::ExpandToBottomAndLeft => Expand(BottomLeft),
            FunctionKey::ExpandToBottomAndRight => Expand(BottomRight),
            FunctionKey::ExpandToLeft => Expand(Left),
            FunctionKey::ExpandToRight => Expand(Right),
            FunctionKey::ExpandToTop => Expand(Top),
            FunctionKey::ExpandToTopAndLeft => Expand(TopLeft),
            FunctionKey::ExpandToTopAndRight => Expand(TopRight),
            FunctionKey::MoveToBottom => Move(Bottom),
            FunctionKey::MoveToBottomAndLeft => Move(BottomLeft),
            FunctionKey::MoveToBottomAndLeftBoundaries => MoveToBoundary(BottomLeft),
            FunctionKey::MoveToBottomAndRight => Move(BottomRight),
            FunctionKey::MoveToBottomAndRightBoundaries => MoveToBoundary(BottomRight),
            FunctionKey::MoveToBottomBoundary => MoveToBoundary(Bottom),
            FunctionKey::MoveToLeft => Move(Left),
            FunctionKey::MoveToLeftBoundary => MoveToBoundary(Left),
            FunctionKey::MoveToRight => Move(Right),
            FunctionKey::MoveToRightBoundary => MoveToBoundary(Right),
            FunctionKey::MoveToTop => Move(Top),
            FunctionKey::MoveToTopAndLeft => Move(TopLeft),
            FunctionKey::MoveToTopAndLeftBoundaries => MoveToBoundary(TopLeft),
            FunctionKey::MoveToTopAndRight => Move(TopRight),
            FunctionKey::MoveToTopAndRightBoundaries => MoveToBoundary(TopRight),
            FunctionKey::MoveToTopBoundary => MoveToBoundary(Top),
            FunctionKey::ShrinkFromBottom => Shrink(Bottom),
            FunctionKey::ShrinkFromBottomAndLeft => Shrink(BottomLeft),
            FunctionKey::ShrinkFromBottomAndRight => Shrink(BottomRight),
            FunctionKey::ShrinkFromLeft => Shrink(Left),
            FunctionKey::ShrinkFromRight => Shrink(Right),
            FunctionKey::ShrinkFromTop => Shrink(Top),
            FunctionKey::ShrinkFromTopAndLeft => Shrink(TopLeft),
            FunctionKey::ShrinkFromTopAndRight => Shrink(TopRight),
            _ => return None,
        };
        Some(command)
    }

    /// Forward to the window collaborator with the current adjustment amount
    pub(super) fn apply(self, core: &mut Core) {
        let px = core.settings.move_and_resize_adjustment_px();
        let window = &mut core.services.window;
        debug!("{:?} by {}px", self, px);
        match self {
            WindowCommand::Move(direction) => window.move_window(direction, Some(px)),
            WindowCommand::MoveToBoundary(direction) => window.move_window(direction, None),
            WindowCommand::Expand(direction) => window.expand(direction, px),
            WindowCommand::Shrink(direction) => window.shrink(direction, px),
        }
    }
}

impl FunctionKeyDispatcher {
    /// Resize the docked window, remembering the size chosen on the mouse keyboard
    pub(super) fn resize_dock(&mut self, size: DockSize, core: &mut Core) {
        debug!("Resizing dock to {:?}", size);
        core.services.window.resize_dock(size);
        core.settings.set_main_window_dock_size(size);
        if self.keyboard.kind() == KeyboardKind::Mouse {
            core.settings.set_mouse_keyboard_dock_size(size);
        }
    }

    /// Put the dock back to the size last used on the mouse keyboard
    pub(super) fn reinstate_mouse_keyboard_dock(&mut self, core: &mut Core) {
        if core.settings.main_window_state() != WindowState::Docked {
            return;
        }
        let wanted = core.settings.mouse_keyboard_dock_size();
        if core.settings.main_window_dock_size() != wanted {
            core.services.window.resize_dock(wanted);
            core.settings.set_main_window_dock_size(wanted);
        }
    }
}
