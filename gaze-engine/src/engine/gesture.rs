//! Point gesture chain: arming, firing, magnification and cleanup

use gaze_input::{keys, KeyDownState, Point, SelectionMode};
use tracing::{debug, warn};

use crate::collaborators::Sound;
use crate::last_action::MouseAction;
use crate::registry::{Continuation, FireOutcome};

use super::state::Core;

impl Core {
    /// Switch to point mode and wait for the point that completes `continuation`
    pub(crate) fn begin_point_gesture(&mut self, continuation: Continuation) {
        // Only the first drag stage has a later point to wait for
        let repeating = matches!(continuation, Continuation::DragStart);
        self.registry.arm(continuation, repeating);
        self.set_selection_mode(SelectionMode::Point);
        self.set_cursor_visible(true);
    }

    /// Hand a selected point (or an abort) to the armed continuation
    pub(crate) fn fire_point(&mut self, point: Option<Point>) {
        let magnifying = self.magnifying();
        match self.registry.fire(point, magnifying) {
            FireOutcome::Idle => debug!("Point selection with no continuation armed"),
            FireOutcome::Escrowed(anchor) => {
                // Hidden while the magnifier samples the screen under the anchor
                self.set_cursor_visible(false);
                self.magnify_at = Some(anchor);
                self.services.overlay.magnify_at(Some(anchor));
                self.set_cursor_visible(true);
            }
            FireOutcome::Run(continuation, point) => self.run_continuation(continuation, point),
        }
    }

    /// Complete the escrowed continuation with the point chosen in the magnifier
    pub(crate) fn resolve_magnified_point(&mut self, point: Option<Point>) {
        let Some(escrow) = self.registry.take_escrow() else {
            warn!("Magnified point {:?} with nothing in escrow", point);
            return;
        };
        debug!("Magnifier at {} resolved to {:?}", escrow.anchor, point);
        self.run_continuation(escrow.continuation, point);
    }

    fn run_continuation(&mut self, continuation: Continuation, point: Option<Point>) {
        match continuation {
            Continuation::Point(gesture) => {
                if let Some(point) = point {
                    let action = gesture.action_at(point);
                    debug!("Performing {:?}", action);
                    self.last_action.set(action);
                    self.set_cursor_visible(false);
                    self.perform(&action);
                }
                self.reset_gesture();
            }
            Continuation::DragStart => match point {
                Some(from) => {
                    debug!("Drag starting at {}", from);
                    self.services.audio.play(Sound::MouseDown);
                    self.registry.arm(Continuation::DragEnd { from }, false);
                    self.registry.clear_escrow();
                    if self.magnify_at.take().is_some() {
                        self.services.overlay.magnify_at(None);
                    }
                }
                None => self.reset_gesture(),
            },
            Continuation::DragEnd { from } => {
                if let Some(to) = point {
                    let action = MouseAction::Drag { from, to };
                    debug!("Performing drag from {} to {}", from, to);
                    self.last_action.set(action);
                    self.set_cursor_visible(false);
                    self.perform(&action);
                }
                self.reset_gesture();
            }
        }
    }

    /// Drop any gesture in progress and return to key selection
    pub(crate) fn reset_gesture(&mut self) {
        self.registry.reset();
        self.set_selection_mode(SelectionMode::Key);
        self.set_cursor_visible(false);
        if self.magnify_at.take().is_some() {
            self.services.overlay.magnify_at(None);
        }
        // Release the magnifier unless it is locked down
        if self.key_states.down_state(&keys::MOUSE_MAGNIFIER) == KeyDownState::Down {
            self.key_states
                .set_down_state(&keys::MOUSE_MAGNIFIER, KeyDownState::Up);
        }
    }
}
