//! Shared engine state mutated by the dispatcher and the gesture chain

use crossbeam_channel::Sender;
use gaze_input::{keys, KeyStateStore, Point, SelectionMode, SelectionModeController};
use tracing::debug;

use crate::collaborators::Services;
use crate::last_action::{LastActionRegister, MouseAction};
use crate::registry::ContinuationRegistry;
use crate::settings::Settings;

use super::EngineEvent;

/// Everything except the keyboard screen, router and supervisor
pub(crate) struct Core {
    pub(crate) mode: SelectionModeController,
    pub(crate) key_states: KeyStateStore,
    pub(crate) registry: ContinuationRegistry,
    pub(crate) last_action: LastActionRegister,
    pub(crate) settings: Settings,
    pub(crate) services: Services,
    pub(crate) cursor_visible: bool,
    /// Where the magnifier was last opened, until it closes or resets
    pub(crate) magnify_at: Option<Point>,
    observers: Vec<Sender<EngineEvent>>,
}

impl Core {
    pub(crate) fn new(settings: Settings, services: Services) -> Self {
        Self {
            mode: SelectionModeController::new(),
            key_states: KeyStateStore::new(),
            registry: ContinuationRegistry::new(),
            last_action: LastActionRegister::new(),
            settings,
            services,
            cursor_visible: false,
            magnify_at: None,
            observers: Vec::new(),
        }
    }

    pub(crate) fn add_observer(&mut self, tx: Sender<EngineEvent>) {
        self.observers.push(tx);
    }

    pub(crate) fn publish(&mut self, event: EngineEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Change mode and tell the input source about it
    pub(crate) fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.mode.set_mode(mode) {
            debug!("Selection mode is now {}", mode.display_name());
            self.services.input.set_selection_mode(mode);
            self.publish(EngineEvent::SelectionModeChanged(mode));
        }
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.cursor_visible = visible;
            self.services.overlay.set_cursor_visible(visible);
            self.publish(EngineEvent::CursorVisibility(visible));
        }
    }

    /// Whether point selections are currently refined through the magnifier
    pub(crate) fn magnifying(&self) -> bool {
        self.key_states
            .down_state(&keys::MOUSE_MAGNIFIER)
            .is_down_or_locked_down()
    }

    pub(crate) fn perform(&mut self, action: &MouseAction) {
        action.perform(
            self.services.mouse.as_mut(),
            self.services.audio.as_mut(),
            &self.settings,
        );
    }

    pub(crate) fn replay_last_action(&mut self) -> bool {
        self.last_action.replay(
            self.services.mouse.as_mut(),
            self.services.audio.as_mut(),
            &self.settings,
        )
    }
}
