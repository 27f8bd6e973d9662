//! The engine facade: consumes input events and owns every piece of state
//!
//! All mutation happens on the thread that owns the [`Engine`]. Other
//! threads reach it only through channels: collaborators report errors via
//! an [`ErrorReporter`] and observers receive [`EngineEvent`]s.

mod gesture;
mod state;

#[cfg(test)]
mod tests;

use crossbeam_channel::{unbounded, Receiver, Sender};
use gaze_input::{
    keys, InputEvent, KeyDownState, KeyStateStore, KeyValue, Point, PointToKeyMap, SelectionMode,
};
use tracing::{debug, warn};

use crate::collaborators::{Notification, NotificationId, Services, Sound};
use crate::dispatcher::FunctionKeyDispatcher;
use crate::error::{CalibrationError, ServiceError};
use crate::keyboard::{Keyboard, KeyboardKind};
use crate::last_action::LastActionRegister;
use crate::registry::ContinuationRegistry;
use crate::router::{KeySelectionRouter, Route};
use crate::settings::Settings;
use crate::supervisor::ErrorSupervisor;

pub(crate) use self::state::Core;

/// Notifications for observers of the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A key was selected in key mode
    KeySelection(KeyValue),
    /// A point was selected in point mode
    PointSelection(Point),
    KeyboardChanged(KeyboardKind),
    SelectionModeChanged(SelectionMode),
    /// The transient point-selection cursor was shown or hidden
    CursorVisibility(bool),
}

/// Cloneable handle collaborators use to report failures from any thread
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    tx: Sender<ServiceError>,
}

impl ErrorReporter {
    pub fn report(&self, source_name: impl Into<String>, message: impl Into<String>) {
        // The engine is gone; nothing is left to surface the error to
        let _ = self.tx.send(ServiceError::new(source_name, message));
    }
}

/// Selection coordination engine
pub struct Engine {
    core: Core,
    router: KeySelectionRouter,
    dispatcher: FunctionKeyDispatcher,
    supervisor: ErrorSupervisor,
    points_per_second: Option<f64>,
    position: Option<(Point, Option<KeyValue>)>,
    capturing_multi_key: bool,
    error_tx: Sender<ServiceError>,
    error_rx: Receiver<ServiceError>,
}

impl Engine {
    /// Create an engine in key mode on the alpha keyboard
    pub fn new(settings: Settings, mut services: Services) -> Self {
        services.input.set_selection_mode(SelectionMode::Key);
        let (error_tx, error_rx) = unbounded();

        Self {
            core: Core::new(settings, services),
            router: KeySelectionRouter::new(),
            dispatcher: FunctionKeyDispatcher::new(),
            supervisor: ErrorSupervisor::new(),
            points_per_second: None,
            position: None,
            capturing_multi_key: false,
            error_tx,
            error_rx,
        }
    }

    /// Hand the input source the map it uses to resolve points to keys
    pub fn set_point_to_key_map(&mut self, map: PointToKeyMap) {
        self.core.services.input.set_point_to_key_map(map);
    }

    /// Register an observer
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = unbounded();
        self.core.add_observer(tx);
        rx
    }

    /// Process one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::RateSample(rate) => self.points_per_second = Some(rate),
            InputEvent::PositionSample { point, key } => {
                if self
                    .core
                    .key_states
                    .down_state(&keys::MOUSE_MAGNETIC_CURSOR)
                    .is_down_or_locked_down()
                {
                    self.core.services.mouse.move_to(point);
                }
                self.position = Some((point, key));
            }
            InputEvent::ProgressSample { target, fraction } => {
                let Core {
                    mode, key_states, ..
                } = &mut self.core;
                mode.record_progress(target.as_ref(), fraction, key_states);
            }
            InputEvent::Selection { key, point } => self.on_selection(key, point),
            InputEvent::SelectionResult(result) => {
                let routes = self.router.route(result, self.core.mode.current_mode());
                for route in routes {
                    self.apply_route(route);
                }
            }
        }
    }

    fn on_selection(&mut self, key: Option<KeyValue>, point: Point) {
        debug!("Selection at {}", point);
        self.router.clear_debug_points();

        match self.core.mode.current_mode() {
            SelectionMode::Key => {
                if let Some(key) = key {
                    if !self.capturing_multi_key {
                        self.core.services.audio.play(Sound::KeySelection);
                    }
                    self.core.publish(EngineEvent::KeySelection(key));
                }
            }
            SelectionMode::Point => {
                self.core.publish(EngineEvent::PointSelection(point));
                self.core.fire_point(Some(point));
            }
        }
    }

    fn apply_route(&mut self, route: Route) {
        match route {
            Route::Text(text) => self.core.services.keyboard.process_single_key_text(&text),
            Route::FunctionKey(key) => self.dispatcher.dispatch(key, &mut self.core),
            Route::MultiKey(candidates) => self
                .core
                .services
                .keyboard
                .process_multi_key_text_and_suggestions(&candidates),
        }
    }

    /// Surface a collaborator error; input stays suspended until acknowledged
    ///
    /// Any armed gesture is left as it is.
    pub fn on_error(&mut self, err: &ServiceError) -> NotificationId {
        self.supervisor.on_error(err, &mut self.core.services)
    }

    pub fn error_reporter(&self) -> ErrorReporter {
        ErrorReporter {
            tx: self.error_tx.clone(),
        }
    }

    /// Errors reported through [`ErrorReporter`]s, for use in a `select!`
    pub fn error_receiver(&self) -> Receiver<ServiceError> {
        self.error_rx.clone()
    }

    /// Surface every queued error, returning how many there were
    pub fn drain_errors(&mut self) -> usize {
        let mut surfaced = 0;
        while let Ok(err) = self.error_rx.try_recv() {
            self.on_error(&err);
            surfaced += 1;
        }
        surfaced
    }

    /// The user dismissed a notification
    pub fn acknowledge(&mut self, id: NotificationId) -> bool {
        self.supervisor.acknowledge(id, &mut self.core.services)
    }

    pub fn awaiting_acknowledgement(&self) -> usize {
        self.supervisor.awaiting_acknowledgement()
    }

    /// Complete the escrowed gesture with the point picked in the magnifier
    ///
    /// `None` means the user cancelled the magnifier, which aborts the gesture.
    pub fn resolve_magnified_point(&mut self, point: Option<Point>) {
        self.core.resolve_magnified_point(point);
    }

    /// Report the outcome of a calibration started from the calibrate key
    pub fn calibration_completed(&mut self, outcome: Result<String, CalibrationError>) {
        if !self.dispatcher.finish_calibration() {
            warn!("Calibration outcome received with no calibration in progress");
            return;
        }

        let notification = match outcome {
            Ok(message) => {
                debug!("Calibration succeeded: {}", message);
                self.core.services.audio.play(Sound::Info);
                Notification::normal("Success", message)
            }
            Err(err) => {
                warn!("Calibration did not complete: {}", err);
                self.core.services.audio.play(Sound::Error);
                Notification::error("Uh-oh!", err.to_string())
            }
        };
        self.supervisor.notify(notification, &mut self.core.services);
    }

    /// Narration of the composed text finished
    pub fn speech_finished(&mut self) {
        self.core
            .key_states
            .set_down_state(&keys::SPEAK, KeyDownState::Up);
    }

    /// Whether a multi-key capture is in progress (mutes selection sounds)
    pub fn set_capturing_multi_key(&mut self, capturing: bool) {
        self.capturing_multi_key = capturing;
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.core.mode.current_mode()
    }

    pub fn keyboard(&self) -> &Keyboard {
        self.dispatcher.keyboard()
    }

    pub fn key_states(&self) -> &KeyStateStore {
        &self.core.key_states
    }

    pub fn key_states_mut(&mut self) -> &mut KeyStateStore {
        &mut self.core.key_states
    }

    pub fn registry(&self) -> &ContinuationRegistry {
        &self.core.registry
    }

    pub fn last_action(&self) -> &LastActionRegister {
        &self.core.last_action
    }

    pub fn settings(&self) -> &Settings {
        &self.core.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.core.settings
    }

    pub fn points_per_second(&self) -> Option<f64> {
        self.points_per_second
    }

    /// Last position sample and the key under it
    pub fn current_position(&self) -> Option<&(Point, Option<KeyValue>)> {
        self.position.as_ref()
    }

    pub fn debug_points(&self) -> Option<&[Point]> {
        self.router.debug_points()
    }

    pub fn cursor_visible(&self) -> bool {
        self.core.cursor_visible
    }

    /// Where the magnifier is open, if it is
    pub fn magnify_at(&self) -> Option<Point> {
        self.core.magnify_at
    }
}
