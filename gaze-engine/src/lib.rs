//! Selection coordination engine for gaze
//!
//! Turns the input source's event stream into text, function and mouse
//! actions: tracks the selection mode, chains point gestures through a
//! single pending continuation, and dispatches function keys.

mod collaborators;
mod dispatcher;
mod engine;
mod error;
mod keyboard;
mod last_action;
mod registry;
mod router;
mod settings;
mod supervisor;

#[cfg(test)]
mod testing;

pub use collaborators::{
    AudioFeedback, Calibration, Direction, DockSize, Host, InputControl, KeyboardOutput,
    MouseButton, MouseOutput, Notification, NotificationId, NotificationKind, Notifier, Overlay,
    ScrollDirection, Services, Sound, Suggestions, WindowManipulation, SUGGESTIONS_PER_PAGE,
};
pub use engine::{Engine, EngineEvent, ErrorReporter};
pub use error::{CalibrationError, ServiceError, SettingsError};
pub use keyboard::{BackAction, Keyboard, KeyboardKind, Question, QuestionAction};
pub use last_action::{LastActionRegister, MouseAction};
pub use registry::{Continuation, ContinuationRegistry, FireOutcome, MagnificationEscrow, PointGesture};
pub use router::{KeySelectionRouter, Route};
pub use settings::{
    next_step, SettingChange, Settings, SpeechSettings, WindowState, PIXEL_STEPS,
    SCROLL_CLICK_STEPS,
};
pub use supervisor::ErrorSupervisor;
