//! Interfaces to the services the engine drives
//!
//! The engine never talks to hardware, windows or the UI directly. Hosts
//! plug implementations of these traits into [`Services`].

use std::fmt;

use gaze_input::{FunctionKey, Point, PointToKeyMap, SelectionMode};

use crate::settings::SpeechSettings;

/// Suggestions shown per page of the suggestion bar
pub const SUGGESTIONS_PER_PAGE: usize = 6;

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Scroll wheel directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Compass directions for window moves and resizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

/// Size of the docked window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockSize {
    #[default]
    Full,
    Collapsed,
}

/// Audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    KeySelection,
    MouseClick,
    MouseDoubleClick,
    MouseDown,
    MouseUp,
    MouseScroll,
    Info,
    Error,
}

/// Identifies a notification awaiting acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Normal,
    Error,
}

/// A toast shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn normal(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: NotificationKind::Normal,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Control surface of the input source
pub trait InputControl {
    /// Stop producing events until resumed
    fn suspend(&mut self);
    fn resume(&mut self);
    fn set_selection_mode(&mut self, mode: SelectionMode);
    fn set_point_to_key_map(&mut self, map: PointToKeyMap);
}

/// Text composition and key output
pub trait KeyboardOutput {
    fn process_single_key_text(&mut self, text: &str);
    fn process_multi_key_text_and_suggestions(&mut self, candidates: &[String]);
    /// Called once for every function key the dispatcher handled
    fn process_function_key(&mut self, key: FunctionKey);
    /// Text composed so far
    fn text(&self) -> String;
    fn add_text_to_dictionary(&mut self);
}

/// Mouse simulation
///
/// The `simulated` flag marks actions the user asked for, as opposed to
/// cursor moves made on their behalf.
pub trait MouseOutput {
    fn cursor_position(&mut self) -> Point;
    fn move_to(&mut self, point: Point);
    fn button_down(&mut self, button: MouseButton);
    fn button_up(&mut self, button: MouseButton);
    fn click(&mut self, button: MouseButton);
    fn double_click(&mut self, button: MouseButton);
    fn move_and_click(&mut self, point: Point, button: MouseButton, simulated: bool);
    fn move_and_double_click(&mut self, point: Point, button: MouseButton, simulated: bool);
    fn move_and_scroll(
        &mut self,
        point: Point,
        direction: ScrollDirection,
        clicks: u32,
        simulated: bool,
    );
}

/// Main window geometry
pub trait WindowManipulation {
    /// Move by `pixels`, or all the way to the screen edge when `None`
    fn move_window(&mut self, direction: Direction, pixels: Option<u32>);
    fn expand(&mut self, direction: Direction, pixels: u32);
    fn shrink(&mut self, direction: Direction, pixels: u32);
    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);
    fn step_opacity(&mut self, increase: bool);
    fn resize_dock(&mut self, size: DockSize);
    fn minimise(&mut self);
    fn maximise(&mut self);
    fn restore(&mut self);
}

/// Sound effects and speech
pub trait AudioFeedback {
    fn play(&mut self, sound: Sound);
    /// Start speaking `text`, or interrupt speech already in progress
    ///
    /// Returns whether new speech started. The host reports the end of the
    /// speech through [`Engine::speech_finished`](crate::Engine::speech_finished).
    fn speak_or_interrupt(&mut self, text: &str, speech: &SpeechSettings) -> bool;
}

/// Word suggestion paging
pub trait Suggestions {
    fn count(&self) -> usize;
    fn page(&self) -> usize;
    fn set_page(&mut self, page: usize);
}

/// Shows toasts; the host acknowledges them through
/// [`Engine::acknowledge`](crate::Engine::acknowledge)
pub trait Notifier {
    fn notify(&mut self, id: NotificationId, notification: Notification);
}

/// Transient visuals layered over the screen
pub trait Overlay {
    fn set_cursor_visible(&mut self, visible: bool);
    /// Open (or close, with `None`) the magnifier at a point
    fn magnify_at(&mut self, point: Option<Point>);
}

/// The hosting process
pub trait Host {
    fn shutdown(&mut self);
}

/// Gaze tracker calibration
pub trait Calibration {
    fn can_complete_without_manual_intervention(&self) -> bool;
    /// Start calibrating; the outcome arrives through
    /// [`Engine::calibration_completed`](crate::Engine::calibration_completed)
    fn request(&mut self);
}

/// Every collaborator the engine drives
pub struct Services {
    pub input: Box<dyn InputControl>,
    pub keyboard: Box<dyn KeyboardOutput>,
    pub mouse: Box<dyn MouseOutput>,
    pub window: Box<dyn WindowManipulation>,
    pub audio: Box<dyn AudioFeedback>,
    pub suggestions: Box<dyn Suggestions>,
    pub notifier: Box<dyn Notifier>,
    pub overlay: Box<dyn Overlay>,
    pub host: Box<dyn Host>,
    pub calibration: Option<Box<dyn Calibration>>,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("calibration", &self.calibration.is_some())
            .finish_non_exhaustive()
    }
}
