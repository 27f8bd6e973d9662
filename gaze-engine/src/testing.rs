//! Recording collaborators for tests

use std::sync::Arc;

use gaze_input::{FunctionKey, Point, PointToKeyMap, SelectionMode};
use parking_lot::Mutex;

use crate::collaborators::{
    AudioFeedback, Calibration, Direction, DockSize, Host, InputControl, KeyboardOutput,
    MouseButton, MouseOutput, Notification, NotificationId, Notifier, Overlay, ScrollDirection,
    Services, Sound, Suggestions, WindowManipulation,
};
use crate::settings::SpeechSettings;

/// One observable collaborator call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Suspend,
    Resume,
    SetSelectionMode(SelectionMode),
    SetPointToKeyMap(usize),
    SingleKeyText(String),
    MultiKey(Vec<String>),
    FunctionKey(FunctionKey),
    AddToDictionary,
    CursorQuery,
    MoveTo(Point),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Click(MouseButton),
    DoubleClick(MouseButton),
    MoveAndClick(Point, MouseButton),
    MoveAndDoubleClick(Point, MouseButton),
    MoveAndScroll(Point, ScrollDirection, u32),
    MoveWindow(Direction, Option<u32>),
    Expand(Direction, u32),
    Shrink(Direction, u32),
    SetOpacity(f64),
    StepOpacity(bool),
    ResizeDock(DockSize),
    Minimise,
    Maximise,
    Restore,
    Sound(Sound),
    Speak(String),
    SetSuggestionPage(usize),
    Notify(NotificationId, Notification),
    CursorVisible(bool),
    MagnifyAt(Option<Point>),
    Shutdown,
    CalibrationRequested,
}

#[derive(Debug)]
struct State {
    calls: Vec<Call>,
    cursor: Point,
    opacity: f64,
    text: String,
    suggestion_count: usize,
    suggestion_page: usize,
    speech_starts: bool,
    calibration_unattended: bool,
}

/// Shared call log implementing every collaborator trait
#[derive(Debug, Clone)]
pub(crate) struct Recorder {
    state: Arc<Mutex<State>>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                calls: Vec::new(),
                cursor: Point::default(),
                opacity: 0.8,
                text: String::new(),
                suggestion_count: 0,
                suggestion_page: 0,
                speech_starts: true,
                calibration_unattended: true,
            })),
        }
    }

    /// Collaborators backed by this recorder, with a calibration service
    pub(crate) fn services(&self) -> Services {
        Services {
            input: Box::new(self.clone()),
            keyboard: Box::new(self.clone()),
            mouse: Box::new(self.clone()),
            window: Box::new(self.clone()),
            audio: Box::new(self.clone()),
            suggestions: Box::new(self.clone()),
            notifier: Box::new(self.clone()),
            overlay: Box::new(self.clone()),
            host: Box::new(self.clone()),
            calibration: Some(Box::new(self.clone())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Return and forget the calls recorded so far
    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.state.lock().calls)
    }

    pub(crate) fn set_cursor(&self, point: Point) {
        self.state.lock().cursor = point;
    }

    pub(crate) fn set_text(&self, text: &str) {
        self.state.lock().text = text.to_string();
    }

    pub(crate) fn set_suggestions(&self, count: usize, page: usize) {
        let mut state = self.state.lock();
        state.suggestion_count = count;
        state.suggestion_page = page;
    }

    pub(crate) fn suggestion_page(&self) -> usize {
        self.state.lock().suggestion_page
    }

    pub(crate) fn set_speech_starts(&self, starts: bool) {
        self.state.lock().speech_starts = starts;
    }

    pub(crate) fn set_calibration_unattended(&self, unattended: bool) {
        self.state.lock().calibration_unattended = unattended;
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

impl InputControl for Recorder {
    fn suspend(&mut self) {
        self.record(Call::Suspend);
    }

    fn resume(&mut self) {
        self.record(Call::Resume);
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.record(Call::SetSelectionMode(mode));
    }

    fn set_point_to_key_map(&mut self, map: PointToKeyMap) {
        self.record(Call::SetPointToKeyMap(map.len()));
    }
}

impl KeyboardOutput for Recorder {
    fn process_single_key_text(&mut self, text: &str) {
        self.record(Call::SingleKeyText(text.to_string()));
    }

    fn process_multi_key_text_and_suggestions(&mut self, candidates: &[String]) {
        self.record(Call::MultiKey(candidates.to_vec()));
    }

    fn process_function_key(&mut self, key: FunctionKey) {
        self.record(Call::FunctionKey(key));
    }

    fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    fn add_text_to_dictionary(&mut self) {
        self.record(Call::AddToDictionary);
    }
}

impl MouseOutput for Recorder {
    fn cursor_position(&mut self) -> Point {
        self.record(Call::CursorQuery);
        self.state.lock().cursor
    }

    fn move_to(&mut self, point: Point) {
        self.state.lock().cursor = point;
        self.record(Call::MoveTo(point));
    }

    fn button_down(&mut self, button: MouseButton) {
        self.record(Call::ButtonDown(button));
    }

    fn button_up(&mut self, button: MouseButton) {
        self.record(Call::ButtonUp(button));
    }

    fn click(&mut self, button: MouseButton) {
        self.record(Call::Click(button));
    }

    fn double_click(&mut self, button: MouseButton) {
        self.record(Call::DoubleClick(button));
    }

    fn move_and_click(&mut self, point: Point, button: MouseButton, _simulated: bool) {
        self.record(Call::MoveAndClick(point, button));
    }

    fn move_and_double_click(&mut self, point: Point, button: MouseButton, _simulated: bool) {
        self.record(Call::MoveAndDoubleClick(point, button));
    }

    fn move_and_scroll(
        &mut self,
        point: Point,
        direction: ScrollDirection,
        clicks: u32,
        _simulated: bool,
    ) {
        self.record(Call::MoveAndScroll(point, direction, clicks));
    }
}

impl WindowManipulation for Recorder {
    fn move_window(&mut self, direction: Direction, pixels: Option<u32>) {
        self.record(Call::MoveWindow(direction, pixels));
    }

    fn expand(&mut self, direction: Direction, pixels: u32) {
        self.record(Call::Expand(direction, pixels));
    }

    fn shrink(&mut self, direction: Direction, pixels: u32) {
        self.record(Call::Shrink(direction, pixels));
    }

    fn opacity(&self) -> f64 {
        self.state.lock().opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.state.lock().opacity = opacity;
        self.record(Call::SetOpacity(opacity));
    }

    fn step_opacity(&mut self, increase: bool) {
        self.record(Call::StepOpacity(increase));
    }

    fn resize_dock(&mut self, size: DockSize) {
        self.record(Call::ResizeDock(size));
    }

    fn minimise(&mut self) {
        self.record(Call::Minimise);
    }

    fn maximise(&mut self) {
        self.record(Call::Maximise);
    }

    fn restore(&mut self) {
        self.record(Call::Restore);
    }
}

impl AudioFeedback for Recorder {
    fn play(&mut self, sound: Sound) {
        self.record(Call::Sound(sound));
    }

    fn speak_or_interrupt(&mut self, text: &str, _speech: &SpeechSettings) -> bool {
        self.record(Call::Speak(text.to_string()));
        self.state.lock().speech_starts
    }
}

impl Suggestions for Recorder {
    fn count(&self) -> usize {
        self.state.lock().suggestion_count
    }

    fn page(&self) -> usize {
        self.state.lock().suggestion_page
    }

    fn set_page(&mut self, page: usize) {
        self.state.lock().suggestion_page = page;
        self.record(Call::SetSuggestionPage(page));
    }
}

impl Notifier for Recorder {
    fn notify(&mut self, id: NotificationId, notification: Notification) {
        self.record(Call::Notify(id, notification));
    }
}

impl Overlay for Recorder {
    fn set_cursor_visible(&mut self, visible: bool) {
        self.record(Call::CursorVisible(visible));
    }

    fn magnify_at(&mut self, point: Option<Point>) {
        self.record(Call::MagnifyAt(point));
    }
}

impl Host for Recorder {
    fn shutdown(&mut self) {
        self.record(Call::Shutdown);
    }
}

impl Calibration for Recorder {
    fn can_complete_without_manual_intervention(&self) -> bool {
        self.state.lock().calibration_unattended
    }

    fn request(&mut self) {
        self.record(Call::CalibrationRequested);
    }
}
