//! Console-backed collaborators
//!
//! Every output primitive is logged. A small virtual desktop stands in for
//! the real screen so cursor queries, opacity and composed text behave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gaze_engine::{
    AudioFeedback, Calibration, Direction, DockSize, Host, InputControl, KeyboardOutput,
    MouseButton, MouseOutput, Notification, NotificationId, NotificationKind, Notifier, Overlay,
    ScrollDirection, Services, Sound, SpeechSettings, Suggestions, WindowManipulation,
};
use gaze_input::{FunctionKey, Point, PointToKeyMap, SelectionMode};
use parking_lot::Mutex;
use tracing::{error, info};

/// Opacity change per step
const OPACITY_STEP: f64 = 0.1;
const MIN_OPACITY: f64 = 0.1;

/// Shared state of the pretend screen
#[derive(Debug)]
pub struct Desktop {
    pub cursor: Point,
    pub opacity: f64,
    pub text: String,
    pub suggestions: Vec<String>,
    pub suggestion_page: usize,
    pub speaking: bool,
    /// Input events are dropped while set
    pub suspended: bool,
    /// Regions the input source resolves selected points against
    pub key_map: PointToKeyMap,
}

impl Default for Desktop {
    fn default() -> Self {
        Self {
            cursor: Point::default(),
            opacity: 1.0,
            text: String::new(),
            suggestions: Vec::new(),
            suggestion_page: 0,
            speaking: false,
            suspended: false,
            key_map: PointToKeyMap::new(),
        }
    }
}

/// Implements every collaborator on top of a shared [`Desktop`]
#[derive(Debug, Clone)]
pub struct Console {
    desktop: Arc<Mutex<Desktop>>,
    shutdown: Arc<AtomicBool>,
}

impl Console {
    pub fn new(desktop: Arc<Mutex<Desktop>>, shutdown: Arc<AtomicBool>) -> Self {
        Self { desktop, shutdown }
    }

    pub fn services(&self) -> Services {
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
}

impl InputControl for Console {
    fn suspend(&mut self) {
        self.desktop.lock().suspended = true;
        info!("input: suspended");
    }

    fn resume(&mut self) {
        self.desktop.lock().suspended = false;
        info!("input: resumed");
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        info!("input: selection mode {}", mode.display_name());
    }

    fn set_point_to_key_map(&mut self, map: PointToKeyMap) {
        info!("input: {} key regions", map.len());
        self.desktop.lock().key_map = map;
    }
}

impl KeyboardOutput for Console {
    fn process_single_key_text(&mut self, text: &str) {
        let mut desktop = self.desktop.lock();
        desktop.text.push_str(text);
        info!("keyboard: typed {:?}, text is now {:?}", text, desktop.text);
    }

    fn process_multi_key_text_and_suggestions(&mut self, candidates: &[String]) {
        let mut desktop = self.desktop.lock();
        if let Some(best) = candidates.first() {
            if !desktop.text.is_empty() && !desktop.text.ends_with(' ') {
                desktop.text.push(' ');
            }
            desktop.text.push_str(best);
        }
        desktop.suggestions = candidates.iter().skip(1).cloned().collect();
        desktop.suggestion_page = 0;
        info!(
            "keyboard: multi-key {:?}, {} suggestions",
            candidates.first(),
            desktop.suggestions.len()
        );
    }

    fn process_function_key(&mut self, key: FunctionKey) {
        let mut desktop = self.desktop.lock();
        match key {
            FunctionKey::BackOne => {
                desktop.text.pop();
            }
            FunctionKey::BackMany => {
                let keep = desktop.text.trim_end().rfind(' ').map_or(0, |i| i + 1);
                desktop.text.truncate(keep);
            }
            FunctionKey::ClearScratchpad => desktop.text.clear(),
            _ => {}
        }
        info!("keyboard: function key {}", key);
    }

    fn text(&self) -> String {
        self.desktop.lock().text.clone()
    }

    fn add_text_to_dictionary(&mut self) {
        info!("keyboard: add {:?} to dictionary", self.desktop.lock().text);
    }
}

impl MouseOutput for Console {
    fn cursor_position(&mut self) -> Point {
        self.desktop.lock().cursor
    }

    fn move_to(&mut self, point: Point) {
        self.desktop.lock().cursor = point;
        info!("mouse: move to {}", point);
    }

    fn button_down(&mut self, button: MouseButton) {
        info!("mouse: {:?} down", button);
    }

    fn button_up(&mut self, button: MouseButton) {
        info!("mouse: {:?} up", button);
    }

    fn click(&mut self, button: MouseButton) {
        info!("mouse: {:?} click at {}", button, self.desktop.lock().cursor);
    }

    fn double_click(&mut self, button: MouseButton) {
        info!("mouse: {:?} double click at {}", button, self.desktop.lock().cursor);
    }

    fn move_and_click(&mut self, point: Point, button: MouseButton, simulated: bool) {
        self.desktop.lock().cursor = point;
        info!("mouse: {:?} click at {} (simulated: {})", button, point, simulated);
    }

    fn move_and_double_click(&mut self, point: Point, button: MouseButton, simulated: bool) {
        self.desktop.lock().cursor = point;
        info!(
            "mouse: {:?} double click at {} (simulated: {})",
            button, point, simulated
        );
    }

    fn move_and_scroll(
        &mut self,
        point: Point,
        direction: ScrollDirection,
        clicks: u32,
        simulated: bool,
    ) {
        self.desktop.lock().cursor = point;
        info!(
            "mouse: scroll {:?} by {} at {} (simulated: {})",
            direction, clicks, point, simulated
        );
    }
}

impl WindowManipulation for Console {
    fn move_window(&mut self, direction: Direction, pixels: Option<u32>) {
        match pixels {
            Some(px) => info!("window: move {:?} by {}px", direction, px),
            None => info!("window: move to {:?} boundary", direction),
        }
    }

    fn expand(&mut self, direction: Direction, pixels: u32) {
        info!("window: expand {:?} by {}px", direction, pixels);
    }

    fn shrink(&mut self, direction: Direction, pixels: u32) {
        info!("window: shrink {:?} by {}px", direction, pixels);
    }

    fn opacity(&self) -> f64 {
        self.desktop.lock().opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.desktop.lock().opacity = opacity;
        info!("window: opacity {:.1}", opacity);
    }

    fn step_opacity(&mut self, increase: bool) {
        let mut desktop = self.desktop.lock();
        let delta = if increase { OPACITY_STEP } else { -OPACITY_STEP };
        desktop.opacity = (desktop.opacity + delta).clamp(MIN_OPACITY, 1.0);
        info!("window: opacity {:.1}", desktop.opacity);
    }

    fn resize_dock(&mut self, size: DockSize) {
        info!("window: dock {:?}", size);
    }

    fn minimise(&mut self) {
        info!("window: minimised");
    }

    fn maximise(&mut self) {
        info!("window: maximised");
    }

    fn restore(&mut self) {
        info!("window: restored");
    }
}

impl AudioFeedback for Console {
    fn play(&mut self, sound: Sound) {
        info!("audio: {:?}", sound);
    }

    fn speak_or_interrupt(&mut self, text: &str, speech: &SpeechSettings) -> bool {
        let mut desktop = self.desktop.lock();
        if desktop.speaking {
            desktop.speaking = false;
            info!("audio: speech interrupted");
            return false;
        }
        if text.is_empty() {
            return false;
        }
        desktop.speaking = true;
        info!(
            "audio: speaking {:?} (volume {}, rate {}, voice {:?})",
            text, speech.volume, speech.rate, speech.voice
        );
        true
    }
}

impl Suggestions for Console {
    fn count(&self) -> usize {
        self.desktop.lock().suggestions.len()
    }

    fn page(&self) -> usize {
        self.desktop.lock().suggestion_page
    }

    fn set_page(&mut self, page: usize) {
        self.desktop.lock().suggestion_page = page;
        info!("suggestions: page {}", page);
    }
}

impl Notifier for Console {
    fn notify(&mut self, id: NotificationId, notification: Notification) {
        match notification.kind {
            NotificationKind::Normal => info!(
                "notification {}: {} - {} (ack {} to continue)",
                id, notification.title, notification.message, id.0
            ),
            NotificationKind::Error => error!(
                "notification {}: {} - {} (ack {} to continue)",
                id, notification.title, notification.message, id.0
            ),
        }
    }
}

impl Overlay for Console {
    fn set_cursor_visible(&mut self, visible: bool) {
        info!("overlay: cursor {}", if visible { "shown" } else { "hidden" });
    }

    fn magnify_at(&mut self, point: Option<Point>) {
        match point {
            Some(point) => info!("overlay: magnifier open at {}", point),
            None => info!("overlay: magnifier closed"),
        }
    }
}

impl Host for Console {
    fn shutdown(&mut self) {
        info!("host: shutting down");
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

impl Calibration for Console {
    fn can_complete_without_manual_intervention(&self) -> bool {
        true
    }

    fn request(&mut self) {
        info!("calibration: requested (reply with `calibrated ok|fail`)");
    }
}
