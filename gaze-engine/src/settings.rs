//! Settings context injected into the engine
//!
//! Values are read from a simple `key=value` file at startup and then owned
//! by the engine. Changes are published to subscribers; nothing is written
//! back to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crossbeam_channel::{Receiver, Sender};
use tracing::{info, warn};

use crate::collaborators::DockSize;
use crate::error::SettingsError;

/// Step cycle for pixel amounts (window moves/resizes, mouse nudges)
pub const PIXEL_STEPS: [u32; 6] = [1, 5, 10, 25, 50, 100];

/// Step cycle for scroll amounts
pub const SCROLL_CLICK_STEPS: [u32; 5] = [1, 3, 5, 10, 25];

/// Advance `current` through a cyclic step sequence
///
/// The last step wraps to the first, and any value not in the sequence
/// resets to the first.
pub fn next_step(steps: &[u32], current: u32) -> u32 {
    let first = steps.first().copied().unwrap_or(current);
    match steps.iter().position(|&step| step == current) {
        Some(index) => steps.get(index + 1).copied().unwrap_or(first),
        None => first,
    }
}

/// How the main window is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Floating,
    Docked,
    Maximised,
}

impl FromStr for WindowState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "floating" => Ok(WindowState::Floating),
            "docked" => Ok(WindowState::Docked),
            "maximised" | "maximized" => Ok(WindowState::Maximised),
            _ => Err(()),
        }
    }
}

impl FromStr for DockSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(DockSize::Full),
            "collapsed" => Ok(DockSize::Collapsed),
            _ => Err(()),
        }
    }
}

/// Voice parameters passed to the speech collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpeechSettings {
    pub volume: i32,
    pub rate: i32,
    pub voice: Option<String>,
}

/// A settings value that changed
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    MoveAndResizeAdjustmentPx(u32),
    MouseMoveAmountPx(u32),
    MouseScrollAmountClicks(u32),
    MainWindowState(WindowState),
    MainWindowDockSize(DockSize),
    MouseKeyboardDockSize(DockSize),
    SuppressModifiersInMouseKeyboard(bool),
    Speech(SpeechSettings),
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Settings {
    move_and_resize_adjustment_px: u32,
    mouse_move_amount_px: u32,
    mouse_scroll_amount_clicks: u32,
    main_window_state: WindowState,
    main_window_dock_size: DockSize,
    mouse_keyboard_dock_size: DockSize,
    suppress_modifiers_in_mouse_keyboard: bool,
    speech: SpeechSettings,
    subscribers: Vec<Sender<SettingChange>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_and_resize_adjustment_px: 10,
            mouse_move_amount_px: 10,
            mouse_scroll_amount_clicks: 3,
            main_window_state: WindowState::default(),
            main_window_dock_size: DockSize::default(),
            mouse_keyboard_dock_size: DockSize::default(),
            suppress_modifiers_in_mouse_keyboard: true,
            speech: SpeechSettings::default(),
            subscribers: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default location
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_else(|err| {
            warn!("Using default settings ({}): {}", path.display(), err);
            Self::default()
        })
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Get the default settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gaze")
            .join("settings.txt")
    }

    /// Parse settings from simple key=value format
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "move_and_resize_adjustment_px" => {
                    settings.move_and_resize_adjustment_px = parse_value(key, value)?;
                }
                "mouse_move_amount_px" => {
                    settings.mouse_move_amount_px = parse_value(key, value)?;
                }
                "mouse_scroll_amount_clicks" => {
                    settings.mouse_scroll_amount_clicks = parse_value(key, value)?;
                }
                "main_window_state" => settings.main_window_state = parse_value(key, value)?,
                "main_window_dock_size" => {
                    settings.main_window_dock_size = parse_value(key, value)?;
                }
                "mouse_keyboard_dock_size" => {
                    settings.mouse_keyboard_dock_size = parse_value(key, value)?;
                }
                "suppress_modifiers_in_mouse_keyboard" => {
                    settings.suppress_modifiers_in_mouse_keyboard = parse_value(key, value)?;
                }
                "speech_volume" => settings.speech.volume = parse_value(key, value)?,
                "speech_rate" => settings.speech.rate = parse_value(key, value)?,
                "speech_voice" => {
                    settings.speech.voice = (!value.is_empty()).then(|| value.to_string());
                }
                _ => {} // Ignore unknown keys
            }
        }

        Ok(settings)
    }

    /// Receive every subsequent change
    pub fn subscribe(&mut self) -> Receiver<SettingChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, change: SettingChange) {
        info!("Setting changed: {:?}", change);
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn move_and_resize_adjustment_px(&self) -> u32 {
        self.move_and_resize_adjustment_px
    }

    pub fn set_move_and_resize_adjustment_px(&mut self, px: u32) {
        if replace(&mut self.move_and_resize_adjustment_px, px) {
            self.publish(SettingChange::MoveAndResizeAdjustmentPx(px));
        }
    }

    pub fn mouse_move_amount_px(&self) -> u32 {
        self.mouse_move_amount_px
    }

    pub fn set_mouse_move_amount_px(&mut self, px: u32) {
        if replace(&mut self.mouse_move_amount_px, px) {
            self.publish(SettingChange::MouseMoveAmountPx(px));
        }
    }

    pub fn mouse_scroll_amount_clicks(&self) -> u32 {
        self.mouse_scroll_amount_clicks
    }

    pub fn set_mouse_scroll_amount_clicks(&mut self, clicks: u32) {
        if replace(&mut self.mouse_scroll_amount_clicks, clicks) {
            self.publish(SettingChange::MouseScrollAmountClicks(clicks));
        }
    }

    pub fn main_window_state(&self) -> WindowState {
        self.main_window_state
    }

    pub fn set_main_window_state(&mut self, state: WindowState) {
        if replace(&mut self.main_window_state, state) {
            self.publish(SettingChange::MainWindowState(state));
        }
    }

    pub fn main_window_dock_size(&self) -> DockSize {
        self.main_window_dock_size
    }

    pub fn set_main_window_dock_size(&mut self, size: DockSize) {
        if replace(&mut self.main_window_dock_size, size) {
            self.publish(SettingChange::MainWindowDockSize(size));
        }
    }

    /// Dock size remembered for the mouse keyboard
    pub fn mouse_keyboard_dock_size(&self) -> DockSize {
        self.mouse_keyboard_dock_size
    }

    pub fn set_mouse_keyboard_dock_size(&mut self, size: DockSize) {
        if replace(&mut self.mouse_keyboard_dock_size, size) {
            self.publish(SettingChange::MouseKeyboardDockSize(size));
        }
    }

    pub fn suppress_modifiers_in_mouse_keyboard(&self) -> bool {
        self.suppress_modifiers_in_mouse_keyboard
    }

    pub fn set_suppress_modifiers_in_mouse_keyboard(&mut self, suppress: bool) {
        if replace(&mut self.suppress_modifiers_in_mouse_keyboard, suppress) {
            self.publish(SettingChange::SuppressModifiersInMouseKeyboard(suppress));
        }
    }

    pub fn speech(&self) -> &SpeechSettings {
        &self.speech
    }

    pub fn set_speech(&mut self, speech: SpeechSettings) {
        if self.speech != speech {
            self.speech = speech.clone();
            self.publish(SettingChange::Speech(speech));
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
