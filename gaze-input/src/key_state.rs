//! Per-key down state and selection progress

use std::collections::{HashMap, HashSet};

use crate::function_key::FunctionKey;
use crate::geometry::Point;
use crate::key::{keys, KeyValue};

/// Down state of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDownState {
    #[default]
    Up,
    Down,
    LockedDown,
}

impl KeyDownState {
    pub fn is_down_or_locked_down(&self) -> bool {
        matches!(self, KeyDownState::Down | KeyDownState::LockedDown)
    }
}

/// Holds down states and selection progress for every key
#[derive(Debug, Clone)]
pub struct KeyStateStore {
    down_states: HashMap<KeyValue, KeyDownState>,
    progress: HashMap<KeyValue, f64>,
    point_progress: Option<(Point, f64)>,
    /// Keys that go Up -> Down when selected
    pressable: HashSet<KeyValue>,
    /// Keys that go Down -> LockedDown when selected again
    lockable: HashSet<KeyValue>,
    simulate_key_strokes: bool,
}

impl KeyStateStore {
    pub fn new() -> Self {
        let mut store = Self {
            down_states: HashMap::new(),
            progress: HashMap::new(),
            point_progress: None,
            pressable: HashSet::new(),
            lockable: HashSet::new(),
            simulate_key_strokes: true,
        };
        for key in [
            FunctionKey::LeftAlt,
            FunctionKey::LeftCtrl,
            FunctionKey::LeftShift,
            FunctionKey::LeftWin,
            FunctionKey::MouseMagnifier,
            FunctionKey::MouseMagneticCursor,
        ] {
            store.register_toggle(KeyValue::function(key), true);
        }
        for key in [
            keys::MOUSE_LEFT_DOWN_UP,
            keys::MOUSE_MIDDLE_DOWN_UP,
            keys::MOUSE_RIGHT_DOWN_UP,
        ] {
            store.register_toggle(key, false);
        }
        store
    }

    /// Current down state (keys never touched are Up)
    pub fn down_state(&self, key: &KeyValue) -> KeyDownState {
        self.down_states.get(key).copied().unwrap_or_default()
    }

    pub fn set_down_state(&mut self, key: &KeyValue, state: KeyDownState) {
        if state == KeyDownState::Up {
            self.down_states.remove(key);
        } else {
            self.down_states.insert(key.clone(), state);
        }
    }

    /// Advance a key one step through Up -> Down -> LockedDown -> Up
    ///
    /// Keys that cannot be pressed down stay Up; keys that cannot be locked
    /// go straight from Down back to Up.
    pub fn progress_down_state(&mut self, key: &KeyValue) {
        let next = match self.down_state(key) {
            KeyDownState::Up if self.pressable.contains(key) => KeyDownState::Down,
            KeyDownState::Down if self.lockable.contains(key) => KeyDownState::LockedDown,
            _ => KeyDownState::Up,
        };
        self.set_down_state(key, next);
    }

    /// Allow a key to be pressed down (and optionally locked)
    pub fn register_toggle(&mut self, key: KeyValue, lockable: bool) {
        if lockable {
            self.lockable.insert(key.clone());
        }
        self.pressable.insert(key);
    }

    /// Selection progress of a key (0.0 when none recorded)
    pub fn key_progress(&self, key: &KeyValue) -> f64 {
        self.progress.get(key).copied().unwrap_or(0.0)
    }

    pub fn set_key_progress(&mut self, key: KeyValue, fraction: f64) {
        self.progress.insert(key, fraction);
    }

    /// Progress of the point currently being selected in point mode
    pub fn point_progress(&self) -> Option<(Point, f64)> {
        self.point_progress
    }

    pub fn set_point_progress(&mut self, point: Point, fraction: f64) {
        self.point_progress = Some((point, fraction));
    }

    /// Forget every key and point progress value
    pub fn clear_progress(&mut self) {
        self.progress.clear();
        self.point_progress = None;
    }

    /// Whether any progress is currently recorded
    pub fn has_progress(&self) -> bool {
        !self.progress.is_empty() || self.point_progress.is_some()
    }

    /// Whether key presses are sent to the OS as real key strokes
    pub fn simulate_key_strokes(&self) -> bool {
        self.simulate_key_strokes
    }

    pub fn set_simulate_key_strokes(&mut self, simulate: bool) {
        self.simulate_key_strokes = simulate;
    }
}

impl Default for KeyStateStore {
    fn default() -> Self {
        Self::new()
    }
}
