//! Selection mode state and progress projection

use crate::event::{ProgressTarget, SelectionMode};
use crate::key_state::KeyStateStore;

/// Single source of truth for the active selection mode
#[derive(Debug, Clone, Default)]
pub struct SelectionModeController {
    mode: SelectionMode,
}

impl SelectionModeController {
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::Key,
        }
    }

    /// Get current mode
    pub fn current_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch mode, returning whether it changed
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Project a progress sample onto the key state store
    ///
    /// `(None, 0.0)` resets every key and point. A targeted sample updates at
    /// most one slot: the key's progress in key mode (only when the target
    /// resolved to a key), or the single point-progress tuple in point mode.
    pub fn record_progress(
        &self,
        target: Option<&ProgressTarget>,
        fraction: f64,
        store: &mut KeyStateStore,
    ) {
        match target {
            None if fraction == 0.0 => store.clear_progress(),
            None => {}
            Some(target) => match self.mode {
                SelectionMode::Key => {
                    if let Some(key) = &target.key {
                        store.set_key_progress(key.clone(), fraction);
                    }
                }
                SelectionMode::Point => store.set_point_progress(target.point, fraction),
            },
        }
    }
}
