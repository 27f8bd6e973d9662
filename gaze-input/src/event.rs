//! Events produced by the external input source

use crate::geometry::Point;
use crate::key::KeyValue;

/// Selection modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selections resolve to keys on the keyboard
    #[default]
    Key,
    /// Selections resolve to raw screen points
    Point,
}

impl SelectionMode {
    /// Get display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            SelectionMode::Key => "KEY",
            SelectionMode::Point => "POINT",
        }
    }
}

/// Where a progress sample is aimed
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTarget {
    pub point: Point,
    /// Key under the point, if the point resolved to one
    pub key: Option<KeyValue>,
}

/// The aggregate outcome of a completed selection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionResult {
    /// Raw points captured while the selection was made
    pub points: Vec<Point>,
    /// Single key the selection resolved to
    pub key: Option<KeyValue>,
    /// Candidate words from a multi-key (swipe) selection
    pub multi_key: Option<Vec<String>>,
}

impl SelectionResult {
    /// Whether a multi-key selection with at least one candidate is present
    pub fn has_multi_key(&self) -> bool {
        self.multi_key.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Input events, delivered one at a time in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Points sampled per second by the input source
    RateSample(f64),
    /// Current gaze/pointer position
    PositionSample {
        point: Point,
        key: Option<KeyValue>,
    },
    /// Fractional completion of an in-flight selection
    ProgressSample {
        target: Option<ProgressTarget>,
        fraction: f64,
    },
    /// A selection was triggered
    Selection {
        key: Option<KeyValue>,
        point: Point,
    },
    /// The selection completed with its resolved result
    SelectionResult(SelectionResult),
}
