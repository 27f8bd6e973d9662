//! Input event contract for the gaze selection engine
//!
//! Everything the external input source produces, and the per-key state the
//! engine reads and mutates while coordinating selections.

mod error;
mod event;
mod function_key;
mod geometry;
mod key;
mod key_state;
mod mode;
mod point_map;

pub use error::ParseError;
pub use event::{InputEvent, ProgressTarget, SelectionMode, SelectionResult};
pub use function_key::FunctionKey;
pub use geometry::{Point, Rect};
pub use key::{keys, KeyValue};
pub use key_state::{KeyDownState, KeyStateStore};
pub use mode::SelectionModeController;
pub use point_map::{KeyRegion, PointToKeyMap};
