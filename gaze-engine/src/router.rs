//! Classifies completed key-mode selections

use gaze_input::{FunctionKey, KeyValue, Point, SelectionMode, SelectionResult};
use tracing::debug;

/// Where part of a selection result is sent
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Literal text for the keyboard output
    Text(String),
    /// A function key for the dispatcher
    FunctionKey(FunctionKey),
    /// Multi-key candidates for the keyboard output
    MultiKey(Vec<String>),
}

/// Routes selection results and keeps their captured points for debugging
#[derive(Debug, Clone, Default)]
pub struct KeySelectionRouter {
    debug_points: Option<Vec<Point>>,
}

impl KeySelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points captured by the last selection result
    pub fn debug_points(&self) -> Option<&[Point]> {
        self.debug_points.as_deref()
    }

    pub fn clear_debug_points(&mut self) {
        self.debug_points = None;
    }

    /// Split a selection result into its routes
    ///
    /// Text, function key and multi-key parts are checked independently, so a
    /// single result can produce all three. In point mode results carry no
    /// meaning (points complete through the continuation) and nothing is
    /// routed.
    pub fn route(&mut self, result: SelectionResult, mode: SelectionMode) -> Vec<Route> {
        self.clear_debug_points();
        let has_multi_key = result.has_multi_key();
        let SelectionResult {
            points,
            key,
            multi_key,
        } = result;
        self.debug_points = Some(points);

        if mode != SelectionMode::Key || (key.is_none() && !has_multi_key) {
            return Vec::new();
        }

        let mut routes = Vec::with_capacity(3);

        if let Some(text) = key.as_ref().and_then(KeyValue::non_empty_text) {
            debug!("Selection result with text {:?}", text);
            routes.push(Route::Text(text.to_string()));
        }

        if let Some(function_key) = key.as_ref().and_then(|k| k.function_key) {
            debug!("Selection result with function key {}", function_key);
            routes.push(Route::FunctionKey(function_key));
        }

        if let Some(candidates) = multi_key.filter(|m| !m.is_empty()) {
            debug!("Selection result with {} multi-key candidates", candidates.len());
            routes.push(Route::MultiKey(candidates));
        }

        routes
    }
}
