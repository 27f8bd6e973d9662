//! Key values carried by selections

use std::fmt;

use crate::function_key::FunctionKey;

/// What a selected key stands for: a function, literal text, or both
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyValue {
    pub function_key: Option<FunctionKey>,
    pub text: Option<String>,
}

impl KeyValue {
    /// A key that triggers a function
    pub const fn function(key: FunctionKey) -> Self {
        Self {
            function_key: Some(key),
            text: None,
        }
    }

    /// A key that types literal text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            function_key: None,
            text: Some(text.into()),
        }
    }

    /// Build a key value, returning `None` when both parts are absent
    pub fn new(function_key: Option<FunctionKey>, text: Option<String>) -> Option<Self> {
        if function_key.is_none() && text.is_none() {
            return None;
        }
        Some(Self { function_key, text })
    }

    /// Text payload, if present and non-empty
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

impl From<FunctionKey> for KeyValue {
    fn from(key: FunctionKey) -> Self {
        Self::function(key)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.function_key, &self.text) {
            (Some(key), Some(text)) => write!(f, "{key}/{text:?}"),
            (Some(key), None) => write!(f, "{key}"),
            (None, Some(text)) => write!(f, "{text:?}"),
            (None, None) => f.write_str("<empty>"),
        }
    }
}

/// Key values the engine consults by identity
pub mod keys {
    use super::KeyValue;
    use crate::function_key::FunctionKey;

    pub const MOUSE_MAGNIFIER: KeyValue = KeyValue::function(FunctionKey::MouseMagnifier);
    pub const MOUSE_MAGNETIC_CURSOR: KeyValue =
        KeyValue::function(FunctionKey::MouseMagneticCursor);
    pub const MOUSE_LEFT_DOWN_UP: KeyValue = KeyValue::function(FunctionKey::MouseLeftDownUp);
    pub const MOUSE_MIDDLE_DOWN_UP: KeyValue =
        KeyValue::function(FunctionKey::MouseMiddleDownUp);
    pub const MOUSE_RIGHT_DOWN_UP: KeyValue = KeyValue::function(FunctionKey::MouseRightDownUp);
    pub const SPEAK: KeyValue = KeyValue::function(FunctionKey::Speak);
    pub const LEFT_SHIFT: KeyValue = KeyValue::function(FunctionKey::LeftShift);
    pub const LEFT_CTRL: KeyValue = KeyValue::function(FunctionKey::LeftCtrl);
    pub const LEFT_WIN: KeyValue = KeyValue::function(FunctionKey::LeftWin);
    pub const LEFT_ALT: KeyValue = KeyValue::function(FunctionKey::LeftAlt);

    /// Modifiers released while the mouse keyboard is shown
    pub const MODIFIERS: [KeyValue; 4] = [LEFT_SHIFT, LEFT_CTRL, LEFT_WIN, LEFT_ALT];
}
