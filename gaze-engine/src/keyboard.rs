//! Keyboard screens and the navigation state they carry
//!
//! Screens that can be left again hold a [`BackAction`] describing how to
//! undo the transition that opened them. The dispatcher resolves it.

use gaze_input::{KeyDownState, KeyValue};

/// Field-less identity of a keyboard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardKind {
    Alpha,
    ConversationAlpha,
    ConversationNumericAndSymbols,
    Currencies1,
    Currencies2,
    Diacritics1,
    Diacritics2,
    Diacritics3,
    Menu,
    Minimised,
    Mouse,
    NumericAndSymbols1,
    NumericAndSymbols2,
    NumericAndSymbols3,
    PhysicalKeys,
    SizeAndPosition,
    YesNoQuestion,
}

/// How to leave a keyboard screen
#[derive(Debug, Clone, PartialEq)]
pub enum BackAction {
    /// Return to the previous keyboard
    Return(Box<Keyboard>),
    /// Restore the window size, then return
    RestoreWindow(Box<Keyboard>),
    /// Restore window size and opacity, then return
    LeaveConversation {
        previous: Box<Keyboard>,
        opacity: f64,
    },
    /// Put suppressed modifier keys back, then return
    ReinstateModifiers {
        previous: Box<Keyboard>,
        modifiers: Vec<(KeyValue, KeyDownState)>,
    },
}

/// What answering a question does
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionAction {
    /// Go back to the keyboard shown before the question
    Return(Box<Keyboard>),
    /// Ask the second, final quit confirmation
    ConfirmQuit(Box<Keyboard>),
    /// Terminate the process
    Shutdown,
    /// Suspend input and start calibrating, back on the given keyboard
    Calibrate(Box<Keyboard>),
}

/// A yes/no question shown in place of a keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub yes: QuestionAction,
    pub no: QuestionAction,
}

/// Keyboard screens
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Keyboard {
    #[default]
    Alpha,
    ConversationAlpha {
        back: BackAction,
    },
    ConversationNumericAndSymbols {
        back: BackAction,
    },
    Currencies1,
    Currencies2,
    Diacritics1,
    Diacritics2,
    Diacritics3,
    Menu {
        back: BackAction,
    },
    Minimised {
        back: BackAction,
    },
    Mouse {
        back: BackAction,
    },
    NumericAndSymbols1,
    NumericAndSymbols2,
    NumericAndSymbols3,
    PhysicalKeys,
    SizeAndPosition {
        back: BackAction,
    },
    YesNoQuestion(Question),
}

impl Keyboard {
    pub fn kind(&self) -> KeyboardKind {
        match self {
            Keyboard::Alpha => KeyboardKind::Alpha,
            Keyboard::ConversationAlpha { .. } => KeyboardKind::ConversationAlpha,
            Keyboard::ConversationNumericAndSymbols { .. } => {
                KeyboardKind::ConversationNumericAndSymbols
            }
            Keyboard::Currencies1 => KeyboardKind::Currencies1,
            Keyboard::Currencies2 => KeyboardKind::Currencies2,
            Keyboard::Diacritics1 => KeyboardKind::Diacritics1,
            Keyboard::Diacritics2 => KeyboardKind::Diacritics2,
            Keyboard::Diacritics3 => KeyboardKind::Diacritics3,
            Keyboard::Menu { .. } => KeyboardKind::Menu,
            Keyboard::Minimised { .. } => KeyboardKind::Minimised,
            Keyboard::Mouse { .. } => KeyboardKind::Mouse,
            Keyboard::NumericAndSymbols1 => KeyboardKind::NumericAndSymbols1,
            Keyboard::NumericAndSymbols2 => KeyboardKind::NumericAndSymbols2,
            Keyboard::NumericAndSymbols3 => KeyboardKind::NumericAndSymbols3,
            Keyboard::PhysicalKeys => KeyboardKind::PhysicalKeys,
            Keyboard::SizeAndPosition { .. } => KeyboardKind::SizeAndPosition,
            Keyboard::YesNoQuestion(_) => KeyboardKind::YesNoQuestion,
        }
    }

    /// Back action of the screen, if it can be navigated back from
    pub fn back_action(&self) -> Option<&BackAction> {
        match self {
            Keyboard::ConversationAlpha { back }
            | Keyboard::ConversationNumericAndSymbols { back }
            | Keyboard::Menu { back }
            | Keyboard::Minimised { back }
            | Keyboard::Mouse { back }
            | Keyboard::SizeAndPosition { back } => Some(back),
            _ => None,
        }
    }

    /// Consume the screen, keeping only its back action
    pub fn into_back_action(self) -> Option<BackAction> {
        match self {
            Keyboard::ConversationAlpha { back }
            | Keyboard::ConversationNumericAndSymbols { back }
            | Keyboard::Menu { back }
            | Keyboard::Minimised { back }
            | Keyboard::Mouse { back }
            | Keyboard::SizeAndPosition { back } => Some(back),
            _ => None,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        match self {
            Keyboard::YesNoQuestion(question) => Some(question),
            _ => None,
        }
    }
}
