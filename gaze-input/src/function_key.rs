//! Function key catalogue
//!
//! Every non-text key the keyboards can present. The dispatcher in the
//! engine maps each of these to an action; keys it has no branch for are
//! passed straight through to the keyboard output.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

macro_rules! function_keys {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        /// Function key identifiers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FunctionKey {
            $($(#[$meta])* $name,)+
        }

        impl FunctionKey {
            /// Every function key, in declaration order
            pub const ALL: &'static [FunctionKey] = &[$(FunctionKey::$name,)+];

            /// Identifier used in logs and scripts
            pub fn name(&self) -> &'static str {
                match self {
                    $(FunctionKey::$name => stringify!($name),)+
                }
            }
        }
    };
}

function_keys! {
    // Keyboard screens
    AlphaKeyboard,
    BackFromKeyboard,
    ConversationAlphaKeyboard,
    ConversationNumericAndSymbolsKeyboard,
    Currencies1Keyboard,
    Currencies2Keyboard,
    Diacritic1Keyboard,
    Diacritic2Keyboard,
    Diacritic3Keyboard,
    MenuKeyboard,
    Minimise,
    MouseKeyboard,
    NumericAndSymbols1Keyboard,
    NumericAndSymbols2Keyboard,
    NumericAndSymbols3Keyboard,
    PhysicalKeysKeyboard,
    SizeAndPositionKeyboard,

    // Window manipulation
    CollapseDock,
    ExpandDock,
    DecreaseOpacity,
    IncreaseOpacity,
    ExpandToBottom,
    ExpandToBottomAndLeft,
    ExpandToBottomAndRight,
    ExpandToLeft,
    ExpandToRight,
    ExpandToTop,
    ExpandToTopAndLeft,
    ExpandToTopAndRight,
    MoveToBottom,
    MoveToBottomAndLeft,
    MoveToBottomAndLeftBoundaries,
    MoveToBottomAndRight,
    MoveToBottomAndRightBoundaries,
    MoveToBottomBoundary,
    MoveToLeft,
    MoveToLeftBoundary,
    MoveToRight,
    MoveToRightBoundary,
    MoveToTop,
    MoveToTopAndLeft,
    MoveToTopAndLeftBoundaries,
    MoveToTopAndRight,
    MoveToTopAndRightBoundaries,
    MoveToTopBoundary,
    ShrinkFromBottom,
    ShrinkFromBottomAndLeft,
    ShrinkFromBottomAndRight,
    ShrinkFromLeft,
    ShrinkFromRight,
    ShrinkFromTop,
    ShrinkFromTopAndLeft,
    ShrinkFromTopAndRight,

    // Stepped settings
    MoveAndResizeAdjustmentAmount,
    MouseMoveAmountInPixels,
    MouseScrollAmountInClicks,

    // Mouse actions at the current cursor
    MouseLeftClick,
    MouseLeftDoubleClick,
    MouseMiddleClick,
    MouseRightClick,
    MouseMoveToBottom,
    MouseMoveToLeft,
    MouseMoveToRight,
    MouseMoveToTop,

    // Mouse button holds
    MouseLeftDownUp,
    MouseMiddleDownUp,
    MouseRightDownUp,

    // Mouse actions at a selected point
    MouseDrag,
    MouseMoveAndLeftClick,
    MouseMoveAndLeftDoubleClick,
    MouseMoveAndMiddleClick,
    MouseMoveAndRightClick,
    MouseMoveAndScrollToBottom,
    MouseMoveAndScrollToLeft,
    MouseMoveAndScrollToRight,
    MouseMoveAndScrollToTop,
    MouseMoveTo,
    RepeatLastMouseAction,

    // Mouse modes (state keys, no dispatcher action)
    MouseMagnifier,
    MouseMagneticCursor,

    // Confirmations
    Calibrate,
    Quit,
    YesQuestionResult,
    NoQuestionResult,

    // Suggestions and text
    AddToDictionary,
    NextSuggestions,
    PreviousSuggestions,
    Speak,

    // Handled by the keyboard output only
    BackOne,
    BackMany,
    ClearScratchpad,
    LeftAlt,
    LeftCtrl,
    LeftShift,
    LeftWin,
    Suggestion1,
    Suggestion2,
    Suggestion3,
    Suggestion4,
    Suggestion5,
    Suggestion6,
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionKey {
    type Err = ParseError;

    /// Parse a key by its identifier (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FunctionKey::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownFunctionKey(wanted.to_string()))
    }
}
