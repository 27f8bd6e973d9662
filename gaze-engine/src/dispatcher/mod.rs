//! Function key dispatch
//!
//! Every function key maps to exactly one branch below. Whatever the branch
//! does, the key's own down state is advanced first and the keyboard output
//! is told about the key last.

mod mouse;
mod screens;
mod window;

use gaze_input::{keys, FunctionKey, KeyDownState, KeyValue};
use tracing::debug;

use crate::collaborators::{Direction, DockSize, MouseButton, SUGGESTIONS_PER_PAGE};
use crate::engine::Core;
use crate::keyboard::Keyboard;
use crate::registry::{Continuation, PointGesture};
use crate::settings::{next_step, PIXEL_STEPS, SCROLL_CLICK_STEPS};

use self::window::WindowCommand;

/// Maps function keys to actions and owns the current keyboard screen
#[derive(Debug, Default)]
pub(crate) struct FunctionKeyDispatcher {
    keyboard: Keyboard,
    /// A calibration was requested and its outcome is still outstanding
    calibrating: bool,
}

impl FunctionKeyDispatcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Mark an outstanding calibration as finished
    ///
    /// Returns false when no calibration was in progress.
    pub(crate) fn finish_calibration(&mut self) -> bool {
        std::mem::take(&mut self.calibrating)
    }

    pub(crate) fn dispatch(&mut self, key: FunctionKey, core: &mut Core) {
        debug!("Dispatching function key {}", key);
        core.key_states.progress_down_state(&KeyValue::function(key));

        match key {
            FunctionKey::AlphaKeyboard => self.show(Keyboard::Alpha, core),
            FunctionKey::BackFromKeyboard => self.navigate_back(core),
            FunctionKey::ConversationAlphaKeyboard
            | FunctionKey::ConversationNumericAndSymbolsKeyboard => {
                self.enter_conversation(key, core)
            }
            FunctionKey::Currencies1Keyboard => self.show(Keyboard::Currencies1, core),
            FunctionKey::Currencies2Keyboard => self.show(Keyboard::Currencies2, core),
            FunctionKey::Diacritic1Keyboard => self.show(Keyboard::Diacritics1, core),
            FunctionKey::Diacritic2Keyboard => self.show(Keyboard::Diacritics2, core),
            FunctionKey::Diacritic3Keyboard => self.show(Keyboard::Diacritics3, core),
            FunctionKey::MenuKeyboard => self.show_menu(core),
            FunctionKey::Minimise => self.minimise(core),
            FunctionKey::MouseKeyboard => self.show_mouse_keyboard(core),
            FunctionKey::NumericAndSymbols1Keyboard => {
                self.show(Keyboard::NumericAndSymbols1, core)
            }
            FunctionKey::NumericAndSymbols2Keyboard => {
                self.show(Keyboard::NumericAndSymbols2, core)
            }
            FunctionKey::NumericAndSymbols3Keyboard => {
                self.show(Keyboard::NumericAndSymbols3, core)
            }
            FunctionKey::PhysicalKeysKeyboard => self.show(Keyboard::PhysicalKeys, core),
            FunctionKey::SizeAndPositionKeyboard => self.show_size_and_position(core),

            FunctionKey::CollapseDock => self.resize_dock(DockSize::Collapsed, core),
            FunctionKey::ExpandDock => self.resize_dock(DockSize::Full, core),
            FunctionKey::DecreaseOpacity => core.services.window.step_opacity(false),
            FunctionKey::IncreaseOpacity => core.services.window.step_opacity(true),
            FunctionKey::ExpandToBottom
            | FunctionKey::ExpandToBottomAndLeft
            | FunctionKey::ExpandToBottomAndRight
            | FunctionKey::ExpandToLeft
            | FunctionKey::ExpandToRight
            | FunctionKey::ExpandToTop
            | FunctionKey::ExpandToTopAndLeft
            | FunctionKey::ExpandToTopAndRight
            | FunctionKey::MoveToBottom
            | FunctionKey::MoveToBottomAndLeft
            | FunctionKey::MoveToBottomAndLeftBoundaries
            | FunctionKey::MoveToBottomAndRight
            | FunctionKey::MoveToBottomAndRightBoundaries
            | FunctionKey::MoveToBottomBoundary
            | FunctionKey::MoveToLeft
            | FunctionKey::MoveToLeftBoundary
            | FunctionKey::MoveToRight
            | FunctionKey::MoveToRightBoundary
            | FunctionKey::MoveToTop
            | FunctionKey::MoveToTopAndLeft
            | FunctionKey::MoveToTopAndLeftBoundaries
            | FunctionKey::MoveToTopAndRight
            | FunctionKey::MoveToTopAndRightBoundaries
            | FunctionKey::MoveToTopBoundary
            | FunctionKey::ShrinkFromBottom
            | FunctionKey::ShrinkFromBottomAndLeft
            | FunctionKey::ShrinkFromBottomAndRight
            | FunctionKey::ShrinkFromLeft
            | FunctionKey::ShrinkFromRight
            | FunctionKey::ShrinkFromTop
            | FunctionKey::ShrinkFromTopAndLeft
            | FunctionKey::ShrinkFromTopAndRight => {
                if let Some(command) = WindowCommand::for_key(key) {
                    command.apply(core);
                }
            }

            FunctionKey::MoveAndResizeAdjustmentAmount => {
                let px = next_step(&PIXEL_STEPS, core.settings.move_and_resize_adjustment_px());
                core.settings.set_move_and_resize_adjustment_px(px);
            }
            FunctionKey::MouseMoveAmountInPixels => {
                let px = next_step(&PIXEL_STEPS, core.settings.mouse_move_amount_px());
                core.settings.set_mouse_move_amount_px(px);
            }
            FunctionKey::MouseScrollAmountInClicks => {
                let clicks = next_step(
                    &SCROLL_CLICK_STEPS,
                    core.settings.mouse_scroll_amount_clicks(),
                );
                core.settings.set_mouse_scroll_amount_clicks(clicks);
            }

            FunctionKey::MouseLeftClick => mouse::click_at_cursor(MouseButton::Left, core),
            FunctionKey::MouseLeftDoubleClick => {
                mouse::double_click_at_cursor(MouseButton::Left, core)
            }
            FunctionKey::MouseMiddleClick => mouse::click_at_cursor(MouseButton::Middle, core),
            FunctionKey::MouseRightClick => mouse::click_at_cursor(MouseButton::Right, core),
            FunctionKey::MouseMoveToBottom => mouse::nudge(Direction::Bottom, core),
            FunctionKey::MouseMoveToLeft => mouse::nudge(Direction::Left, core),
            FunctionKey::MouseMoveToRight => mouse::nudge(Direction::Right, core),
            FunctionKey::MouseMoveToTop => mouse::nudge(Direction::Top, core),

            FunctionKey::MouseLeftDownUp => {
                mouse::toggle_button(MouseButton::Left, &keys::MOUSE_LEFT_DOWN_UP, core)
            }
            FunctionKey::MouseMiddleDownUp => {
                mouse::toggle_button(MouseButton::Middle, &keys::MOUSE_MIDDLE_DOWN_UP, core)
            }
            FunctionKey::MouseRightDownUp => {
                mouse::toggle_button(MouseButton::Right, &keys::MOUSE_RIGHT_DOWN_UP, core)
            }

            FunctionKey::MouseDrag => core.begin_point_gesture(Continuation::DragStart),
            FunctionKey::MouseMoveAndLeftClick => point_gesture(PointGesture::LeftClick, core),
            FunctionKey::MouseMoveAndLeftDoubleClick => {
                point_gesture(PointGesture::LeftDoubleClick, core)
            }
            FunctionKey::MouseMoveAndMiddleClick => point_gesture(PointGesture::MiddleClick, core),
            FunctionKey::MouseMoveAndRightClick => point_gesture(PointGesture::RightClick, core),
            FunctionKey::MouseMoveAndScrollToBottom => {
                point_gesture(PointGesture::ScrollDown, core)
            }
            FunctionKey::MouseMoveAndScrollToLeft => point_gesture(PointGesture::ScrollLeft, core),
            FunctionKey::MouseMoveAndScrollToRight => {
                point_gesture(PointGesture::ScrollRight, core)
            }
            FunctionKey::MouseMoveAndScrollToTop => point_gesture(PointGesture::ScrollUp, core),
            FunctionKey::MouseMoveTo => point_gesture(PointGesture::MoveTo, core),
            FunctionKey::RepeatLastMouseAction => {
                if !core.replay_last_action() {
                    debug!("No mouse action to repeat");
                }
            }

            FunctionKey::Calibrate => self.ask_calibrate(core),
            FunctionKey::Quit => self.ask_quit(core),
            FunctionKey::YesQuestionResult => self.answer_question(true, core),
            FunctionKey::NoQuestionResult => self.answer_question(false, core),

            FunctionKey::AddToDictionary => core.services.keyboard.add_text_to_dictionary(),
            FunctionKey::NextSuggestions => next_suggestions(core),
            FunctionKey::PreviousSuggestions => previous_suggestions(core),
            FunctionKey::Speak => speak(core),

            // State keys and keys the keyboard output handles on its own
            FunctionKey::MouseMagnifier
            | FunctionKey::MouseMagneticCursor
            | FunctionKey::BackOne
            | FunctionKey::BackMany
            | FunctionKey::ClearScratchpad
            | FunctionKey::LeftAlt
            | FunctionKey::LeftCtrl
            | FunctionKey::LeftShift
            | FunctionKey::LeftWin
            | FunctionKey::Suggestion1
            | FunctionKey::Suggestion2
            | FunctionKey::Suggestion3
            | FunctionKey::Suggestion4
            | FunctionKey::Suggestion5
            | FunctionKey::Suggestion6 => {}
        }

        core.services.keyboard.process_function_key(key);
    }
}

fn point_gesture(gesture: PointGesture, core: &mut Core) {
    core.begin_point_gesture(Continuation::Point(gesture));
}

fn next_suggestions(core: &mut Core) {
    let suggestions = &mut core.services.suggestions;
    let page = suggestions.page();
    if suggestions.count() > (page + 1) * SUGGESTIONS_PER_PAGE {
        debug!("Moving to suggestion page {}", page + 1);
        suggestions.set_page(page + 1);
    }
}

fn previous_suggestions(core: &mut Core) {
    let suggestions = &mut core.services.suggestions;
    let page = suggestions.page();
    if page > 0 {
        debug!("Moving to suggestion page {}", page - 1);
        suggestions.set_page(page - 1);
    }
}

/// Start narrating the composed text, or stop narration in progress
fn speak(core: &mut Core) {
    let text = core.services.keyboard.text();
    let started = core
        .services
        .audio
        .speak_or_interrupt(&text, core.settings.speech());
    let state = if started {
        KeyDownState::Down
    } else {
        KeyDownState::Up
    };
    core.key_states.set_down_state(&keys::SPEAK, state);
}
