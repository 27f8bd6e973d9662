//! Keyboard screen transitions and confirmation questions

use gaze_input::{keys, FunctionKey, KeyDownState};
use tracing::{debug, warn};

use crate::engine::{Core, EngineEvent};
use crate::keyboard::{BackAction, Keyboard, Question, QuestionAction};

use super::FunctionKeyDispatcher;

const QUIT_QUESTION: &str = "Are you sure you would like to quit?";
const QUIT_CONFIRMATION: &str = "Are you absolutely sure that you'd like to quit?";
const CALIBRATE_QUESTION: &str = "Are you sure you would like to re-calibrate?";
const MANUAL_CALIBRATE_QUESTION: &str = "Calibration cannot be completed without manual \
    intervention, e.g. having to use a mouse. You may be stuck in the calibration process if \
    you cannot manually interact with your computer.\nAre you sure you would like to re-calibrate?";

impl FunctionKeyDispatcher {
    pub(super) fn show(&mut self, keyboard: Keyboard, core: &mut Core) {
        let kind = keyboard.kind();
        debug!("Changing keyboard to {:?}", kind);
        self.keyboard = keyboard;
        core.publish(EngineEvent::KeyboardChanged(kind));
    }

    /// Take the current screen out, to be captured by the next one
    fn take_keyboard(&mut self) -> Box<Keyboard> {
        Box::new(std::mem::take(&mut self.keyboard))
    }

    pub(super) fn navigate_back(&mut self, core: &mut Core) {
        match std::mem::take(&mut self.keyboard).into_back_action() {
            Some(back) => self.run_back_action(back, core),
            None => self.show(Keyboard::Alpha, core),
        }
    }

    fn run_back_action(&mut self, back: BackAction, core: &mut Core) {
        match back {
            BackAction::Return(previous) => self.show(*previous, core),
            BackAction::RestoreWindow(previous) => {
                core.services.window.restore();
                self.show(*previous, core);
            }
            BackAction::LeaveConversation { previous, opacity } => {
                debug!("Restoring window size and opacity {}", opacity);
                core.services.window.restore();
                core.services.window.set_opacity(opacity);
                self.show(*previous, core);
            }
            BackAction::ReinstateModifiers {
                previous,
                modifiers,
            } => {
                for (key, state) in &modifiers {
                    core.key_states.set_down_state(key, *state);
                }
                self.show(*previous, core);
            }
        }
    }

    /// Show a conversation screen maximised and fully opaque
    ///
    /// Moving between the two conversation screens keeps the original back
    /// action, so one back press leaves conversation mode entirely.
    pub(super) fn enter_conversation(&mut self, key: FunctionKey, core: &mut Core) {
        let opacity = core.services.window.opacity();
        let back = match std::mem::take(&mut self.keyboard) {
            Keyboard::ConversationAlpha { back }
            | Keyboard::ConversationNumericAndSymbols { back } => back,
            previous => BackAction::LeaveConversation {
                previous: Box::new(previous),
                opacity,
            },
        };

        let keyboard = if key == FunctionKey::ConversationAlphaKeyboard {
            Keyboard::ConversationAlpha { back }
        } else {
            Keyboard::ConversationNumericAndSymbols { back }
        };
        self.show(keyboard, core);
        core.services.window.maximise();
        core.services.window.set_opacity(1.0);
    }

    pub(super) fn show_menu(&mut self, core: &mut Core) {
        core.services.window.restore();
        let back = BackAction::Return(self.take_keyboard());
        self.show(Keyboard::Menu { back }, core);
    }

    pub(super) fn minimise(&mut self, core: &mut Core) {
        core.services.window.minimise();
        let back = BackAction::RestoreWindow(self.take_keyboard());
        self.show(Keyboard::Minimised { back }, core);
    }

    pub(super) fn show_size_and_position(&mut self, core: &mut Core) {
        let back = BackAction::Return(self.take_keyboard());
        self.show(Keyboard::SizeAndPosition { back }, core);
    }

    /// Show the mouse keyboard, releasing modifiers for its duration if configured
    pub(super) fn show_mouse_keyboard(&mut self, core: &mut Core) {
        let previous = self.take_keyboard();
        let back = if core.key_states.simulate_key_strokes()
            && core.settings.suppress_modifiers_in_mouse_keyboard()
        {
            let modifiers: Vec<_> = keys::MODIFIERS
                .into_iter()
                .map(|key| {
                    let state = core.key_states.down_state(&key);
                    (key, state)
                })
                .collect();
            for (key, _) in &modifiers {
                core.key_states.set_down_state(key, KeyDownState::Up);
            }
            BackAction::ReinstateModifiers {
                previous,
                modifiers,
            }
        } else {
            BackAction::Return(previous)
        };

        self.show(Keyboard::Mouse { back }, core);
        self.reinstate_mouse_keyboard_dock(core);
    }

    pub(super) fn ask_quit(&mut self, core: &mut Core) {
        let previous = self.take_keyboard();
        let question = Question {
            text: QUIT_QUESTION.to_string(),
            yes: QuestionAction::ConfirmQuit(previous.clone()),
            no: QuestionAction::Return(previous),
        };
        self.show(Keyboard::YesNoQuestion(question), core);
    }

    /// Ask before calibrating; a no-op without a calibration service
    pub(super) fn ask_calibrate(&mut self, core: &mut Core) {
        let Some(calibration) = core.services.calibration.as_ref() else {
            debug!("Calibrate selected but no calibration service is available");
            return;
        };
        let text = if calibration.can_complete_without_manual_intervention() {
            CALIBRATE_QUESTION
        } else {
            MANUAL_CALIBRATE_QUESTION
        };

        let previous = self.take_keyboard();
        let question = Question {
            text: text.to_string(),
            yes: QuestionAction::Calibrate(previous.clone()),
            no: QuestionAction::Return(previous),
        };
        self.show(Keyboard::YesNoQuestion(question), core);
    }

    pub(super) fn answer_question(&mut self, yes: bool, core: &mut Core) {
        let question = match std::mem::take(&mut self.keyboard) {
            Keyboard::YesNoQuestion(question) => question,
            other => {
                warn!("Question answered while no question is showing");
                self.keyboard = other;
                return;
            }
        };
        debug!("Answered {} to {:?}", if yes { "yes" } else { "no" }, question.text);

        let action = if yes { question.yes } else { question.no };
        match action {
            QuestionAction::Return(previous) => self.show(*previous, core),
            QuestionAction::ConfirmQuit(previous) => {
                let question = Question {
                    text: QUIT_CONFIRMATION.to_string(),
                    yes: QuestionAction::Shutdown,
                    no: QuestionAction::Return(previous),
                };
                self.show(Keyboard::YesNoQuestion(question), core);
            }
            QuestionAction::Shutdown => {
                debug!("Quit confirmed, shutting down");
                core.services.host.shutdown();
            }
            QuestionAction::Calibrate(previous) => {
                core.services.input.suspend();
                self.show(*previous, core);
                match core.services.calibration.as_mut() {
                    Some(calibration) => {
                        self.calibrating = true;
                        calibration.request();
                    }
                    None => {
                        warn!("Calibration confirmed but no calibration service is available");
                        core.services.input.resume();
                    }
                }
            }
        }
    }
}
