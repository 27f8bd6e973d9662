use gaze_input::{
    keys, FunctionKey, InputEvent, KeyDownState, KeyValue, Point, ProgressTarget, SelectionMode,
    SelectionResult,
};

use super::*;
use crate::collaborators::{Direction, DockSize, MouseButton, Notification, NotificationId, Sound};
use crate::error::CalibrationError;
use crate::keyboard::KeyboardKind;
use crate::last_action::MouseAction;
use crate::registry::{Continuation, PointGesture};
use crate::settings::{Settings, WindowState};
use crate::testing::{Call, Recorder};

fn setup() -> (Engine, Recorder) {
    let recorder = Recorder::new();
    let engine = Engine::new(Settings::default(), recorder.services());
    recorder.take_calls();
    (engine, recorder)
}

fn result(key: Option<KeyValue>, multi_key: Option<Vec<String>>) -> InputEvent {
    InputEvent::SelectionResult(SelectionResult {
        points: vec![Point::new(1.0, 1.0)],
        key,
        multi_key,
    })
}

fn press(engine: &mut Engine, key: FunctionKey) {
    engine.handle_event(result(Some(KeyValue::function(key)), None));
}

fn select(engine: &mut Engine, x: f64, y: f64) {
    engine.handle_event(InputEvent::Selection {
        key: None,
        point: Point::new(x, y),
    });
}

fn keyboard_kind(engine: &Engine) -> KeyboardKind {
    engine.keyboard().kind()
}

#[test]
fn test_new_engine_starts_in_key_mode() {
    let recorder = Recorder::new();
    let engine = Engine::new(Settings::default(), recorder.services());

    assert_eq!(engine.selection_mode(), SelectionMode::Key);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Alpha);
    assert_eq!(recorder.calls(), vec![Call::SetSelectionMode(SelectionMode::Key)]);
}

#[test]
fn test_pixel_step_cycles() {
    let (mut engine, _recorder) = setup();

    engine.settings_mut().set_move_and_resize_adjustment_px(25);
    press(&mut engine, FunctionKey::MoveAndResizeAdjustmentAmount);
    assert_eq!(engine.settings().move_and_resize_adjustment_px(), 50);

    engine.settings_mut().set_move_and_resize_adjustment_px(100);
    press(&mut engine, FunctionKey::MoveAndResizeAdjustmentAmount);
    assert_eq!(engine.settings().move_and_resize_adjustment_px(), 1);

    engine.settings_mut().set_mouse_scroll_amount_clicks(7);
    press(&mut engine, FunctionKey::MouseScrollAmountInClicks);
    assert_eq!(engine.settings().mouse_scroll_amount_clicks(), 1);

    press(&mut engine, FunctionKey::MouseMoveAmountInPixels);
    assert_eq!(engine.settings().mouse_move_amount_px(), 25);
}

#[test]
fn test_text_result_is_typed() {
    let (mut engine, recorder) = setup();

    engine.handle_event(result(Some(KeyValue::text("a")), None));

    assert_eq!(recorder.calls(), vec![Call::SingleKeyText("a".into())]);
    assert_eq!(engine.selection_mode(), SelectionMode::Key);
    assert_eq!(engine.debug_points(), Some(&[Point::new(1.0, 1.0)][..]));
}

#[test]
fn test_result_routes_every_part() {
    let (mut engine, recorder) = setup();
    let key = KeyValue {
        function_key: Some(FunctionKey::NextSuggestions),
        text: Some("x".into()),
    };

    engine.handle_event(result(Some(key), Some(vec!["hi".into(), "ho".into()])));

    assert_eq!(
        recorder.calls(),
        vec![
            Call::SingleKeyText("x".into()),
            Call::FunctionKey(FunctionKey::NextSuggestions),
            Call::MultiKey(vec!["hi".into(), "ho".into()]),
        ]
    );
}

#[test]
fn test_result_in_point_mode_is_dropped() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::MouseMoveTo);
    recorder.take_calls();

    engine.handle_event(result(Some(KeyValue::text("a")), None));

    assert!(recorder.calls().is_empty());
    assert!(engine.registry().is_armed());
}

#[test]
fn test_drag_performs_and_replays() {
    let (mut engine, recorder) = setup();

    press(&mut engine, FunctionKey::MouseDrag);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::SetSelectionMode(SelectionMode::Point),
            Call::CursorVisible(true),
            Call::FunctionKey(FunctionKey::MouseDrag),
        ]
    );

    select(&mut engine, 10.0, 10.0);
    assert_eq!(recorder.take_calls(), vec![Call::Sound(Sound::MouseDown)]);
    // The first point armed the second stage
    assert_eq!(
        engine.registry().pending(),
        Some(&Continuation::DragEnd {
            from: Point::new(10.0, 10.0)
        })
    );

    select(&mut engine, 20.0, 30.0);
    let drag = vec![
        Call::MoveTo(Point::new(10.0, 10.0)),
        Call::ButtonDown(MouseButton::Left),
        Call::Sound(Sound::MouseUp),
        Call::MoveTo(Point::new(20.0, 30.0)),
        Call::ButtonUp(MouseButton::Left),
    ];
    let mut expected = vec![Call::CursorVisible(false)];
    expected.extend(drag.clone());
    expected.push(Call::SetSelectionMode(SelectionMode::Key));
    assert_eq!(recorder.take_calls(), expected);

    assert_eq!(engine.selection_mode(), SelectionMode::Key);
    assert!(!engine.registry().is_armed());
    assert_eq!(
        engine.last_action().get(),
        Some(&MouseAction::Drag {
            from: Point::new(10.0, 10.0),
            to: Point::new(20.0, 30.0),
        })
    );

    press(&mut engine, FunctionKey::RepeatLastMouseAction);
    let mut replayed = drag;
    replayed.push(Call::FunctionKey(FunctionKey::RepeatLastMouseAction));
    assert_eq!(recorder.take_calls(), replayed);
}

#[test]
fn test_aborted_drag_resets() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::MouseDrag);
    recorder.take_calls();

    engine.resolve_magnified_point(None);
    // Nothing was escrowed, so nothing happens
    assert!(engine.registry().is_armed());

    engine
        .key_states_mut()
        .set_down_state(&keys::MOUSE_MAGNIFIER, KeyDownState::Down);
    select(&mut engine, 5.0, 5.0);
    engine.resolve_magnified_point(None);

    assert_eq!(engine.selection_mode(), SelectionMode::Key);
    assert!(!engine.registry().is_armed());
    assert!(engine.registry().escrow().is_none());
    assert!(!engine.cursor_visible());
    assert_eq!(
        engine.key_states().down_state(&keys::MOUSE_MAGNIFIER),
        KeyDownState::Up
    );
    assert!(!recorder.calls().contains(&Call::Sound(Sound::MouseDown)));
    assert_eq!(recorder.calls().last(), Some(&Call::MagnifyAt(None)));
    assert_eq!(engine.magnify_at(), None);
}

#[test]
fn test_locked_magnifier_escrows_click() {
    let (mut engine, recorder) = setup();
    engine
        .key_states_mut()
        .set_down_state(&keys::MOUSE_MAGNIFIER, KeyDownState::LockedDown);

    press(&mut engine, FunctionKey::MouseMoveAndLeftClick);
    recorder.take_calls();

    let anchor = Point::new(100.0, 100.0);
    select(&mut engine, anchor.x, anchor.y);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorVisible(false),
            Call::MagnifyAt(Some(anchor)),
            Call::CursorVisible(true),
        ]
    );
    assert!(!engine.registry().is_armed());
    assert_eq!(engine.registry().escrow().map(|e| e.anchor), Some(anchor));
    assert_eq!(engine.magnify_at(), Some(anchor));

    let refined = Point::new(103.5, 98.0);
    engine.resolve_magnified_point(Some(refined));
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorVisible(false),
            Call::Sound(Sound::MouseClick),
            Call::MoveAndClick(refined, MouseButton::Left),
            Call::SetSelectionMode(SelectionMode::Key),
            Call::MagnifyAt(None),
        ]
    );
    assert!(engine.registry().escrow().is_none());
    assert_eq!(engine.magnify_at(), None);
    // Locked down survives the reset
    assert_eq!(
        engine.key_states().down_state(&keys::MOUSE_MAGNIFIER),
        KeyDownState::LockedDown
    );
}

#[test]
fn test_magnified_drag_takes_both_points_through_magnifier() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::MouseMagnifier);
    engine
        .key_states_mut()
        .set_down_state(&keys::MOUSE_MAGNIFIER, KeyDownState::LockedDown);
    press(&mut engine, FunctionKey::MouseDrag);

    select(&mut engine, 10.0, 10.0);
    recorder.take_calls();
    engine.resolve_magnified_point(Some(Point::new(11.0, 11.0)));
    assert_eq!(
        recorder.take_calls(),
        vec![Call::Sound(Sound::MouseDown), Call::MagnifyAt(None)]
    );
    assert_eq!(engine.magnify_at(), None);
    assert_eq!(
        engine.registry().pending(),
        Some(&Continuation::DragEnd {
            from: Point::new(11.0, 11.0)
        })
    );

    select(&mut engine, 40.0, 40.0);
    assert!(engine.registry().escrow().is_some());
    recorder.take_calls();

    engine.resolve_magnified_point(Some(Point::new(42.0, 39.0)));
    let calls = recorder.take_calls();
    assert!(calls.contains(&Call::MoveTo(Point::new(11.0, 11.0))));
    assert!(calls.contains(&Call::MoveTo(Point::new(42.0, 39.0))));
    assert_eq!(calls.last(), Some(&Call::MagnifyAt(None)));
    assert_eq!(engine.selection_mode(), SelectionMode::Key);
}

#[test]
fn test_error_mid_gesture_keeps_it_armed() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::MouseMoveAndRightClick);
    recorder.take_calls();

    engine.error_reporter().report("tracker", "Lost connection");
    assert_eq!(engine.drain_errors(), 1);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::Suspend,
            Call::Sound(Sound::Error),
            Call::Notify(
                NotificationId(1),
                Notification::error("Uh-oh!", "Lost connection")
            ),
        ]
    );
    assert!(engine.registry().is_armed());
    assert_eq!(engine.selection_mode(), SelectionMode::Point);
    assert_eq!(engine.awaiting_acknowledgement(), 1);

    assert!(!engine.acknowledge(NotificationId(7)));
    assert!(recorder.take_calls().is_empty());

    assert!(engine.acknowledge(NotificationId(1)));
    assert_eq!(recorder.take_calls(), vec![Call::Resume]);

    select(&mut engine, 3.0, 4.0);
    assert!(recorder
        .calls()
        .contains(&Call::MoveAndClick(Point::new(3.0, 4.0), MouseButton::Right)));
}

#[test]
fn test_quit_declined_restores_keyboard() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::NumericAndSymbols2Keyboard);

    press(&mut engine, FunctionKey::Quit);
    assert_eq!(
        engine.keyboard().question().map(|q| q.text.as_str()),
        Some("Are you sure you would like to quit?")
    );

    press(&mut engine, FunctionKey::NoQuestionResult);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::NumericAndSymbols2);
    assert!(!recorder.calls().contains(&Call::Shutdown));
}

#[test]
fn test_quit_needs_two_confirmations() {
    let (mut engine, recorder) = setup();

    press(&mut engine, FunctionKey::Quit);
    press(&mut engine, FunctionKey::YesQuestionResult);
    assert_eq!(
        engine.keyboard().question().map(|q| q.text.as_str()),
        Some("Are you absolutely sure that you'd like to quit?")
    );
    assert!(!recorder.calls().contains(&Call::Shutdown));

    press(&mut engine, FunctionKey::NoQuestionResult);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Alpha);

    press(&mut engine, FunctionKey::Quit);
    press(&mut engine, FunctionKey::YesQuestionResult);
    press(&mut engine, FunctionKey::YesQuestionResult);
    assert!(recorder.calls().contains(&Call::Shutdown));
}

#[test]
fn test_answer_without_question_is_ignored() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::Currencies1Keyboard);

    press(&mut engine, FunctionKey::YesQuestionResult);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Currencies1);
    assert_eq!(
        recorder.calls().last(),
        Some(&Call::FunctionKey(FunctionKey::YesQuestionResult))
    );
}

#[test]
fn test_calibration_success() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::Diacritic1Keyboard);

    press(&mut engine, FunctionKey::Calibrate);
    assert_eq!(
        engine.keyboard().question().map(|q| q.text.as_str()),
        Some("Are you sure you would like to re-calibrate?")
    );
    recorder.take_calls();

    press(&mut engine, FunctionKey::YesQuestionResult);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::Suspend,
            Call::CalibrationRequested,
            Call::FunctionKey(FunctionKey::YesQuestionResult),
        ]
    );
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Diacritics1);

    engine.calibration_completed(Ok("Calibration complete".into()));
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::Sound(Sound::Info),
            Call::Notify(
                NotificationId(1),
                Notification::normal("Success", "Calibration complete")
            ),
        ]
    );

    assert!(engine.acknowledge(NotificationId(1)));
    assert_eq!(recorder.take_calls(), vec![Call::Resume]);
}

#[test]
fn test_calibration_failure() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::Calibrate);
    press(&mut engine, FunctionKey::YesQuestionResult);
    recorder.take_calls();

    engine.calibration_completed(Err(CalibrationError::Unsuccessful(None)));
    let calls = recorder.take_calls();
    assert_eq!(calls[0], Call::Sound(Sound::Error));
    let Call::Notify(_, notification) = &calls[1] else {
        panic!("expected a notification, got {:?}", calls[1]);
    };
    assert_eq!(notification.title, "Uh-oh!");
    assert!(notification.message.starts_with("Something went wrong"));

    // A second outcome has no calibration to finish
    engine.calibration_completed(Ok("late".into()));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_calibration_question_warns_about_manual_steps() {
    let (mut engine, recorder) = setup();
    recorder.set_calibration_unattended(false);

    press(&mut engine, FunctionKey::Calibrate);
    let text = engine.keyboard().question().map(|q| q.text.clone());
    assert!(text.is_some_and(|t| t.starts_with("Calibration cannot be completed")));

    press(&mut engine, FunctionKey::NoQuestionResult);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Alpha);
    assert!(!recorder.calls().contains(&Call::CalibrationRequested));
}

#[test]
fn test_calibrate_without_service_does_nothing() {
    let recorder = Recorder::new();
    let mut services = recorder.services();
    services.calibration = None;
    let mut engine = Engine::new(Settings::default(), services);

    press(&mut engine, FunctionKey::Calibrate);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Alpha);
}

#[test]
fn test_progress_follows_mode() {
    let (mut engine, _recorder) = setup();
    let a = KeyValue::text("a");

    engine.handle_event(InputEvent::ProgressSample {
        target: Some(ProgressTarget {
            point: Point::new(1.0, 1.0),
            key: Some(a.clone()),
        }),
        fraction: 0.4,
    });
    assert_eq!(engine.key_states().key_progress(&a), 0.4);
    assert_eq!(engine.key_states().point_progress(), None);

    press(&mut engine, FunctionKey::MouseMoveTo);
    engine.handle_event(InputEvent::ProgressSample {
        target: Some(ProgressTarget {
            point: Point::new(9.0, 9.0),
            key: None,
        }),
        fraction: 0.7,
    });
    assert_eq!(
        engine.key_states().point_progress(),
        Some((Point::new(9.0, 9.0), 0.7))
    );

    engine.handle_event(InputEvent::ProgressSample {
        target: None,
        fraction: 0.0,
    });
    assert_eq!(engine.key_states().key_progress(&a), 0.0);
    assert_eq!(engine.key_states().point_progress(), None);
}

#[test]
fn test_toggles_clear_last_action() {
    let (mut engine, recorder) = setup();
    recorder.set_cursor(Point::new(5.0, 5.0));

    press(&mut engine, FunctionKey::MouseLeftClick);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorQuery,
            Call::Sound(Sound::MouseClick),
            Call::Click(MouseButton::Left),
            Call::FunctionKey(FunctionKey::MouseLeftClick),
        ]
    );
    assert_eq!(
        engine.last_action().get(),
        Some(&MouseAction::Click {
            button: MouseButton::Left,
            at: Some(Point::new(5.0, 5.0)),
        })
    );

    press(&mut engine, FunctionKey::MouseLeftDownUp);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorQuery,
            Call::Sound(Sound::MouseDown),
            Call::ButtonDown(MouseButton::Left),
            Call::FunctionKey(FunctionKey::MouseLeftDownUp),
        ]
    );
    assert!(engine.last_action().get().is_none());

    press(&mut engine, FunctionKey::MouseLeftDownUp);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorQuery,
            Call::Sound(Sound::MouseUp),
            Call::ButtonUp(MouseButton::Left),
            Call::FunctionKey(FunctionKey::MouseLeftDownUp),
        ]
    );
    assert_eq!(
        engine.key_states().down_state(&keys::MOUSE_LEFT_DOWN_UP),
        KeyDownState::Up
    );

    press(&mut engine, FunctionKey::RepeatLastMouseAction);
    assert_eq!(
        recorder.take_calls(),
        vec![Call::FunctionKey(FunctionKey::RepeatLastMouseAction)]
    );
}

#[test]
fn test_click_replays_at_sampled_position() {
    let (mut engine, recorder) = setup();
    recorder.set_cursor(Point::new(5.0, 5.0));
    press(&mut engine, FunctionKey::MouseRightClick);

    recorder.set_cursor(Point::new(80.0, 80.0));
    recorder.take_calls();
    press(&mut engine, FunctionKey::RepeatLastMouseAction);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::MoveTo(Point::new(5.0, 5.0)),
            Call::Sound(Sound::MouseClick),
            Call::Click(MouseButton::Right),
            Call::FunctionKey(FunctionKey::RepeatLastMouseAction),
        ]
    );
}

#[test]
fn test_nudge_moves_by_mouse_step() {
    let (mut engine, recorder) = setup();
    recorder.set_cursor(Point::new(50.0, 50.0));

    press(&mut engine, FunctionKey::MouseMoveToRight);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::CursorQuery,
            Call::MoveTo(Point::new(60.0, 50.0)),
            Call::FunctionKey(FunctionKey::MouseMoveToRight),
        ]
    );

    // Replay moves on from wherever the cursor now is
    engine.settings_mut().set_mouse_move_amount_px(5);
    press(&mut engine, FunctionKey::RepeatLastMouseAction);
    assert!(recorder
        .calls()
        .contains(&Call::MoveTo(Point::new(65.0, 50.0))));
}

#[test]
fn test_point_gestures_perform_their_action() {
    let cases = [
        (
            FunctionKey::MouseMoveAndLeftDoubleClick,
            Call::MoveAndDoubleClick(Point::new(7.0, 8.0), MouseButton::Left),
        ),
        (
            FunctionKey::MouseMoveAndMiddleClick,
            Call::MoveAndClick(Point::new(7.0, 8.0), MouseButton::Middle),
        ),
        (
            FunctionKey::MouseMoveAndScrollToTop,
            Call::MoveAndScroll(Point::new(7.0, 8.0), crate::ScrollDirection::Up, 3),
        ),
        (FunctionKey::MouseMoveTo, Call::MoveTo(Point::new(7.0, 8.0))),
    ];

    for (key, expected) in cases {
        let (mut engine, recorder) = setup();
        press(&mut engine, key);
        select(&mut engine, 7.0, 8.0);
        assert!(
            recorder.calls().contains(&expected),
            "{key} did not produce {expected:?}"
        );
        assert_eq!(engine.selection_mode(), SelectionMode::Key);
        assert!(!engine.cursor_visible());
    }
}

#[test]
fn test_key_result_in_point_mode_keeps_pending_gesture() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::MouseMoveAndLeftClick);
    recorder.take_calls();
    press(&mut engine, FunctionKey::MouseMoveTo);

    assert!(recorder.calls().is_empty());
    assert_eq!(
        engine.registry().pending(),
        Some(&Continuation::Point(PointGesture::LeftClick))
    );
    assert_eq!(engine.selection_mode(), SelectionMode::Point);
}

#[test]
fn test_suggestion_paging_is_bounded() {
    let (mut engine, recorder) = setup();
    recorder.set_suggestions(13, 0);

    for _ in 0..3 {
        press(&mut engine, FunctionKey::NextSuggestions);
    }
    assert_eq!(recorder.suggestion_page(), 2);

    for _ in 0..4 {
        press(&mut engine, FunctionKey::PreviousSuggestions);
    }
    assert_eq!(recorder.suggestion_page(), 0);

    recorder.set_suggestions(6, 0);
    press(&mut engine, FunctionKey::NextSuggestions);
    assert_eq!(recorder.suggestion_page(), 0);
}

#[test]
fn test_speak_mirrors_narration() {
    let (mut engine, recorder) = setup();
    recorder.set_text("hello there");

    press(&mut engine, FunctionKey::Speak);
    assert!(recorder.calls().contains(&Call::Speak("hello there".into())));
    assert_eq!(
        engine.key_states().down_state(&keys::SPEAK),
        KeyDownState::Down
    );

    engine.speech_finished();
    assert_eq!(engine.key_states().down_state(&keys::SPEAK), KeyDownState::Up);

    recorder.set_speech_starts(false);
    press(&mut engine, FunctionKey::Speak);
    assert_eq!(engine.key_states().down_state(&keys::SPEAK), KeyDownState::Up);
}

#[test]
fn test_conversation_back_restores_window() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::NumericAndSymbols1Keyboard);
    recorder.take_calls();

    press(&mut engine, FunctionKey::ConversationAlphaKeyboard);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::Maximise,
            Call::SetOpacity(1.0),
            Call::FunctionKey(FunctionKey::ConversationAlphaKeyboard),
        ]
    );

    press(&mut engine, FunctionKey::ConversationNumericAndSymbolsKeyboard);
    assert_eq!(
        keyboard_kind(&engine),
        KeyboardKind::ConversationNumericAndSymbols
    );
    recorder.take_calls();

    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(
        recorder.take_calls(),
        vec![
            Call::Restore,
            Call::SetOpacity(0.8),
            Call::FunctionKey(FunctionKey::BackFromKeyboard),
        ]
    );
    assert_eq!(keyboard_kind(&engine), KeyboardKind::NumericAndSymbols1);
}

#[test]
fn test_back_without_back_action_goes_to_alpha() {
    let (mut engine, _recorder) = setup();
    press(&mut engine, FunctionKey::Currencies2Keyboard);
    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Alpha);
}

#[test]
fn test_minimise_and_menu_return() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::PhysicalKeysKeyboard);

    press(&mut engine, FunctionKey::Minimise);
    assert!(recorder.calls().contains(&Call::Minimise));
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Minimised);
    recorder.take_calls();

    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(recorder.take_calls()[0], Call::Restore);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::PhysicalKeys);

    press(&mut engine, FunctionKey::MenuKeyboard);
    press(&mut engine, FunctionKey::SizeAndPositionKeyboard);
    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::Menu);
    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(keyboard_kind(&engine), KeyboardKind::PhysicalKeys);
}

#[test]
fn test_mouse_keyboard_suppresses_modifiers() {
    let (mut engine, _recorder) = setup();
    press(&mut engine, FunctionKey::LeftShift);
    press(&mut engine, FunctionKey::LeftCtrl);
    press(&mut engine, FunctionKey::LeftCtrl);
    assert_eq!(
        engine.key_states().down_state(&keys::LEFT_SHIFT),
        KeyDownState::Down
    );
    assert_eq!(
        engine.key_states().down_state(&keys::LEFT_CTRL),
        KeyDownState::LockedDown
    );

    press(&mut engine, FunctionKey::MouseKeyboard);
    for modifier in keys::MODIFIERS {
        assert_eq!(engine.key_states().down_state(&modifier), KeyDownState::Up);
    }

    press(&mut engine, FunctionKey::BackFromKeyboard);
    assert_eq!(
        engine.key_states().down_state(&keys::LEFT_SHIFT),
        KeyDownState::Down
    );
    assert_eq!(
        engine.key_states().down_state(&keys::LEFT_CTRL),
        KeyDownState::LockedDown
    );
}

#[test]
fn test_mouse_keyboard_keeps_modifiers_when_not_simulating() {
    let (mut engine, _recorder) = setup();
    engine.key_states_mut().set_simulate_key_strokes(false);
    press(&mut engine, FunctionKey::LeftAlt);

    press(&mut engine, FunctionKey::MouseKeyboard);
    assert_eq!(
        engine.key_states().down_state(&keys::LEFT_ALT),
        KeyDownState::Down
    );
}

#[test]
fn test_mouse_keyboard_dock_size() {
    let (mut engine, recorder) = setup();
    engine.settings_mut().set_main_window_state(WindowState::Docked);
    engine
        .settings_mut()
        .set_mouse_keyboard_dock_size(DockSize::Collapsed);

    press(&mut engine, FunctionKey::MouseKeyboard);
    assert!(recorder.calls().contains(&Call::ResizeDock(DockSize::Collapsed)));
    assert_eq!(engine.settings().main_window_dock_size(), DockSize::Collapsed);

    press(&mut engine, FunctionKey::ExpandDock);
    assert_eq!(engine.settings().mouse_keyboard_dock_size(), DockSize::Full);

    press(&mut engine, FunctionKey::BackFromKeyboard);
    press(&mut engine, FunctionKey::CollapseDock);
    assert_eq!(engine.settings().main_window_dock_size(), DockSize::Collapsed);
    assert_eq!(engine.settings().mouse_keyboard_dock_size(), DockSize::Full);
}

#[test]
fn test_window_keys_use_adjustment_amount() {
    let (mut engine, recorder) = setup();
    engine.settings_mut().set_move_and_resize_adjustment_px(25);

    press(&mut engine, FunctionKey::MoveToTop);
    press(&mut engine, FunctionKey::MoveToBottomAndLeftBoundaries);
    press(&mut engine, FunctionKey::ExpandToLeft);
    press(&mut engine, FunctionKey::ShrinkFromTopAndRight);
    press(&mut engine, FunctionKey::IncreaseOpacity);

    let window_calls: Vec<_> = recorder
        .calls()
        .into_iter()
        .filter(|call| !matches!(call, Call::FunctionKey(_)))
        .collect();
    assert_eq!(
        window_calls,
        vec![
            Call::MoveWindow(Direction::Top, Some(25)),
            Call::MoveWindow(Direction::BottomLeft, None),
            Call::Expand(Direction::Left, 25),
            Call::Shrink(Direction::TopRight, 25),
            Call::StepOpacity(true),
        ]
    );
}

#[test]
fn test_add_to_dictionary() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::AddToDictionary);
    assert_eq!(
        recorder.calls(),
        vec![
            Call::AddToDictionary,
            Call::FunctionKey(FunctionKey::AddToDictionary),
        ]
    );
}

#[test]
fn test_pass_through_keys_only_notify() {
    let (mut engine, recorder) = setup();
    press(&mut engine, FunctionKey::BackMany);
    assert_eq!(
        recorder.calls(),
        vec![Call::FunctionKey(FunctionKey::BackMany)]
    );
}

#[test]
fn test_key_selection_sound_and_event() {
    let (mut engine, recorder) = setup();
    let events = engine.subscribe();
    let key = KeyValue::text("q");

    engine.handle_event(InputEvent::Selection {
        key: Some(key.clone()),
        point: Point::new(1.0, 2.0),
    });
    assert_eq!(recorder.take_calls(), vec![Call::Sound(Sound::KeySelection)]);
    assert_eq!(events.try_recv(), Ok(EngineEvent::KeySelection(key.clone())));

    engine.set_capturing_multi_key(true);
    engine.handle_event(InputEvent::Selection {
        key: Some(key),
        point: Point::new(1.0, 2.0),
    });
    assert!(recorder.take_calls().is_empty());
}

#[test]
fn test_observers_see_mode_and_cursor_changes() {
    let (mut engine, _recorder) = setup();
    let events = engine.subscribe();

    press(&mut engine, FunctionKey::MouseMoveTo);
    select(&mut engine, 2.0, 2.0);

    let seen: Vec<_> = events.try_iter().collect();
    assert_eq!(
        seen,
        vec![
            EngineEvent::SelectionModeChanged(SelectionMode::Point),
            EngineEvent::CursorVisibility(true),
            EngineEvent::PointSelection(Point::new(2.0, 2.0)),
            EngineEvent::CursorVisibility(false),
            EngineEvent::SelectionModeChanged(SelectionMode::Key),
        ]
    );
}

#[test]
fn test_dropped_observer_is_pruned() {
    let (mut engine, _recorder) = setup();
    drop(engine.subscribe());
    let events = engine.subscribe();

    press(&mut engine, FunctionKey::AlphaKeyboard);
    assert_eq!(
        events.try_recv(),
        Ok(EngineEvent::KeyboardChanged(KeyboardKind::Alpha))
    );
}

#[test]
fn test_magnetic_cursor_follows_position() {
    let (mut engine, recorder) = setup();
    let point = Point::new(30.0, 40.0);

    engine.handle_event(InputEvent::PositionSample { point, key: None });
    assert!(recorder.take_calls().is_empty());
    assert_eq!(engine.current_position(), Some(&(point, None)));

    press(&mut engine, FunctionKey::MouseMagneticCursor);
    recorder.take_calls();
    engine.handle_event(InputEvent::PositionSample { point, key: None });
    assert_eq!(recorder.take_calls(), vec![Call::MoveTo(point)]);

    engine.handle_event(InputEvent::RateSample(30.5));
    assert_eq!(engine.points_per_second(), Some(30.5));
}

#[test]
fn test_point_to_key_map_is_forwarded() {
    let (mut engine, recorder) = setup();
    engine.set_point_to_key_map(gaze_input::PointToKeyMap::new());
    assert_eq!(recorder.calls(), vec![Call::SetPointToKeyMap(0)]);
}
