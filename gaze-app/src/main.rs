//! gaze - selection engine driven from the terminal
//!
//! Reads a script of input-source events from stdin and logs every action
//! the engine takes. Useful for exercising gestures without a gaze tracker.

mod console;
mod script;

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use gaze_engine::{Engine, EngineEvent, ErrorReporter, NotificationId, Settings};
use gaze_input::{InputEvent, Point, PointToKeyMap, SelectionMode};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{Console, Desktop};
use crate::script::{Command, Line};

/// How often the main loop checks the shutdown flag while idle
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let settings = Settings::load();

    // Shutdown flag, set by the host collaborator once quit is confirmed
    let shutdown = Arc::new(AtomicBool::new(false));
    let desktop = Arc::new(Mutex::new(Desktop::default()));
    let console = Console::new(desktop.clone(), shutdown.clone());

    let mut engine = Engine::new(settings, console.services());
    let events = engine.subscribe();

    let (cmd_tx, cmd_rx) = unbounded();
    let reporter = engine.error_reporter();
    // Blocked on stdin, so it is detached rather than joined
    thread::spawn(move || read_script(cmd_tx, reporter));

    info!("gaze ready, reading commands from stdin");
    run(&mut engine, &cmd_rx, &events, &desktop, &shutdown);
    info!("gaze stopped");
    Ok(())
}

fn read_script(tx: Sender<Command>, reporter: ErrorReporter) {
    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        match script::parse_line(&line) {
            Ok(Some(Line::Error(err))) => reporter.report(err.source_name, err.message),
            Ok(Some(Line::Command(command))) => {
                if tx.send(command).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("line {}: {:#}", number + 1, e),
        }
    }
    debug!("Script reader finished");
}

fn run(
    engine: &mut Engine,
    commands: &Receiver<Command>,
    events: &Receiver<EngineEvent>,
    desktop: &Mutex<Desktop>,
    shutdown: &AtomicBool,
) {
    let errors = engine.error_receiver();
    let mut running = true;

    while running && !shutdown.load(Ordering::SeqCst) {
        select! {
            recv(commands) -> command => match command {
                Ok(Command::Quit) | Err(_) => running = false,
                Ok(command) => apply(engine, command, desktop),
            },
            recv(errors) -> err => {
                if let Ok(err) = err {
                    engine.on_error(&err);
                }
            },
            default(IDLE_POLL) => {}
        }

        while let Ok(event) = events.try_recv() {
            debug!("Engine event: {:?}", event);
        }
    }
}

fn apply(engine: &mut Engine, command: Command, desktop: &Mutex<Desktop>) {
    match command {
        Command::Input(inputs) => {
            if input_suspended(desktop) {
                return;
            }
            for input in inputs {
                let input = match engine.selection_mode() {
                    SelectionMode::Key => resolve_key(input, &desktop.lock().key_map),
                    SelectionMode::Point => input,
                };
                engine.handle_event(input);
            }
        }
        Command::Key(key) => {
            if input_suspended(desktop) {
                return;
            }
            if engine.selection_mode() == SelectionMode::Point {
                warn!("Key {} ignored, a point is being selected", key);
                return;
            }
            let at = engine.current_position().map_or(Point::default(), |(point, _)| *point);
            for input in script::key_dwell(key, at) {
                engine.handle_event(input);
            }
        }
        Command::Region { bounds, key } => {
            let mut map = desktop.lock().key_map.clone();
            map.insert(bounds, key);
            engine.set_point_to_key_map(map);
        }
        Command::Magnify(point) => engine.resolve_magnified_point(point),
        Command::Acknowledge(id) => {
            engine.acknowledge(NotificationId(id));
        }
        Command::Calibrated(outcome) => engine.calibration_completed(outcome),
        Command::SpeechDone => {
            desktop.lock().speaking = false;
            engine.speech_finished();
        }
        Command::Quit => {}
    }
}

/// A suspended input source produces nothing until resumed
fn input_suspended(desktop: &Mutex<Desktop>) -> bool {
    let suspended = desktop.lock().suspended;
    if suspended {
        info!("Input suspended, dropping input");
    }
    suspended
}

/// Fill in the key under the point where the script left it out
fn resolve_key(input: InputEvent, map: &PointToKeyMap) -> InputEvent {
    match input {
        InputEvent::PositionSample { point, key: None } => InputEvent::PositionSample {
            point,
            key: map.resolve(point).cloned(),
        },
        InputEvent::Selection { point, key: None } => InputEvent::Selection {
            point,
            key: map.resolve(point).cloned(),
        },
        InputEvent::SelectionResult(mut result) if result.key.is_none() => {
            result.key = result
                .points
                .last()
                .and_then(|point| map.resolve(*point))
                .cloned();
            InputEvent::SelectionResult(result)
        }
        other => other,
    }
}
