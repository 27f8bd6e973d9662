//! Line-oriented driver script
//!
//! Each non-empty line is one command; lines starting with `#` are comments.

use anyhow::{anyhow, bail, Context, Result};
use gaze_engine::{CalibrationError, ServiceError};
use gaze_input::{FunctionKey, InputEvent, KeyValue, Point, ProgressTarget, Rect, SelectionResult};

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Handed to the engine thread
    Command(Command),
    /// A collaborator failure, reported from the reader thread
    Error(ServiceError),
}

/// A command for the engine thread
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Events from the input source, in order
    Input(Vec<InputEvent>),
    /// A dwell on a key; only possible while selecting keys
    Key(KeyValue),
    /// Add a key region to the point-to-key map
    Region { bounds: Rect, key: KeyValue },
    /// The magnifier resolved (or cancelled) its point
    Magnify(Option<Point>),
    Acknowledge(u64),
    Calibrated(Result<String, CalibrationError>),
    SpeechDone,
    Quit,
}

/// Parse one line, returning `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Line>> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "rate" => Command::Input(vec![InputEvent::RateSample(number(&args, 0)?)]),
        "pos" => Command::Input(vec![InputEvent::PositionSample {
            point: point(&args, 0)?,
            key: key_arg(args.get(2)),
        }]),
        "progress" => Command::Input(vec![InputEvent::ProgressSample {
            target: Some(ProgressTarget {
                point: point(&args, 0)?,
                key: key_arg(args.get(3)),
            }),
            fraction: number(&args, 2)?,
        }]),
        "progress-reset" => Command::Input(vec![InputEvent::ProgressSample {
            target: None,
            fraction: 0.0,
        }]),
        "select" => Command::Input(vec![InputEvent::Selection {
            key: key_arg(args.get(2)),
            point: point(&args, 0)?,
        }]),
        "key" => {
            let key: FunctionKey = args
                .first()
                .ok_or_else(|| anyhow!("key needs a function key name"))?
                .parse()?;
            Command::Key(KeyValue::function(key))
        }
        "text" => {
            if args.is_empty() {
                bail!("text needs something to type");
            }
            Command::Key(KeyValue::text(args.join(" ")))
        }
        "region" => Command::Region {
            bounds: Rect::new(
                number(&args, 0)?,
                number(&args, 1)?,
                number(&args, 2)?,
                number(&args, 3)?,
            ),
            key: key_arg(args.get(4)).ok_or_else(|| anyhow!("region needs a key"))?,
        },
        "multi" => {
            if args.is_empty() {
                bail!("multi needs at least one candidate");
            }
            Command::Input(vec![InputEvent::SelectionResult(SelectionResult {
                points: Vec::new(),
                key: None,
                multi_key: Some(args.iter().map(|w| w.to_string()).collect()),
            })])
        }
        "magnify" => Command::Magnify(Some(point(&args, 0)?)),
        "magnify-cancel" => Command::Magnify(None),
        "ack" => {
            let id = args.first().ok_or_else(|| anyhow!("ack needs a notification id"))?;
            let id = id.trim_start_matches('#');
            Command::Acknowledge(id.parse().with_context(|| format!("bad notification id {id:?}"))?)
        }
        "calibrated" => {
            let message = (args.len() > 1).then(|| args[1..].join(" "));
            match args.first().copied() {
                Some("ok") => Command::Calibrated(Ok(message.unwrap_or_else(|| {
                    "Calibration complete".to_string()
                }))),
                Some("fail") => Command::Calibrated(Err(CalibrationError::Unsuccessful(message))),
                other => bail!("calibrated expects ok or fail, got {:?}", other),
            }
        }
        "speech-done" => Command::SpeechDone,
        "error" => {
            let source = args.first().ok_or_else(|| anyhow!("error needs a source"))?;
            return Ok(Some(Line::Error(ServiceError::new(
                *source,
                args[1..].join(" "),
            ))));
        }
        "quit" => Command::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(Line::Command(command)))
}

/// The selection and its result that a dwell on `key` at `point` produces
pub fn key_dwell(key: KeyValue, point: Point) -> Vec<InputEvent> {
    vec![
        InputEvent::Selection {
            key: Some(key.clone()),
            point,
        },
        InputEvent::SelectionResult(SelectionResult {
            points: vec![point],
            key: Some(key),
            multi_key: None,
        }),
    ]
}

fn number(args: &[&str], index: usize) -> Result<f64> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("missing argument {}", index + 1))?;
    raw.parse()
        .with_context(|| format!("argument {} is not a number: {raw:?}", index + 1))
}

fn point(args: &[&str], index: usize) -> Result<Point> {
    Ok(Point::new(number(args, index)?, number(args, index + 1)?))
}

/// A key argument names a function key, otherwise it is literal text
fn key_arg(arg: Option<&&str>) -> Option<KeyValue> {
    let arg = arg?;
    Some(match arg.parse::<FunctionKey>() {
        Ok(key) => KeyValue::function(key),
        Err(_) => KeyValue::text(*arg),
    })
}
