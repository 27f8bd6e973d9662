//! Pending point continuation and magnification escrow
//!
//! At most one continuation is armed at a time. Continuations are plain
//! data naming the gesture stage they complete, so running one can arm the
//! next stage without any risk of the registry clobbering it afterwards.

use gaze_input::Point;
use tracing::debug;

use crate::collaborators::{MouseButton, ScrollDirection};
use crate::last_action::MouseAction;

/// Gestures completed by a single selected point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointGesture {
    LeftClick,
    LeftDoubleClick,
    MiddleClick,
    RightClick,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    MoveTo,
}

impl PointGesture {
    /// The mouse action this gesture performs at `point`
    pub fn action_at(self, point: Point) -> MouseAction {
        let scroll = |direction| MouseAction::MoveAndScroll {
            direction,
            at: point,
        };
        match self {
            PointGesture::LeftClick => MouseAction::MoveAndClick {
                button: MouseButton::Left,
                at: point,
            },
            PointGesture::LeftDoubleClick => MouseAction::MoveAndDoubleClick {
                button: MouseButton::Left,
                at: point,
            },
            PointGesture::MiddleClick => MouseAction::MoveAndClick {
                button: MouseButton::Middle,
                at: point,
            },
            PointGesture::RightClick => MouseAction::MoveAndClick {
                button: MouseButton::Right,
                at: point,
            },
            PointGesture::ScrollUp => scroll(ScrollDirection::Up),
            PointGesture::ScrollDown => scroll(ScrollDirection::Down),
            PointGesture::ScrollLeft => scroll(ScrollDirection::Left),
            PointGesture::ScrollRight => scroll(ScrollDirection::Right),
            PointGesture::MoveTo => MouseAction::MoveTo { at: point },
        }
    }
}

/// What the next selected point completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Continuation {
    /// A single-point gesture
    Point(PointGesture),
    /// Awaiting the first point of a drag
    DragStart,
    /// Awaiting the second point of a drag that starts at `from`
    DragEnd { from: Point },
}

/// A continuation held back while the user refines its point in the magnifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnificationEscrow {
    /// Where the magnifier opens
    pub anchor: Point,
    pub continuation: Continuation,
}

/// Result of firing the registry with a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// Nothing was armed
    Idle,
    /// The continuation moved into the escrow at this anchor
    Escrowed(Point),
    /// Run the continuation now with the given point
    Run(Continuation, Option<Point>),
}

/// Holds the pending continuation and the magnification escrow
#[derive(Debug, Clone, Default)]
pub struct ContinuationRegistry {
    pending: Option<Continuation>,
    repeating: bool,
    escrow: Option<MagnificationEscrow>,
}

impl ContinuationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a continuation, replacing any pending one
    ///
    /// A repeating continuation stays armed after it fires; a non-repeating
    /// one is removed before it is handed out to run.
    pub fn arm(&mut self, continuation: Continuation, repeating: bool) {
        debug!("Arming {:?} (repeating: {})", continuation, repeating);
        self.pending = Some(continuation);
        self.repeating = repeating;
    }

    pub fn pending(&self) -> Option<&Continuation> {
        self.pending.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn escrow(&self) -> Option<&MagnificationEscrow> {
        self.escrow.as_ref()
    }

    /// Fire the pending continuation with a selected point (`None` aborts)
    ///
    /// While magnifying, a selected point is not acted on: the continuation
    /// is parked in the escrow at that point and the registry is not
    /// re-armed. Otherwise the caller receives the continuation to run.
    pub fn fire(&mut self, point: Option<Point>, magnifying: bool) -> FireOutcome {
        let continuation = if self.repeating {
            self.pending
        } else {
            self.pending.take()
        };

        let Some(continuation) = continuation else {
            return FireOutcome::Idle;
        };

        match point {
            Some(anchor) if magnifying => {
                debug!("Deferring {:?} to magnifier at {}", continuation, anchor);
                self.escrow = Some(MagnificationEscrow {
                    anchor,
                    continuation,
                });
                FireOutcome::Escrowed(anchor)
            }
            _ => FireOutcome::Run(continuation, point),
        }
    }

    /// Remove the escrow so its continuation can run with the refined point
    pub fn take_escrow(&mut self) -> Option<MagnificationEscrow> {
        self.escrow.take()
    }

    pub fn clear_escrow(&mut self) {
        self.escrow = None;
    }

    /// Drop the pending continuation and the escrow
    pub fn reset(&mut self) {
        self.pending = None;
        self.repeating = false;
        self.escrow = None;
    }
}
