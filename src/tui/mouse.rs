//! Mouse gesture classification.
//!
//! Terminals only report presses, releases and motion, so clicks are told
//! apart by timing. A release starts a short wait for a second press; a
//! press held without release turns into a drag. Call
//! [`MouseClassifier::tick`] every loop iteration so pending gestures time
//! out even when no further mouse event arrives.

use connect_log2_engine::{Intent, TilePos};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a release waits for a second click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(350);

/// How long a press is held before it counts as a drag.
pub const DRAG_HOLD: Duration = Duration::from_millis(200);

/// A recognised gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// One click with no follow-up.
    Single(TilePos),
    /// Two clicks on the same cell in quick succession.
    Double(TilePos),
    /// A press turned into a drag.
    DragStart(TilePos),
    /// The drag moved onto a new cell.
    Drag(TilePos),
    /// The drag ended.
    DragStop,
    /// Right button pressed.
    RightButton,
}

impl Click {
    /// Intents the gesture stands for.
    pub fn intents(self) -> Vec<Intent> {
        match self {
            Click::Single(pos) => vec![Intent::StartOrExtend(pos)],
            Click::Double(pos) => vec![Intent::ExtendOnly(pos), Intent::Commit],
            Click::DragStart(pos) => vec![Intent::ExtendOnly(pos)],
            Click::Drag(pos) => vec![Intent::DragExtend(pos)],
            Click::DragStop => Vec::new(),
            Click::RightButton => vec![Intent::Cancel],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Pressed {
        pos: TilePos,
        at: Instant,
    },
    Released {
        pos: TilePos,
        at: Instant,
    },
    SecondPress {
        pos: TilePos,
    },
    Dragging {
        last: TilePos,
    },
}

/// Turns raw button and motion events into [`Click`]s.
#[derive(Debug, Clone, Default)]
pub struct MouseClassifier {
    state: State,
}

impl MouseClassifier {
    /// Creates an idle classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Left button pressed over `pos` (or off the board).
    pub fn left_down(&mut self, pos: Option<TilePos>, now: Instant) -> Vec<Click> {
        let mut clicks = self.tick(now);
        let Some(pos) = pos else {
            return clicks;
        };
        self.state = match self.state {
            State::Released { pos: first, .. } if first == pos => State::SecondPress { pos },
            State::Released { pos: first, .. } => {
                clicks.push(Click::Single(first));
                State::Pressed { pos, at: now }
            }
            _ => State::Pressed { pos, at: now },
        };
        clicks
    }

    /// Left button released.
    pub fn left_up(&mut self, now: Instant) -> Vec<Click> {
        let mut clicks = self.tick(now);
        self.state = match self.state {
            State::Pressed { pos, .. } => State::Released { pos, at: now },
            State::SecondPress { pos } => {
                debug!(%pos, "Double click");
                clicks.push(Click::Double(pos));
                State::Idle
            }
            State::Dragging { .. } => {
                clicks.push(Click::DragStop);
                State::Idle
            }
            state => state,
        };
        clicks
    }

    /// Pointer moved with the left button held.
    pub fn left_drag(&mut self, pos: Option<TilePos>, now: Instant) -> Vec<Click> {
        let mut clicks = self.tick(now);
        let Some(pos) = pos else {
            return clicks;
        };
        match self.state {
            State::Pressed { pos: start, .. } | State::SecondPress { pos: start } => {
                clicks.push(Click::DragStart(start));
                if pos != start {
                    clicks.push(Click::Drag(pos));
                }
                self.state = State::Dragging { last: pos };
            }
            State::Dragging { last } if last != pos => {
                clicks.push(Click::Drag(pos));
                self.state = State::Dragging { last: pos };
            }
            _ => {}
        }
        clicks
    }

    /// Right button pressed; abandons any pending gesture.
    pub fn right_down(&mut self) -> Vec<Click> {
        self.state = State::Idle;
        vec![Click::RightButton]
    }

    /// Resolves gestures whose waiting time has run out.
    pub fn tick(&mut self, now: Instant) -> Vec<Click> {
        match self.state {
            State::Released { pos, at } if now.duration_since(at) > DOUBLE_CLICK_WINDOW => {
                self.state = State::Idle;
                vec![Click::Single(pos)]
            }
            State::Pressed { pos, at } if now.duration_since(at) > DRAG_HOLD => {
                self.state = State::Dragging { last: pos };
                vec![Click::DragStart(pos)]
            }
            _ => Vec::new(),
        }
    }
}
