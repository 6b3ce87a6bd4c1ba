//! One-way notifications from the engine to whatever draws the board.
//!
//! The engine never calls into a renderer. It queues events and the
//! presentation layer drains them once per frame.

use crate::position::TilePos;
use crate::tile::TileRange;
use serde::{Deserialize, Serialize};

/// Something the presentation layer may want to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationEvent {
    /// A cell now holds a tile with `number`.
    TileSet {
        /// Cell position.
        pos: TilePos,
        /// New tile number.
        number: u8,
    },
    /// A cell became empty.
    TileRemoved {
        /// Cell position.
        pos: TilePos,
    },
    /// Gravity finished during a refill; fill events follow.
    DropsSettled,
    /// The cursor highlight moved on or off a cell.
    Highlight {
        /// Cell position.
        pos: TilePos,
        /// Whether the cell is highlighted now.
        on: bool,
    },
    /// The pending chain changed; carries the full chain in order.
    MarkedChanged(Vec<TilePos>),
    /// Score or highest tile changed after a move.
    ScoreChanged {
        /// Sum of the real values of all tiles.
        points: u128,
        /// Highest tile number on the board.
        highest: u8,
    },
    /// The spawn range moved.
    RangeChanged(TileRange),
}
