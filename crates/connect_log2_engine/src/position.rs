//! Grid coordinates and cursor navigation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the grid.
///
/// `x` is the column, `y` the row. Row 0 is the top of the board;
/// gravity pulls tiles towards larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TilePos {
    /// Creates a new position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if `other` touches this position, diagonals included.
    ///
    /// A position is never its own neighbour.
    pub fn is_neighbour(self, other: TilePos) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Returns the position offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Moves one step in `direction`, staying inside `columns × rows`.
    #[instrument]
    pub fn step(self, direction: Direction, columns: i32, rows: i32) -> Self {
        let (dx, dy) = direction.delta();
        let x = (self.x + dx).clamp(0, columns - 1);
        let y = (self.y + dy).clamp(0, rows - 1);
        Self::new(x, y)
    }
}

impl std::fmt::Display for TilePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cursor movement direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the bottom row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Returns the `(dx, dy)` of one step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
