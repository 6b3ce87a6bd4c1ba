//! Errors raised by grid mutations and snapshot loading.

use crate::position::TilePos;

/// Error that can occur when mutating the grid or loading a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The position lies outside the grid.
    #[display("Position {} is outside the grid", _0)]
    OutOfBounds(TilePos),

    /// The position holds no tile.
    #[display("Position {} holds no tile", _0)]
    EmptyCell(TilePos),

    /// A snapshot does not cover exactly every cell.
    #[display("Snapshot holds {} cells, grid has {}", actual, expected)]
    SnapshotLength {
        /// Cells in the grid.
        expected: usize,
        /// Cells in the snapshot.
        actual: usize,
    },

    /// A snapshot cell carries a number no tile can have.
    #[display("Tile number {} is out of range", _0)]
    InvalidTileNumber(u8),

    /// A grid needs at least one column and one row.
    #[display("Grid dimensions {}x{} are invalid", columns, rows)]
    InvalidDimensions {
        /// Requested columns.
        columns: i32,
        /// Requested rows.
        rows: i32,
    },

    /// A spawn range is empty or starts below 1.
    #[display("Tile range [{}, {}) is invalid", low, high)]
    InvalidRange {
        /// Inclusive lower bound.
        low: u8,
        /// Exclusive upper bound.
        high: u8,
    },
}

impl std::error::Error for EngineError {}
