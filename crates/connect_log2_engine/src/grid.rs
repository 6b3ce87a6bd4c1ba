//! The board model: a fixed matrix of optional tiles.
//!
//! The grid owns gravity, random refill, low-tile pruning and the
//! connection checks that decide whether the game can go on. It knows
//! nothing about drawing; every cell change is queued as a
//! [`PresentationEvent`] for the presentation layer to drain.

use crate::error::EngineError;
use crate::events::PresentationEvent;
use crate::position::TilePos;
use crate::tile::{GridTile, TileRange};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Number of columns and rows of a grid. Constant for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    columns: i32,
    rows: i32,
}

impl GridDimensions {
    /// Columns of the reference board.
    pub const DEFAULT_COLUMNS: i32 = 5;
    /// Rows of the reference board.
    pub const DEFAULT_ROWS: i32 = 6;

    /// Creates dimensions; both must be positive and the cell count must
    /// fit in an `i32`.
    pub fn new(columns: i32, rows: i32) -> Result<Self, EngineError> {
        if columns <= 0 || rows <= 0 || columns.checked_mul(rows).is_none() {
            return Err(EngineError::InvalidDimensions { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of columns.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Returns true if `pos` addresses a cell.
    pub fn contains(&self, pos: TilePos) -> bool {
        (0..self.columns).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.columns + pos.x) as usize)
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            rows: Self::DEFAULT_ROWS,
        }
    }
}

/// Flat, row-major list of cell numbers; `0` marks an empty cell.
///
/// This is the save-game payload. It serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridSnapshot(Vec<u8>);

impl GridSnapshot {
    /// Number used for an empty cell.
    pub const EMPTY: u8 = 0;

    /// Wraps a flat list of cell numbers.
    pub fn new(cells: Vec<u8>) -> Self {
        Self(cells)
    }

    /// Returns the cell numbers.
    pub fn cells(&self) -> &[u8] {
        &self.0
    }

    /// Unwraps the cell numbers.
    pub fn into_cells(self) -> Vec<u8> {
        self.0
    }
}

/// Fixed-size rectangular board of optional tiles.
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Option<GridTile>>,
    events: Vec<PresentationEvent>,
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
            events: Vec::new(),
        }
    }

    /// Returns the grid dimensions.
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Returns the tile at `pos`, or `None` if the cell is empty or off the grid.
    pub fn get_tile(&self, pos: TilePos) -> Option<GridTile> {
        self.dimensions.index(pos).and_then(|i| self.cells[i])
    }

    /// Puts a tile with `number` at `pos`, replacing any tile there.
    pub fn set_tile(&mut self, pos: TilePos, number: u8) -> Result<(), EngineError> {
        let index = self
            .dimensions
            .index(pos)
            .ok_or(EngineError::OutOfBounds(pos))?;
        self.cells[index] = Some(GridTile::new(number));
        self.events.push(PresentationEvent::TileSet { pos, number });
        Ok(())
    }

    /// Clears the occupied cell at `pos` and returns its tile.
    pub fn remove_tile(&mut self, pos: TilePos) -> Result<GridTile, EngineError> {
        let index = self
            .dimensions
            .index(pos)
            .ok_or(EngineError::OutOfBounds(pos))?;
        let tile = self.cells[index]
            .take()
            .ok_or(EngineError::EmptyCell(pos))?;
        self.events.push(PresentationEvent::TileRemoved { pos });
        Ok(tile)
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + use<> {
        let columns = self.dimensions.columns;
        let total = self.dimensions.columns * self.dimensions.rows;
        (0..total).map(move |i| TilePos::new(i % columns, i / columns))
    }

    /// Iterates the in-grid neighbours of `pos`.
    ///
    /// Order is fixed: x offset outer, y offset inner, both from -1 to +1.
    pub fn neighbours(&self, pos: TilePos) -> impl Iterator<Item = TilePos> + use<> {
        let dimensions = self.dimensions;
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| pos.offset(dx, dy)))
            .filter(move |n| *n != pos && dimensions.contains(*n))
    }

    /// Iterates occupied cells with their positions in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, GridTile)> + '_ {
        self.positions()
            .filter_map(|pos| self.get_tile(pos).map(|tile| (pos, tile)))
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns true if some neighbour of `pos` holds a tile with the same number.
    ///
    /// Only equality counts here: a tile that could only continue a chain
    /// one step up cannot start one.
    pub fn check_connections_possible_for_pos(&self, pos: TilePos) -> bool {
        let Some(tile) = self.get_tile(pos) else {
            return false;
        };
        self.neighbours(pos)
            .filter_map(|n| self.get_tile(n))
            .any(|neighbour| neighbour.number == tile.number)
    }

    /// Returns true if any legal connection exists anywhere on the board.
    ///
    /// False means the game is over.
    #[instrument(skip(self))]
    pub fn check_connections_possible(&self) -> bool {
        let possible = self
            .positions()
            .any(|pos| self.check_connections_possible_for_pos(pos));
        debug!(possible, "Checked board for connections");
        possible
    }

    /// Pulls the nearest tile above an empty `pos` down into it.
    ///
    /// Returns whether a tile moved.
    pub fn drop_tile(&mut self, pos: TilePos) -> bool {
        if !self.dimensions.contains(pos) || self.get_tile(pos).is_some() {
            return false;
        }
        let source = (0..pos.y)
            .rev()
            .map(|y| TilePos::new(pos.x, y))
            .find(|above| self.get_tile(*above).is_some());
        let Some(source) = source else {
            return false;
        };
        match self.remove_tile(source) {
            Ok(tile) => {
                trace!(from = %source, to = %pos, number = tile.number, "Dropped tile");
                self.set_tile(pos, tile.number).is_ok()
            }
            Err(_) => false,
        }
    }

    /// Settles every column under gravity, then fills the empty top cells
    /// with numbers drawn uniformly from `range`.
    #[instrument(skip(self, rng), fields(range = %range))]
    pub fn refill<R: Rng + ?Sized>(&mut self, range: TileRange, rng: &mut R) {
        let columns = self.dimensions.columns;
        let rows = self.dimensions.rows;

        let mut dropped = 0usize;
        for y in (1..rows).rev() {
            for x in 0..columns {
                if self.drop_tile(TilePos::new(x, y)) {
                    dropped += 1;
                }
            }
        }
        self.events.push(PresentationEvent::DropsSettled);

        let mut filled = 0usize;
        for y in (0..rows).rev() {
            for x in 0..columns {
                let pos = TilePos::new(x, y);
                if self.get_tile(pos).is_none() {
                    let number = rng.random_range(range.low()..range.high());
                    if self.set_tile(pos, number).is_ok() {
                        filled += 1;
                    }
                }
            }
        }
        debug!(dropped, filled, "Refilled grid");
    }

    /// Clears every tile whose number is below `low`.
    #[instrument(skip(self))]
    pub fn remove_low_tiles(&mut self, low: u8) {
        let doomed: Vec<TilePos> = self
            .tiles()
            .filter(|(_, tile)| tile.number < low)
            .map(|(pos, _)| pos)
            .collect();
        for pos in &doomed {
            let _ = self.remove_tile(*pos);
        }
        debug!(removed = doomed.len(), "Removed low tiles");
    }

    /// Returns the highest tile number on the board, or 1 for an empty board.
    pub fn get_highest_number(&self) -> u8 {
        self.tiles()
            .map(|(_, tile)| tile.number)
            .max()
            .unwrap_or(GridTile::MIN_NUMBER)
    }

    /// Exports every cell in row-major order, `0` for empty cells.
    pub fn to_cells(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|cell| cell.map_or(GridSnapshot::EMPTY, |tile| tile.number))
            .collect()
    }

    /// Exports the board as a save-game payload.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.to_cells())
    }

    /// Replaces every cell from a row-major list.
    ///
    /// A list of the wrong length, or holding a number above
    /// [`GridTile::MAX_NUMBER`], is rejected and the grid stays unchanged.
    #[instrument(skip(self, cells), fields(len = cells.len()))]
    pub fn load_cells(&mut self, cells: &[u8]) -> Result<(), EngineError> {
        let expected = self.dimensions.cell_count();
        if cells.len() != expected {
            return Err(EngineError::SnapshotLength {
                expected,
                actual: cells.len(),
            });
        }
        if let Some(bad) = cells.iter().find(|n| **n > GridTile::MAX_NUMBER) {
            return Err(EngineError::InvalidTileNumber(*bad));
        }

        for (pos, number) in self.positions().zip(cells.iter().copied()) {
            let occupied = self.get_tile(pos).is_some();
            if number == GridSnapshot::EMPTY {
                if occupied {
                    self.remove_tile(pos)?;
                }
            } else {
                self.set_tile(pos, number)?;
            }
        }
        debug!("Loaded grid cells");
        Ok(())
    }

    /// Replaces every cell from a save-game payload.
    pub fn load_snapshot(&mut self, snapshot: &GridSnapshot) -> Result<(), EngineError> {
        self.load_cells(snapshot.cells())
    }

    /// Takes the queued presentation events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridDimensions::default())
    }
}
