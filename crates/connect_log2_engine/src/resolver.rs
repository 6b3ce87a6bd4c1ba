//! Turning a committed chain into a merged tile, and keeping the spawn
//! range in step with the board.

use crate::chain::ChainBuilder;
use crate::grid::Grid;
use crate::position::TilePos;
use crate::tile::{GridTile, TileRange};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// The tile a commit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Merge {
    /// Where the merged tile was placed (the chain's last position).
    pub pos: TilePos,
    /// Number of the merged tile.
    pub number: u8,
    /// Sum of the real values that went into it.
    pub sum: u128,
}

/// Resolves moves and adapts the spawn range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResolver {
    range: TileRange,
}

impl MoveResolver {
    /// Creates a resolver spawning from the initial range `[1, 9)`.
    pub fn new() -> Self {
        Self {
            range: TileRange::default(),
        }
    }

    /// Current spawn range.
    pub fn range(&self) -> TileRange {
        self.range
    }

    /// Commits the chain: removes its tiles, places the merged tile on the
    /// last position, refills the board and adapts the spawn range.
    ///
    /// The merged number is capped at [`GridTile::MAX_NUMBER`] so the board
    /// always stays loadable from a snapshot. An empty chain is a no-op and returns `None`.
    #[instrument(skip_all, fields(len = chain.len()))]
    pub fn commit<R: Rng + ?Sized>(
        &mut self,
        chain: &mut ChainBuilder,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<Merge> {
        let positions = chain.take();
        let last = *positions.last()?;

        let mut sum = 0u128;
        for pos in &positions {
            match grid.remove_tile(*pos) {
                Ok(tile) => sum = sum.saturating_add(tile.real_value()),
                Err(e) => warn!(error = %e, "Chained position lost its tile"),
            }
        }
        if sum == 0 {
            return None;
        }

        let number = merged_number(sum).min(GridTile::MAX_NUMBER);
        if let Err(e) = grid.set_tile(last, number) {
            warn!(error = %e, "Could not place merged tile");
            return None;
        }
        info!(pos = %last, number, sum = %sum, "Merged chain");

        grid.refill(self.range, rng);
        self.handle_highest_number(grid, rng);

        Some(Merge {
            pos: last,
            number,
            sum,
        })
    }

    /// Moves the spawn range to follow the highest tile.
    ///
    /// When the range moves, tiles below the new floor are removed and the
    /// board is refilled from the new range. Returns the new range if it moved.
    #[instrument(skip_all)]
    pub fn handle_highest_number<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<TileRange> {
        let highest = grid.get_highest_number();
        let range = TileRange::for_highest(highest);
        if range == self.range {
            return None;
        }
        info!(highest, from = %self.range, to = %range, "Spawn range moved");
        self.range = range;
        grid.remove_low_tiles(range.low());
        grid.refill(range, rng);
        Some(range)
    }

    /// Goes back to the initial range without touching the board.
    pub(crate) fn reset_range(&mut self) {
        debug!("Spawn range reset");
        self.range = TileRange::default();
    }
}

impl Default for MoveResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds `log2(sum)` up to the next whole exponent.
///
/// Exact powers of two map to their own exponent.
pub fn merged_number(sum: u128) -> u8 {
    if sum == 0 {
        return 0;
    }
    let floor = 127 - sum.leading_zeros();
    let number = if sum.is_power_of_two() { floor } else { floor + 1 };
    number as u8
}

/// Sum of the real values of every tile on the board.
pub fn score(grid: &Grid) -> u128 {
    grid.tiles()
        .fold(0u128, |acc, (_, tile)| acc.saturating_add(tile.real_value()))
}
