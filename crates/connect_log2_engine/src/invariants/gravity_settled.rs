//! Gravity invariant: no empty cell sits below a tile.

use super::Invariant;
use crate::{Game, TilePos};

/// Invariant: every column is settled.
///
/// Scanning a column from the top, once a tile is seen no empty cell
/// follows. Equivalently, the occupied rows are the bottom-most K rows.
pub struct GravitySettledInvariant;

impl Invariant<Game> for GravitySettledInvariant {
    fn holds(game: &Game) -> bool {
        let grid = game.grid();
        let dimensions = grid.dimensions();
        (0..dimensions.columns()).all(|x| {
            let mut seen_tile = false;
            (0..dimensions.rows()).all(|y| {
                let occupied = grid.get_tile(TilePos::new(x, y)).is_some();
                let ok = occupied || !seen_tile;
                seen_tile |= occupied;
                ok
            })
        })
    }

    fn description() -> &'static str {
        "Columns are settled (no empty cell below a tile)"
    }
}
