//! Chain invariant: the pending chain obeys the marking rules.

use super::Invariant;
use crate::Game;
use std::collections::HashSet;

/// Invariant: the pending chain is a legal run.
///
/// Positions are distinct and occupied, each touches its predecessor,
/// the first two carry the same number and every later one is equal to
/// or one above the tile marked before it.
pub struct ChainConnectedInvariant;

impl Invariant<Game> for ChainConnectedInvariant {
    fn holds(game: &Game) -> bool {
        let grid = game.grid();
        let chain = game.chain().positions();

        let distinct: HashSet<_> = chain.iter().collect();
        if distinct.len() != chain.len() {
            return false;
        }

        let numbers: Option<Vec<u8>> = chain
            .iter()
            .map(|pos| grid.get_tile(*pos).map(|tile| tile.number))
            .collect();
        let Some(numbers) = numbers else {
            return false;
        };

        chain.windows(2).zip(numbers.windows(2)).enumerate().all(
            |(i, (positions, pair))| {
                let adjacent = positions[1].is_neighbour(positions[0]);
                let same = pair[1] == pair[0];
                let step_up = i > 0 && pair[1] == pair[0].saturating_add(1);
                adjacent && (same || step_up)
            },
        )
    }

    fn description() -> &'static str {
        "Pending chain is connected, distinct and follows the value rule"
    }
}
