//! Spawn floor invariant: no tile lies below the current spawn range.

use super::Invariant;
use crate::Game;

/// Invariant: every tile is at least the spawn range's floor.
///
/// Low tiles are pruned whenever the floor rises, and merges only ever
/// produce numbers at or above the tiles they consume.
pub struct SpawnFloorInvariant;

impl Invariant<Game> for SpawnFloorInvariant {
    fn holds(game: &Game) -> bool {
        let low = game.range().low();
        game.grid().tiles().all(|(_, tile)| tile.number >= low)
    }

    fn description() -> &'static str {
        "No tile is below the spawn floor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridDimensions, GridSnapshot, TilePos};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pruned_board_holds() {
        let mut cells = vec![1u8; 30];
        cells[0] = 20;
        let game = Game::from_snapshot(
            GridDimensions::default(),
            &GridSnapshot::new(cells),
            StdRng::seed_from_u64(8),
        )
        .expect("valid snapshot");
        assert_eq!(game.range().low(), 6);
        assert!(SpawnFloorInvariant::holds(&game));
    }

    #[test]
    fn test_low_tile_violates() {
        let mut cells = vec![7u8; 30];
        cells[0] = 20;
        let mut game = Game::from_snapshot(
            GridDimensions::default(),
            &GridSnapshot::new(cells),
            StdRng::seed_from_u64(8),
        )
        .expect("valid snapshot");
        game.grid.set_tile(TilePos::new(3, 3), 2).expect("in bounds");
        assert!(!SpawnFloorInvariant::holds(&game));
    }
}
