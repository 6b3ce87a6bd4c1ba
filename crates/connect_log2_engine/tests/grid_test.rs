//! Tests for the board model.

use connect_log2_engine::{
    EngineError, Grid, GridDimensions, GridSnapshot, GridTile, PresentationEvent, TilePos,
    TileRange,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn grid_from(cells: &[u8]) -> Grid {
    let mut grid = Grid::default();
    grid.load_cells(cells).expect("valid cells");
    grid.drain_events();
    grid
}

/// 5x6 board where no two touching cells share a number.
fn no_pairs() -> Vec<u8> {
    // Each row alternates between two values; consecutive rows use disjoint
    // value pairs, so neither horizontal, vertical nor diagonal pairs match.
    let rows: [[u8; 5]; 6] = [
        [1, 2, 1, 2, 1],
        [3, 4, 3, 4, 3],
        [5, 6, 5, 6, 5],
        [1, 2, 1, 2, 1],
        [3, 4, 3, 4, 3],
        [5, 6, 5, 6, 5],
    ];
    rows.concat()
}

fn assert_settled(grid: &Grid) {
    let dims = grid.dimensions();
    for x in 0..dims.columns() {
        let occupied: Vec<bool> = (0..dims.rows())
            .map(|y| grid.get_tile(TilePos::new(x, y)).is_some())
            .collect();
        let first = occupied.iter().position(|o| *o).unwrap_or(occupied.len());
        assert!(
            occupied[first..].iter().all(|o| *o),
            "column {} has a hole below a tile: {:?}",
            x,
            occupied
        );
    }
}

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::default();
    assert_eq!(grid.dimensions().cell_count(), 30);
    assert_eq!(grid.tiles().count(), 0);
    assert!(!grid.is_full());
}

#[test]
fn test_get_tile_out_of_range_is_absent() {
    let grid = grid_from(&[4; 30]);
    assert_eq!(grid.get_tile(TilePos::new(-1, 0)), None);
    assert_eq!(grid.get_tile(TilePos::new(0, -1)), None);
    assert_eq!(grid.get_tile(TilePos::new(5, 0)), None);
    assert_eq!(grid.get_tile(TilePos::new(0, 6)), None);
    assert_eq!(grid.get_tile(TilePos::new(4, 5)), Some(GridTile::new(4)));
}

#[test]
fn test_set_and_remove_notify_presentation() {
    let mut grid = Grid::default();
    let pos = TilePos::new(2, 3);
    grid.set_tile(pos, 7).expect("in bounds");
    assert_eq!(grid.get_tile(pos), Some(GridTile::new(7)));
    let removed = grid.remove_tile(pos).expect("occupied");
    assert_eq!(removed.number, 7);
    assert_eq!(grid.get_tile(pos), None);
    assert_eq!(
        grid.drain_events(),
        vec![
            PresentationEvent::TileSet { pos, number: 7 },
            PresentationEvent::TileRemoved { pos },
        ]
    );
    assert!(grid.drain_events().is_empty());
}

#[test]
fn test_mutations_reject_bad_positions() {
    let mut grid = Grid::default();
    let outside = TilePos::new(9, 9);
    assert_eq!(grid.set_tile(outside, 3), Err(EngineError::OutOfBounds(outside)));
    assert_eq!(grid.remove_tile(outside), Err(EngineError::OutOfBounds(outside)));
    let empty = TilePos::new(1, 1);
    assert_eq!(grid.remove_tile(empty), Err(EngineError::EmptyCell(empty)));
}

#[test]
fn test_neighbour_order_is_x_outer_y_inner() {
    let grid = Grid::default();
    let around: Vec<TilePos> = grid.neighbours(TilePos::new(2, 2)).collect();
    assert_eq!(
        around,
        vec![
            TilePos::new(1, 1),
            TilePos::new(1, 2),
            TilePos::new(1, 3),
            TilePos::new(2, 1),
            TilePos::new(2, 3),
            TilePos::new(3, 1),
            TilePos::new(3, 2),
            TilePos::new(3, 3),
        ]
    );
    let corner: Vec<TilePos> = grid.neighbours(TilePos::new(0, 0)).collect();
    assert_eq!(
        corner,
        vec![TilePos::new(0, 1), TilePos::new(1, 0), TilePos::new(1, 1)]
    );
}

#[test]
fn test_no_pairs_means_no_connections() {
    let grid = grid_from(&no_pairs());
    assert!(!grid.check_connections_possible());
    for pos in grid.positions() {
        assert!(!grid.check_connections_possible_for_pos(pos));
    }
}

#[test]
fn test_single_pair_means_connection() {
    let mut cells = no_pairs();
    // (4,5) becomes 6, matching its left neighbour (3,5)
    cells[29] = 6;
    let grid = grid_from(&cells);
    assert!(grid.check_connections_possible());
    assert!(grid.check_connections_possible_for_pos(TilePos::new(4, 5)));
    assert!(grid.check_connections_possible_for_pos(TilePos::new(3, 5)));
    assert!(!grid.check_connections_possible_for_pos(TilePos::new(0, 0)));
}

#[test]
fn test_diagonal_pair_counts_as_connection() {
    let mut cells = no_pairs();
    // (1,1) is 4; make (0,0) a 4 as well
    cells[0] = 4;
    let grid = grid_from(&cells);
    assert!(grid.check_connections_possible_for_pos(TilePos::new(0, 0)));
}

#[test]
fn test_one_higher_neighbour_does_not_start_a_chain() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(0, 0), 3).expect("in bounds");
    grid.set_tile(TilePos::new(1, 0), 4).expect("in bounds");
    assert!(!grid.check_connections_possible_for_pos(TilePos::new(0, 0)));
    assert!(!grid.check_connections_possible());
}

#[test]
fn test_empty_cell_has_no_connections() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(0, 1), 3).expect("in bounds");
    grid.set_tile(TilePos::new(1, 1), 3).expect("in bounds");
    assert!(!grid.check_connections_possible_for_pos(TilePos::new(0, 0)));
}

#[test]
fn test_drop_tile_pulls_nearest_tile_above() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(1, 0), 8).expect("in bounds");
    grid.set_tile(TilePos::new(1, 2), 5).expect("in bounds");

    assert!(grid.drop_tile(TilePos::new(1, 4)));
    assert_eq!(grid.get_tile(TilePos::new(1, 4)), Some(GridTile::new(5)));
    assert_eq!(grid.get_tile(TilePos::new(1, 2)), None);
    assert_eq!(grid.get_tile(TilePos::new(1, 0)), Some(GridTile::new(8)));
}

#[test]
fn test_drop_tile_on_occupied_or_unsupported_cell() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(0, 3), 2).expect("in bounds");
    assert!(!grid.drop_tile(TilePos::new(0, 3)));
    // Nothing above (0,2)
    assert!(!grid.drop_tile(TilePos::new(0, 2)));
    assert!(!grid.drop_tile(TilePos::new(7, 7)));
}

#[test]
fn test_refill_settles_and_fills() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(0, 0), 9).expect("in bounds");
    grid.set_tile(TilePos::new(0, 2), 10).expect("in bounds");
    grid.set_tile(TilePos::new(3, 1), 11).expect("in bounds");
    grid.drain_events();

    let mut rng = StdRng::seed_from_u64(17);
    let range = TileRange::new(2, 4).expect("valid range");
    grid.refill(range, &mut rng);

    assert!(grid.is_full());
    // Existing tiles fell to the bottom keeping their order
    assert_eq!(grid.get_tile(TilePos::new(0, 5)), Some(GridTile::new(10)));
    assert_eq!(grid.get_tile(TilePos::new(0, 4)), Some(GridTile::new(9)));
    assert_eq!(grid.get_tile(TilePos::new(3, 5)), Some(GridTile::new(11)));
    // Everything else came from the range
    let spawned = grid
        .tiles()
        .filter(|(pos, _)| ![TilePos::new(0, 5), TilePos::new(0, 4), TilePos::new(3, 5)].contains(pos));
    for (_, tile) in spawned {
        assert!(range.contains(tile.number), "{} not in {}", tile.number, range);
    }

    let events = grid.drain_events();
    let settled = events
        .iter()
        .position(|e| *e == PresentationEvent::DropsSettled)
        .expect("phase boundary");
    assert!(events[settled + 1..]
        .iter()
        .all(|e| matches!(e, PresentationEvent::TileSet { .. })));
}

#[test]
fn test_refill_after_holes_keeps_columns_settled() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut grid = Grid::default();
    grid.refill(TileRange::default(), &mut rng);
    for pos in [
        TilePos::new(0, 5),
        TilePos::new(0, 3),
        TilePos::new(2, 2),
        TilePos::new(4, 0),
        TilePos::new(4, 4),
    ] {
        grid.remove_tile(pos).expect("occupied");
    }
    grid.refill(TileRange::default(), &mut rng);
    assert!(grid.is_full());
    assert_settled(&grid);
}

#[test]
fn test_refill_on_tall_narrow_grid() {
    let dims = GridDimensions::new(1, 8).expect("valid dimensions");
    let mut grid = Grid::new(dims);
    grid.set_tile(TilePos::new(0, 1), 30).expect("in bounds");
    let mut rng = StdRng::seed_from_u64(1);
    grid.refill(TileRange::default(), &mut rng);
    assert_eq!(grid.get_tile(TilePos::new(0, 7)), Some(GridTile::new(30)));
    assert!(grid.is_full());
}

#[test]
fn test_remove_low_tiles() {
    let mut cells = vec![5u8; 30];
    cells[3] = 2;
    cells[17] = 4;
    cells[22] = 0;
    let mut grid = grid_from(&cells);
    grid.remove_low_tiles(5);
    assert_eq!(grid.get_tile(TilePos::new(3, 0)), None);
    assert_eq!(grid.get_tile(TilePos::new(2, 3)), None);
    assert_eq!(grid.tiles().count(), 27);
    assert!(grid.tiles().all(|(_, t)| t.number >= 5));
}

#[test]
fn test_highest_number() {
    assert_eq!(Grid::default().get_highest_number(), 1);
    let mut cells = vec![3u8; 30];
    cells[11] = 17;
    assert_eq!(grid_from(&cells).get_highest_number(), 17);
}

#[test]
fn test_cells_are_row_major() {
    let mut grid = Grid::default();
    grid.set_tile(TilePos::new(1, 0), 4).expect("in bounds");
    grid.set_tile(TilePos::new(0, 1), 6).expect("in bounds");
    let cells = grid.to_cells();
    assert_eq!(cells.len(), 30);
    assert_eq!(cells[1], 4);
    assert_eq!(cells[5], 6);
    assert_eq!(cells.iter().filter(|n| **n == GridSnapshot::EMPTY).count(), 28);
}

#[test]
fn test_snapshot_round_trip_through_json() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut grid = Grid::default();
    grid.refill(TileRange::starting_at(3), &mut rng);

    let json = serde_json::to_string(&grid.snapshot()).expect("serialize");
    assert!(json.starts_with('['));
    let snapshot: GridSnapshot = serde_json::from_str(&json).expect("deserialize");

    let mut restored = Grid::default();
    restored.load_snapshot(&snapshot).expect("valid snapshot");
    for pos in grid.positions() {
        assert_eq!(restored.get_tile(pos), grid.get_tile(pos));
    }
}

#[test]
fn test_load_with_wrong_length_leaves_grid_unchanged() {
    let mut grid = grid_from(&[6; 30]);
    let before = grid.to_cells();
    assert_eq!(
        grid.load_cells(&[1; 29]),
        Err(EngineError::SnapshotLength {
            expected: 30,
            actual: 29
        })
    );
    assert!(grid.load_cells(&[1; 31]).is_err());
    assert_eq!(grid.to_cells(), before);
    assert!(grid.drain_events().is_empty());
}

#[test]
fn test_load_with_oversized_number_leaves_grid_unchanged() {
    let mut grid = grid_from(&[6; 30]);
    let mut cells = vec![2u8; 30];
    cells[4] = 61;
    assert_eq!(grid.load_cells(&cells), Err(EngineError::InvalidTileNumber(61)));
    assert_eq!(grid.to_cells(), vec![6; 30]);
}

#[test]
fn test_load_clears_cells_marked_empty() {
    let mut grid = grid_from(&[6; 30]);
    let mut cells = vec![2u8; 30];
    cells[0] = 0;
    grid.load_cells(&cells).expect("valid cells");
    assert_eq!(grid.get_tile(TilePos::new(0, 0)), None);
    assert_eq!(grid.tiles().count(), 29);
}

#[test]
fn test_invalid_dimensions_rejected() {
    assert!(GridDimensions::new(0, 6).is_err());
    assert!(GridDimensions::new(5, -1).is_err());
    assert_eq!(
        GridDimensions::new(7, 3).expect("valid").cell_count(),
        21
    );
}

#[test]
fn test_dimensions_with_overflowing_cell_count_rejected() {
    assert_eq!(
        GridDimensions::new(i32::MAX, 2),
        Err(EngineError::InvalidDimensions {
            columns: i32::MAX,
            rows: 2
        })
    );
    assert!(GridDimensions::new(65_536, 65_536).is_err());
    assert!(GridDimensions::new(46_340, 46_340).is_ok());
}
