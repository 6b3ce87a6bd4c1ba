//! Tile values and the spawn range.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Content of an occupied grid cell.
///
/// `number` is an exponent: the tile's real value is `2^number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridTile {
    /// Exponent of the tile.
    pub number: u8,
}

impl GridTile {
    /// Lowest number a tile is designed to carry.
    pub const MIN_NUMBER: u8 = 1;
    /// Highest number a tile is designed to carry (2^60).
    pub const MAX_NUMBER: u8 = 60;

    /// Creates a tile with the given exponent.
    pub const fn new(number: u8) -> Self {
        Self { number }
    }

    /// Returns `2^number`.
    ///
    /// Exponents beyond the width of `u128` saturate to `u128::MAX`.
    pub fn real_value(self) -> u128 {
        1u128.checked_shl(u32::from(self.number)).unwrap_or(u128::MAX)
    }
}

/// Half-open interval `[low, high)` of numbers for newly spawned tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRange {
    low: u8,
    high: u8,
}

impl TileRange {
    /// Width of every range produced by [`TileRange::starting_at`].
    pub const SIZE: u8 = 8;

    /// Creates a range, rejecting empty ranges and a floor below 1.
    pub fn new(low: u8, high: u8) -> Result<Self, EngineError> {
        if low < GridTile::MIN_NUMBER || low >= high {
            return Err(EngineError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Returns the standard-width range starting at `low`.
    ///
    /// `low` is clamped to `1..=u8::MAX - SIZE` so the range is never empty.
    pub fn starting_at(low: u8) -> Self {
        let low = low.clamp(GridTile::MIN_NUMBER, u8::MAX - Self::SIZE);
        Self {
            low,
            high: low + Self::SIZE,
        }
    }

    /// Returns the range a board whose highest tile is `highest` should spawn from.
    ///
    /// The floor rises half as fast as the highest tile once it passes 10:
    /// `max(1, (highest - 8) / 2)` with flooring division.
    pub fn for_highest(highest: u8) -> Self {
        let low = (i32::from(highest) - 8).div_euclid(2).max(1);
        Self::starting_at(u8::try_from(low).unwrap_or(u8::MAX))
    }

    /// Inclusive lower bound.
    pub fn low(&self) -> u8 {
        self.low
    }

    /// Exclusive upper bound.
    pub fn high(&self) -> u8 {
        self.high
    }

    /// Returns true if `number` may be spawned from this range.
    pub fn contains(&self, number: u8) -> bool {
        (self.low..self.high).contains(&number)
    }
}

impl Default for TileRange {
    fn default() -> Self {
        Self::starting_at(GridTile::MIN_NUMBER)
    }
}

impl std::fmt::Display for TileRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_value() {
        assert_eq!(GridTile::new(1).real_value(), 2);
        assert_eq!(GridTile::new(10).real_value(), 1024);
        assert_eq!(GridTile::new(60).real_value(), 1u128 << 60);
    }

    #[test]
    fn test_default_range() {
        let range = TileRange::default();
        assert_eq!((range.low(), range.high()), (1, 9));
    }

    #[test]
    fn test_range_rejects_empty_interval() {
        assert!(TileRange::new(5, 5).is_err());
        assert!(TileRange::new(0, 4).is_err());
        assert!(TileRange::new(2, 3).is_ok());
    }

    #[test]
    fn test_starting_at_never_empty() {
        let top = TileRange::starting_at(u8::MAX);
        assert_eq!((top.low(), top.high()), (u8::MAX - TileRange::SIZE, u8::MAX));
        assert!(top.contains(u8::MAX - 1));
        assert_eq!(TileRange::starting_at(0), TileRange::default());
    }

    #[test]
    fn test_range_for_highest() {
        assert_eq!(TileRange::for_highest(20), TileRange::starting_at(6));
        assert_eq!(TileRange::for_highest(13), TileRange::starting_at(2));
        for highest in 1..=11 {
            assert_eq!(TileRange::for_highest(highest), TileRange::default());
        }
    }
}
